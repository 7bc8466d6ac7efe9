use criterion::{criterion_group, criterion_main, Criterion};
use tfidf_core::tokenizer::tokenize;
use tfidf_core::{Batch, Index, IndexOptions, Query, ScoreOptions, Searcher, Tokenizer};

const TEXT: &str = "LONDON share prices closed 12.5 points lower at 2,154.3 on Friday as \
    investors took profits ahead of the budget. Dealers said trading volumes were thin, \
    with 412.6m shares changing hands, while sterling slipped against the D-Mark and the \
    dollar. Banks led the fallers after warnings of further bad debt provisions in 1991.";

fn corpus(tokenizer: &Tokenizer) -> Batch {
    let words: Vec<&str> = TEXT.split_whitespace().collect();
    let texts = (0..500).map(|i| {
        let start = i % words.len();
        let text: Vec<&str> = words.iter().cycle().skip(start).take(30 + i % 40).copied().collect();
        (format!("FT911-{i}"), text.join(" "))
    });
    Batch::from_texts("bench", texts, tokenizer)
}

fn bench_tokenize(c: &mut Criterion) {
    c.bench_function("tokenize_paragraph", |b| b.iter(|| tokenize(TEXT)));
}

fn bench_index(c: &mut Criterion) {
    let tokenizer = Tokenizer::default();
    let batch = corpus(&tokenizer);
    c.bench_function("build_index", |b| {
        b.iter(|| Index::build(&batch, &IndexOptions::default()).unwrap())
    });
    c.bench_function("build_index_parallel", |b| {
        b.iter(|| Index::build(&batch, &IndexOptions { parallel: true }).unwrap())
    });
}

fn bench_search(c: &mut Criterion) {
    let tokenizer = Tokenizer::default();
    let batch = corpus(&tokenizer);
    let index = Index::build(&batch, &IndexOptions::default()).unwrap();
    let searcher = Searcher::new(&index, &tokenizer, ScoreOptions::default());
    let query = Query::new("1", "share prices budget sterling");
    c.bench_function("search_one_query", |b| b.iter(|| searcher.search(&query).unwrap()));
}

criterion_group!(benches, bench_tokenize, bench_index, bench_search);
criterion_main!(benches);
