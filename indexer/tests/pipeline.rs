use indexer::{dump, run, DumpArgs, OutputFormat, RunArgs, RunConfig};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;
use tfidf_core::IndexScope;

fn doc(id: &str, text: &str) -> String {
    format!("<DOC>\n<DOCNO> {id} </DOCNO>\n<TEXT>\n{text}\n</TEXT>\n</DOC>\n")
}

fn build_fixture(dir: &Path) {
    let docs = dir.join("docs");
    fs::create_dir_all(&docs).unwrap();
    fs::write(
        docs.join("ft911-1"),
        [
            doc("FT911-1", "Airline fares rose sharply."),
            doc("FT911-2", "Airline losses mounted as fares fell."),
            doc("FT911-3", "Central bank rates unchanged in 1991."),
        ]
        .concat(),
    )
    .unwrap();
    fs::write(
        docs.join("ft911-2"),
        [doc("FT911-4", "Hubble telescope images released."), doc("FT911-5", "Airline strike grounds flights.")]
            .concat(),
    )
    .unwrap();
    fs::write(docs.join("ft911-3"), "no documents in this file\n").unwrap();
    fs::write(docs.join("other.txt"), doc("X-1", "Airline Airline Airline")).unwrap();

    fs::write(
        dir.join("topics.txt"),
        "<top>\n<num> Number: 301\n<title> Airline fares\n</top>\n\
         <top>\n<num> Number: 302\n<title> Topic: Hubble Telescope\n</top>\n\
         <top>\n<num> Number: 303\n<title> zebra\n</top>\n",
    )
    .unwrap();
    fs::write(dir.join("stopwords.txt"), "as\n the\nin\n").unwrap();
}

fn run_args(dir: &Path, scope: IndexScope, parallel: bool) -> RunArgs {
    let mut config = RunConfig::default();
    config.index.scope = scope;
    config.index.parallel = parallel;
    config.tokenizer.stopwords = Some(dir.join("stopwords.txt"));
    RunArgs {
        docs: dir.join("docs"),
        topics: dir.join("topics.txt"),
        prefix: Some("ft911".into()),
        config,
    }
}

#[test]
fn per_batch_run_matches_expected_output() {
    let dir = tempdir().unwrap();
    build_fixture(dir.path());

    let mut out = Vec::new();
    let summary = run(&run_args(dir.path(), IndexScope::PerBatch, false), &mut out).unwrap();
    assert_eq!(summary.batches, 3);
    assert_eq!(summary.skipped_batches, 1);
    assert_eq!(summary.queries, 3);
    assert_eq!(summary.lines, 4);

    let text = String::from_utf8(out).unwrap();
    assert_eq!(
        text,
        "301    FT911-1    1    0.810930\n\
         301    FT911-2    2    0.810930\n\
         \n\
         \n\
         301    FT911-5    1    0.693147\n\
         302    FT911-4    1    1.386294\n\
         \n"
    );
}

#[test]
fn corpus_wide_run_shares_idf() {
    let dir = tempdir().unwrap();
    build_fixture(dir.path());

    let mut out = Vec::new();
    let summary = run(&run_args(dir.path(), IndexScope::CorpusWide, false), &mut out).unwrap();
    assert_eq!(summary.batches, 1);
    assert_eq!(summary.skipped_batches, 0);

    let text = String::from_utf8(out).unwrap();
    assert_eq!(
        text,
        "301    FT911-1    1    1.427116\n\
         301    FT911-2    2    1.427116\n\
         301    FT911-5    3    0.510826\n\
         302    FT911-4    1    3.218876\n\
         \n"
    );
}

#[test]
fn parallel_run_is_byte_identical() {
    let dir = tempdir().unwrap();
    build_fixture(dir.path());
    for scope in [IndexScope::PerBatch, IndexScope::CorpusWide] {
        let mut seq = Vec::new();
        let mut par = Vec::new();
        run(&run_args(dir.path(), scope, false), &mut seq).unwrap();
        let mut args = run_args(dir.path(), scope, true);
        args.config.index.jobs = Some(2);
        run(&args, &mut par).unwrap();
        assert_eq!(seq, par);
    }
}

#[test]
fn json_output_and_top_k() {
    let dir = tempdir().unwrap();
    build_fixture(dir.path());
    let mut args = run_args(dir.path(), IndexScope::CorpusWide, false);
    args.config.output.format = OutputFormat::Json;
    args.config.output.top_k = Some(1);

    let mut out = Vec::new();
    run(&args, &mut out).unwrap();
    let hits: Vec<Value> = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0]["query_id"], "301");
    assert_eq!(hits[0]["doc_id"], "FT911-1");
    assert_eq!(hits[0]["batch"], "corpus");
    assert_eq!(hits[1]["query_id"], "302");
    assert_eq!(hits[1]["rank"], 1);
}

#[test]
fn missing_docs_directory_is_an_error() {
    let dir = tempdir().unwrap();
    build_fixture(dir.path());
    let mut args = run_args(dir.path(), IndexScope::PerBatch, false);
    args.docs = dir.path().join("nope");
    assert!(run(&args, Vec::new()).is_err());
}

#[test]
fn dump_writes_verified_index() {
    let dir = tempdir().unwrap();
    build_fixture(dir.path());
    let mut config = RunConfig::default();
    config.tokenizer.stopwords = Some(dir.path().join("stopwords.txt"));
    let args = DumpArgs { docs: dir.path().join("docs/ft911-2"), verify: true, config };

    let mut out = Vec::new();
    dump(&args, &mut out).unwrap();
    let json: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["label"], "ft911-2");
    assert_eq!(json["num_docs"], 2);
    let terms = json["vocabulary"]["terms"].as_array().unwrap();
    assert_eq!(terms.len(), 8);
    assert_eq!(json["forward"]["docs"]["FT911-4"].as_object().unwrap().len(), 4);
    assert_eq!(json["inverted"]["postings"]["0"]["FT911-4"], 1);
}
