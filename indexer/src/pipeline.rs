use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;
use tfidf_core::{Batch, Index, IndexScope, Query, Searcher, Tokenizer};
use tracing::{error, info};

use crate::config::RunConfig;
use crate::output::ResultWriter;
use crate::trec::{discover, load_batch, load_stop_words, load_topics};

/// Label of the merged batch in corpus-wide runs.
pub const CORPUS_LABEL: &str = "corpus";

#[derive(Debug, Clone)]
pub struct RunArgs {
    /// A document file or a directory of them.
    pub docs: PathBuf,
    pub topics: PathBuf,
    /// Only files whose name starts with this are read from a directory.
    pub prefix: Option<String>,
    pub config: RunConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub batches: usize,
    /// Batches that could not be ranked because they held no documents.
    pub skipped_batches: usize,
    pub queries: usize,
    pub lines: usize,
}

#[derive(Debug, Clone)]
pub struct DumpArgs {
    pub docs: PathBuf,
    pub verify: bool,
    pub config: RunConfig,
}

fn build_tokenizer(config: &RunConfig) -> Result<Tokenizer> {
    let stop_words = load_stop_words(config.tokenizer.stopwords.as_deref())?;
    Ok(Tokenizer::with_options(stop_words, config.tokenizer_options()))
}

/// Index every batch and write the ranking of every topic against it.
pub fn run<W: Write + Send>(args: &RunArgs, out: W) -> Result<RunSummary> {
    match (args.config.index.parallel, args.config.index.jobs) {
        (true, Some(jobs)) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build()
                .context("building worker pool")?;
            pool.install(|| run_batches(args, out))
        }
        _ => run_batches(args, out),
    }
}

fn run_batches<W: Write>(args: &RunArgs, out: W) -> Result<RunSummary> {
    let config = &args.config;
    let tokenizer = build_tokenizer(config)?;
    let queries = load_topics(&args.topics)?;
    let files = discover(&args.docs, args.prefix.as_deref())?;
    info!(
        files = files.len(),
        queries = queries.len(),
        scope = %config.index.scope,
        parallel = config.index.parallel,
        "starting run"
    );

    let mut writer = ResultWriter::new(out, config.output.format);
    let mut summary = RunSummary { queries: queries.len(), ..RunSummary::default() };
    match config.index.scope {
        IndexScope::PerBatch => {
            for file in &files {
                let batch = load_batch(file, &tokenizer)?;
                rank_batch(&batch, &tokenizer, &queries, config, &mut writer, &mut summary)?;
            }
        }
        IndexScope::CorpusWide => {
            let mut corpus = Batch::new(CORPUS_LABEL);
            for file in &files {
                corpus.merge(load_batch(file, &tokenizer)?);
            }
            rank_batch(&corpus, &tokenizer, &queries, config, &mut writer, &mut summary)?;
        }
    }
    summary.lines = writer.lines();
    writer.finish().context("flushing results")?;
    info!(
        batches = summary.batches,
        skipped = summary.skipped_batches,
        lines = summary.lines,
        "run complete"
    );
    Ok(summary)
}

fn rank_batch<W: Write>(
    batch: &Batch,
    tokenizer: &Tokenizer,
    queries: &[Query],
    config: &RunConfig,
    writer: &mut ResultWriter<W>,
    summary: &mut RunSummary,
) -> Result<()> {
    summary.batches += 1;
    let index = Index::build(batch, &config.index_options())
        .with_context(|| format!("indexing batch {}", batch.label()))?;
    let searcher = Searcher::new(&index, tokenizer, config.score_options());
    let results = match searcher.search_all(queries, config.index.parallel) {
        Ok(results) => results,
        Err(err @ tfidf_core::Error::DegenerateInput { .. }) => {
            error!(batch = batch.label(), error = %err, "skipping batch");
            summary.skipped_batches += 1;
            return Ok(());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("ranking batch {}", batch.label()));
        }
    };
    for result in &results {
        writer.write_block(batch.label(), result).context("writing results")?;
    }
    info!(
        batch = batch.label(),
        num_docs = index.num_docs,
        num_terms = index.vocabulary.len(),
        "ranked batch"
    );
    Ok(())
}

/// Write the vocabulary and both indexes of one document file as JSON.
pub fn dump<W: Write>(args: &DumpArgs, mut out: W) -> Result<()> {
    let tokenizer = build_tokenizer(&args.config)?;
    let batch = load_batch(&args.docs, &tokenizer)?;
    let index = Index::build(&batch, &args.config.index_options())
        .with_context(|| format!("indexing batch {}", batch.label()))?;
    if args.verify {
        index.verify(&batch)?;
        info!(batch = batch.label(), "index invariants hold");
    }
    serde_json::to_writer_pretty(&mut out, &index).context("serializing index")?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
