use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indexer::{dump, run, DumpArgs, OutputFormat, RunArgs, RunConfig};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tfidf_core::IndexScope;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build TF-IDF indexes over TREC document batches and rank topics against them", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct Common {
    /// TOML config file; flags given on the command line take precedence
    #[arg(long)]
    config: Option<PathBuf>,
    /// Stop-word list, one word per line (built-in English list if omitted)
    #[arg(long)]
    stopwords: Option<PathBuf>,
    /// Index terms without stemming
    #[arg(long, default_value_t = false)]
    no_stem: bool,
    /// NFKC-normalize text before tokenizing
    #[arg(long, default_value_t = false)]
    normalize_unicode: bool,
    /// Build indexes and evaluate queries on a thread pool
    #[arg(long, default_value_t = false)]
    parallel: bool,
    /// Worker threads for --parallel
    #[arg(long)]
    jobs: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Index each document file and rank every topic against it
    Run {
        /// Document file or directory of document files
        #[arg(long)]
        docs: PathBuf,
        /// TREC topic file
        #[arg(long)]
        topics: PathBuf,
        /// Only read files in --docs whose name starts with this prefix
        #[arg(long)]
        prefix: Option<String>,
        /// Result file (stdout if omitted)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Index each file on its own (per-batch) or all files together (corpus-wide)
        #[arg(long)]
        scope: Option<IndexScope>,
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
        /// Keep at most this many documents per query
        #[arg(long)]
        top_k: Option<usize>,
        #[command(flatten)]
        common: Common,
    },
    /// Print the vocabulary, forward and inverted index of one document file as JSON
    Dump {
        /// Document file
        #[arg(long)]
        docs: PathBuf,
        /// Check that forward and inverted indexes agree
        #[arg(long, default_value_t = false)]
        verify: bool,
        #[command(flatten)]
        common: Common,
    },
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { docs, topics, prefix, output, scope, format, top_k, common } => {
            let mut config = load_config(&common)?;
            if let Some(scope) = scope {
                config.index.scope = scope;
            }
            if let Some(format) = format {
                config.output.format = format;
            }
            if top_k.is_some() {
                config.output.top_k = top_k;
            }
            let args = RunArgs { docs, topics, prefix, config };
            let out: Box<dyn Write + Send> = match &output {
                Some(path) => Box::new(BufWriter::new(
                    File::create(path).with_context(|| format!("creating {}", path.display()))?,
                )),
                None => Box::new(BufWriter::new(io::stdout())),
            };
            let summary = run(&args, out)?;
            if summary.skipped_batches > 0 {
                tracing::warn!(skipped = summary.skipped_batches, "some batches had no documents");
            }
            Ok(())
        }
        Commands::Dump { docs, verify, common } => {
            let config = load_config(&common)?;
            let args = DumpArgs { docs, verify, config };
            dump(&args, BufWriter::new(io::stdout()))
        }
    }
}

fn load_config(common: &Common) -> Result<RunConfig> {
    let mut config = match &common.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    if common.stopwords.is_some() {
        config.tokenizer.stopwords = common.stopwords.clone();
    }
    if common.no_stem {
        config.tokenizer.stemming = false;
    }
    if common.normalize_unicode {
        config.tokenizer.normalize_unicode = true;
    }
    if common.parallel {
        config.index.parallel = true;
    }
    if let Some(jobs) = common.jobs {
        config.index.parallel = true;
        config.index.jobs = Some(jobs);
    }
    Ok(config)
}
