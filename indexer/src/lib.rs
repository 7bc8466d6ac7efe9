pub mod config;
pub mod output;
pub mod pipeline;
pub mod trec;

pub use config::RunConfig;
pub use output::{OutputFormat, ResultWriter};
pub use pipeline::{dump, run, DumpArgs, RunArgs, RunSummary};
