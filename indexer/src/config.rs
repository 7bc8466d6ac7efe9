//! Run configuration, loadable from a TOML file and overridden by CLI flags.
//!
//! ```toml
//! [index]
//! scope = "corpus-wide"
//! parallel = true
//! jobs = 4
//!
//! [tokenizer]
//! stopwords = "stopwordlist.txt"
//! stemming = true
//! normalize_unicode = false
//!
//! [output]
//! format = "trec"
//! top_k = 1000
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tfidf_core::{IndexOptions, IndexScope, ScoreOptions, TokenizerOptions};

use crate::output::OutputFormat;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub index: IndexConfig,
    pub tokenizer: TokenizerConfig,
    pub output: OutputConfig,
}

/// `[index]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub scope: IndexScope,
    pub parallel: bool,
    /// Worker threads when `parallel` is set; rayon's default otherwise.
    pub jobs: Option<usize>,
}

/// `[tokenizer]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// One stop word per line; the built-in English list when unset.
    pub stopwords: Option<PathBuf>,
    pub stemming: bool,
    pub normalize_unicode: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        let defaults = TokenizerOptions::default();
        Self {
            stopwords: None,
            stemming: defaults.stemming,
            normalize_unicode: defaults.normalize_unicode,
        }
    }
}

/// `[output]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub top_k: Option<usize>,
}

impl RunConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn index_options(&self) -> IndexOptions {
        IndexOptions { parallel: self.index.parallel }
    }

    pub fn tokenizer_options(&self) -> TokenizerOptions {
        TokenizerOptions {
            stemming: self.tokenizer.stemming,
            normalize_unicode: self.tokenizer.normalize_unicode,
        }
    }

    pub fn score_options(&self) -> ScoreOptions {
        ScoreOptions { top_k: self.output.top_k }
    }
}
