use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which documents an index (and therefore IDF) is computed over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndexScope {
    /// Every input batch gets its own vocabulary and indexes.
    #[default]
    PerBatch,
    /// All batches are merged and indexed once.
    CorpusWide,
}

impl FromStr for IndexScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "per-batch" => Ok(Self::PerBatch),
            "corpus-wide" => Ok(Self::CorpusWide),
            other => Err(format!("unknown scope {other:?}, expected per-batch or corpus-wide")),
        }
    }
}

impl fmt::Display for IndexScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PerBatch => "per-batch",
            Self::CorpusWide => "corpus-wide",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerOptions {
    pub stemming: bool,
    /// NFKC-normalize text before anything else.
    pub normalize_unicode: bool,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        Self { stemming: true, normalize_unicode: false }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexOptions {
    /// Build forward/inverted indexes and evaluate queries on the rayon pool.
    pub parallel: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreOptions {
    /// Keep only the first `top_k` ranked documents; `None` keeps all.
    pub top_k: Option<usize>,
}
