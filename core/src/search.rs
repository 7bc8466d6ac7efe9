use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::index::Index;
use crate::options::ScoreOptions;
use crate::scorer::{score_with, ScoreEntry};
use crate::tokenizer::Tokenizer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub id: String,
    pub text: String,
}

impl Query {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self { id: id.into(), text: text.into() }
    }
}

/// Ranked documents for one query, best first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    pub query_id: String,
    pub entries: Vec<ScoreEntry>,
}

/// Evaluates queries against a finished, read-only index.
pub struct Searcher<'a> {
    index: &'a Index,
    tokenizer: &'a Tokenizer,
    options: ScoreOptions,
}

impl<'a> Searcher<'a> {
    pub fn new(index: &'a Index, tokenizer: &'a Tokenizer, options: ScoreOptions) -> Self {
        Self { index, tokenizer, options }
    }

    pub fn search(&self, query: &Query) -> Result<QueryResult> {
        let terms = self.tokenizer.tokenize(&query.text);
        let entries = score_with(&terms, self.index, &self.options)?;
        debug!(query = %query.id, terms = terms.len(), hits = entries.len(), "evaluated query");
        Ok(QueryResult { query_id: query.id.clone(), entries })
    }

    /// Results come back in the order of `queries` either way.
    pub fn search_all(&self, queries: &[Query], parallel: bool) -> Result<Vec<QueryResult>> {
        if self.index.num_docs == 0 {
            return Err(Error::DegenerateInput { batch: self.index.label.clone() });
        }
        if parallel {
            queries.par_iter().map(|q| self.search(q)).collect()
        } else {
            queries.iter().map(|q| self.search(q)).collect()
        }
    }
}
