//! TF-IDF ranking.
//!
//! For every distinct query term `t` known to the vocabulary:
//!
//! ```text
//! idf(t)    = ln(N / df(t))
//! tf(t, d)  = (1 + log10 f(t, d)) / (1 + log10 max_d' f(t, d'))
//! score(d) += tf(t, d) * idf(t)
//! ```
//!
//! `N` is the number of documents in the index, and the `tf` denominator uses
//! the term's highest count anywhere in the index. Documents whose summed
//! score is not positive are dropped.

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::index::Index;
use crate::options::ScoreOptions;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreEntry {
    pub doc_id: String,
    pub score: f64,
}

pub fn idf(num_docs: usize, df: usize) -> f64 {
    (num_docs as f64 / df as f64).ln()
}

/// Log-scaled frequency relative to the term's maximum; in `(0, 1]` for
/// `1 <= freq <= max_freq`.
pub fn tf(freq: u32, max_freq: u32) -> f64 {
    (1.0 + f64::from(freq).log10()) / (1.0 + f64::from(max_freq).log10())
}

/// Score descending, then document id ascending.
pub fn rank_order(a: &ScoreEntry, b: &ScoreEntry) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.doc_id.cmp(&b.doc_id))
}

pub fn score(query_terms: &[String], index: &Index) -> Result<Vec<ScoreEntry>> {
    score_with(query_terms, index, &ScoreOptions::default())
}

pub fn score_with(query_terms: &[String], index: &Index, options: &ScoreOptions) -> Result<Vec<ScoreEntry>> {
    if index.num_docs == 0 {
        return Err(Error::DegenerateInput { batch: index.label.clone() });
    }

    let mut seen: HashSet<&str> = HashSet::new();
    let mut scores: HashMap<&str, f64> = HashMap::new();
    for term in query_terms {
        if !seen.insert(term.as_str()) {
            continue;
        }
        let Some(term_id) = index.vocabulary.get(term) else {
            continue;
        };
        let Some(postings) = index.inverted.postings(term_id) else {
            continue;
        };
        let idf = idf(index.num_docs, postings.len());
        let max_freq = index.inverted.max_frequency(term_id);
        for (doc_id, &freq) in postings {
            if !index.forward.contains(doc_id) {
                continue;
            }
            *scores.entry(doc_id.as_str()).or_insert(0.0) += tf(freq, max_freq) * idf;
        }
    }

    let mut ranked: Vec<ScoreEntry> = scores
        .into_iter()
        .filter(|&(_, s)| s > 0.0)
        .map(|(doc_id, score)| ScoreEntry { doc_id: doc_id.to_string(), score })
        .collect();
    ranked.sort_by(rank_order);
    if let Some(k) = options.top_k {
        ranked.truncate(k);
    }
    Ok(ranked)
}
