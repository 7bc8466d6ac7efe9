use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::batch::{Batch, Document};
use crate::error::{Error, Result};
use crate::vocabulary::Vocabulary;
use crate::TermId;

/// Per-term postings: document id to occurrence count.
///
/// Counts are taken straight from the token sequences rather than derived
/// from a [`crate::ForwardIndex`]; the two must still agree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InvertedIndex {
    postings: BTreeMap<TermId, BTreeMap<String, u32>>,
}

impl InvertedIndex {
    /// Every token must already have an id in `vocabulary`.
    pub fn build(batch: &Batch, vocabulary: &Vocabulary) -> Result<Self> {
        let mut index = Self::default();
        for doc in batch.documents() {
            index.add_document(batch.label(), doc, vocabulary)?;
        }
        Ok(index)
    }

    /// Same result as [`InvertedIndex::build`], folded over the rayon pool.
    pub fn build_parallel(batch: &Batch, vocabulary: &Vocabulary) -> Result<Self> {
        let label = batch.label();
        batch
            .documents()
            .par_iter()
            .try_fold(Self::default, |mut acc, doc| {
                acc.add_document(label, doc, vocabulary)?;
                Ok::<_, Error>(acc)
            })
            .try_reduce(Self::default, |mut a, b| {
                a.absorb(b);
                Ok(a)
            })
    }

    fn add_document(&mut self, batch: &str, doc: &Document, vocabulary: &Vocabulary) -> Result<()> {
        for term in &doc.tokens {
            let term_id = vocabulary.get(term).ok_or_else(|| Error::Consistency {
                batch: batch.to_string(),
                doc_id: doc.id.clone(),
                term: term.clone(),
            })?;
            let plist = self.postings.entry(term_id).or_default();
            match plist.get_mut(doc.id.as_str()) {
                Some(freq) => *freq += 1,
                None => {
                    plist.insert(doc.id.clone(), 1);
                }
            }
        }
        Ok(())
    }

    fn absorb(&mut self, other: Self) {
        for (term_id, plist) in other.postings {
            let mine = self.postings.entry(term_id).or_default();
            for (doc_id, freq) in plist {
                *mine.entry(doc_id).or_insert(0) += freq;
            }
        }
    }

    pub fn postings(&self, term_id: TermId) -> Option<&BTreeMap<String, u32>> {
        self.postings.get(&term_id)
    }

    /// Number of documents containing the term.
    pub fn document_frequency(&self, term_id: TermId) -> usize {
        self.postings.get(&term_id).map_or(0, BTreeMap::len)
    }

    /// Highest per-document count of the term across the batch.
    pub fn max_frequency(&self, term_id: TermId) -> u32 {
        self.postings
            .get(&term_id)
            .and_then(|plist| plist.values().copied().max())
            .unwrap_or(0)
    }

    pub fn frequency(&self, term_id: TermId, doc_id: &str) -> u32 {
        self.postings
            .get(&term_id)
            .and_then(|plist| plist.get(doc_id))
            .copied()
            .unwrap_or(0)
    }

    /// Number of distinct terms with postings.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TermId, &BTreeMap<String, u32>)> {
        self.postings.iter().map(|(id, plist)| (*id, plist))
    }
}
