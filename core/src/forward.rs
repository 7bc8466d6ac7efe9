use rayon::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::batch::{Batch, Document};
use crate::error::Result;
use crate::vocabulary::Vocabulary;
use crate::TermId;

/// Per-document term frequencies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ForwardIndex {
    docs: BTreeMap<String, BTreeMap<TermId, u32>>,
}

impl ForwardIndex {
    /// Count every document's terms, growing `vocabulary` as new terms show
    /// up. Ids follow batch order, then token order within a document.
    pub fn build(batch: &Batch, vocabulary: &mut Vocabulary) -> Result<Self> {
        let counted: Vec<_> = batch.documents().iter().map(count_terms).collect();
        Self::assign(batch, counted, vocabulary)
    }

    /// Same result as [`ForwardIndex::build`]; counting runs on the rayon
    /// pool and only id assignment is serial.
    pub fn build_parallel(batch: &Batch, vocabulary: &mut Vocabulary) -> Result<Self> {
        let counted: Vec<_> = batch.documents().par_iter().map(count_terms).collect();
        Self::assign(batch, counted, vocabulary)
    }

    fn assign(batch: &Batch, counted: Vec<Vec<(&str, u32)>>, vocabulary: &mut Vocabulary) -> Result<Self> {
        let mut docs = BTreeMap::new();
        for (doc, counts) in batch.documents().iter().zip(counted) {
            let freqs = counts
                .into_iter()
                .map(|(term, freq)| Ok((vocabulary.id_of(term)?, freq)))
                .collect::<Result<BTreeMap<TermId, u32>>>()?;
            docs.insert(doc.id.clone(), freqs);
        }
        Ok(Self { docs })
    }

    pub fn get(&self, doc_id: &str) -> Option<&BTreeMap<TermId, u32>> {
        self.docs.get(doc_id)
    }

    pub fn contains(&self, doc_id: &str) -> bool {
        self.docs.contains_key(doc_id)
    }

    /// Occurrences of `term_id` in `doc_id`, 0 when absent.
    pub fn frequency(&self, doc_id: &str, term_id: TermId) -> u32 {
        self.docs
            .get(doc_id)
            .and_then(|freqs| freqs.get(&term_id))
            .copied()
            .unwrap_or(0)
    }

    /// Number of documents, including ones with no terms.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeMap<TermId, u32>)> {
        self.docs.iter().map(|(id, freqs)| (id.as_str(), freqs))
    }
}

/// Distinct terms of a document with their counts, in first-seen order.
fn count_terms(doc: &Document) -> Vec<(&str, u32)> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, u32)> = Vec::new();
    for token in &doc.tokens {
        match slots.get(token.as_str()) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(token.as_str(), counts.len());
                counts.push((token.as_str(), 1));
            }
        }
    }
    counts
}
