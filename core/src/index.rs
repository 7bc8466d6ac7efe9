use serde::Serialize;
use tracing::debug;

use crate::batch::Batch;
use crate::error::{Error, Result};
use crate::forward::ForwardIndex;
use crate::inverted::InvertedIndex;
use crate::options::IndexOptions;
use crate::vocabulary::Vocabulary;

pub type TermId = u32;

/// Vocabulary plus both index views of one batch.
#[derive(Debug, Clone, Serialize)]
pub struct Index {
    pub label: String,
    pub num_docs: usize,
    pub vocabulary: Vocabulary,
    pub forward: ForwardIndex,
    pub inverted: InvertedIndex,
}

impl Index {
    /// Forward index first (it grows the vocabulary), then the inverted
    /// index against the finished vocabulary.
    pub fn build(batch: &Batch, options: &IndexOptions) -> Result<Self> {
        let mut vocabulary = Vocabulary::new();
        let (forward, inverted) = if options.parallel {
            let forward = ForwardIndex::build_parallel(batch, &mut vocabulary)?;
            (forward, InvertedIndex::build_parallel(batch, &vocabulary)?)
        } else {
            let forward = ForwardIndex::build(batch, &mut vocabulary)?;
            (forward, InvertedIndex::build(batch, &vocabulary)?)
        };
        debug!(
            batch = batch.label(),
            num_docs = batch.len(),
            num_terms = vocabulary.len(),
            parallel = options.parallel,
            "built index"
        );
        Ok(Self {
            label: batch.label().to_string(),
            num_docs: batch.len(),
            vocabulary,
            forward,
            inverted,
        })
    }

    /// Check that both views describe exactly the tokens of `batch`.
    pub fn verify(&self, batch: &Batch) -> Result<()> {
        let fail = |detail: String| Error::Invariant { batch: self.label.clone(), detail };
        if self.forward.len() != batch.len() {
            return Err(fail(format!(
                "forward index has {} documents, batch has {}",
                self.forward.len(),
                batch.len()
            )));
        }
        for doc in batch.documents() {
            let freqs = self
                .forward
                .get(&doc.id)
                .ok_or_else(|| fail(format!("document {:?} missing from forward index", doc.id)))?;
            let total: u64 = freqs.values().map(|&f| u64::from(f)).sum();
            if total != doc.tokens.len() as u64 {
                return Err(fail(format!(
                    "document {:?}: frequencies sum to {total}, expected {}",
                    doc.id,
                    doc.tokens.len()
                )));
            }
        }
        for (doc_id, freqs) in self.forward.iter() {
            for (&term_id, &freq) in freqs {
                let inv = self.inverted.frequency(term_id, doc_id);
                if inv != freq {
                    return Err(fail(format!(
                        "term {term_id} in {doc_id:?}: forward {freq}, inverted {inv}"
                    )));
                }
            }
        }
        for (term_id, plist) in self.inverted.iter() {
            if self.vocabulary.term(term_id).is_none() {
                return Err(fail(format!("term id {term_id} not in vocabulary")));
            }
            for (doc_id, &freq) in plist {
                let fwd = self.forward.frequency(doc_id, term_id);
                if fwd != freq {
                    return Err(fail(format!(
                        "term {term_id} in {doc_id:?}: inverted {freq}, forward {fwd}"
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch() -> Batch {
        let mut b = Batch::new("b");
        b.insert("docA", vec!["cat".into(), "dog".into()]);
        b.insert("docB", vec!["dog".into(), "dog".into()]);
        b
    }

    #[test]
    fn built_index_verifies() {
        let b = batch();
        for parallel in [false, true] {
            let index = Index::build(&b, &IndexOptions { parallel }).unwrap();
            assert_eq!(index.num_docs, 2);
            assert_eq!(index.vocabulary.len(), 2);
            index.verify(&b).unwrap();
        }
    }

    #[test]
    fn verify_catches_foreign_batch() {
        let index = Index::build(&batch(), &IndexOptions::default()).unwrap();
        let mut other = batch();
        other.insert("docB", vec!["dog".into()]);
        assert!(matches!(index.verify(&other), Err(Error::Invariant { .. })));
    }
}
