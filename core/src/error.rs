//! Error types for index construction and scoring.
//!
//! Unknown query terms are deliberately absent: they contribute nothing to a
//! score and are skipped where they are looked up.

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A token reached the inverted index builder without a vocabulary id.
    #[error("batch {batch:?}: term {term:?} in document {doc_id:?} has no vocabulary id")]
    Consistency {
        batch: String,
        doc_id: String,
        term: String,
    },

    /// Forward and inverted views disagree with each other or with the batch.
    #[error("batch {batch:?}: index invariant violated: {detail}")]
    Invariant { batch: String, detail: String },

    /// More distinct terms than a `TermId` can number.
    #[error("vocabulary is full after {terms} terms")]
    VocabularyFull { terms: usize },

    /// IDF was requested for a batch with no documents.
    #[error("batch {batch:?} contains no documents, idf is undefined")]
    DegenerateInput { batch: String },
}
