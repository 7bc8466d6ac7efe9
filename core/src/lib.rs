//! Term-based TF-IDF indexing and ranking over batches of documents.
//!
//! A [`Batch`] of tokenized documents is turned into an [`Index`] (vocabulary,
//! forward index and inverted index), and a [`Searcher`] ranks documents in
//! that index against free-text queries.

pub mod batch;
pub mod error;
pub mod forward;
pub mod index;
pub mod inverted;
pub mod options;
pub mod scorer;
pub mod search;
pub mod tokenizer;
pub mod vocabulary;

pub use batch::{Batch, Document};
pub use error::{Error, Result};
pub use forward::ForwardIndex;
pub use index::{Index, TermId};
pub use inverted::InvertedIndex;
pub use options::{IndexOptions, IndexScope, ScoreOptions, TokenizerOptions};
pub use scorer::{score, score_with, ScoreEntry};
pub use search::{Query, QueryResult, Searcher};
pub use tokenizer::{StopWords, Tokenizer};
pub use vocabulary::Vocabulary;
