use std::collections::HashMap;

use crate::tokenizer::Tokenizer;

/// A document after tokenization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: String,
    pub tokens: Vec<String>,
}

/// An ordered collection of documents indexed together.
///
/// Inserting an id that is already present replaces its tokens in place, so
/// the batch behaves like an insertion-ordered map.
#[derive(Debug, Clone, Default)]
pub struct Batch {
    label: String,
    docs: Vec<Document>,
    positions: HashMap<String, usize>,
}

impl Batch {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), ..Self::default() }
    }

    /// Tokenize `(id, text)` pairs into a new batch.
    pub fn from_texts<I, S, T>(label: impl Into<String>, texts: I, tokenizer: &Tokenizer) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: AsRef<str>,
    {
        let mut batch = Self::new(label);
        for (id, text) in texts {
            batch.insert(id, tokenizer.tokenize(text.as_ref()));
        }
        batch
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn insert(&mut self, id: impl Into<String>, tokens: Vec<String>) {
        let id = id.into();
        match self.positions.get(&id) {
            Some(&pos) => self.docs[pos].tokens = tokens,
            None => {
                self.positions.insert(id.clone(), self.docs.len());
                self.docs.push(Document { id, tokens });
            }
        }
    }

    /// Append every document of `other`, keeping this batch's label.
    pub fn merge(&mut self, other: Batch) {
        for doc in other.docs {
            self.insert(doc.id, doc.tokens);
        }
    }

    pub fn get(&self, id: &str) -> Option<&Document> {
        self.positions.get(id).map(|&pos| &self.docs[pos])
    }

    pub fn documents(&self) -> &[Document] {
        &self.docs
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}
