use serde::Serialize;
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::TermId;

/// Dense term ids handed out in first-seen order.
///
/// Ids only mean something inside the index they were built for; never
/// persist them or compare them across runs.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Vocabulary {
    #[serde(skip)]
    ids: HashMap<String, TermId>,
    terms: Vec<String>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get-or-insert: returns the existing id or assigns the next one.
    /// Fails once every `TermId` is taken.
    pub fn id_of(&mut self, term: &str) -> Result<TermId> {
        if let Some(&id) = self.ids.get(term) {
            return Ok(id);
        }
        let id = next_id(self.terms.len())?;
        self.ids.insert(term.to_string(), id);
        self.terms.push(term.to_string());
        Ok(id)
    }

    pub fn get(&self, term: &str) -> Option<TermId> {
        self.ids.get(term).copied()
    }

    pub fn term(&self, id: TermId) -> Option<&str> {
        self.terms.get(id as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// `(id, term)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (TermId, &str)> {
        self.terms.iter().enumerate().map(|(i, t)| (i as TermId, t.as_str()))
    }
}

fn next_id(len: usize) -> Result<TermId> {
    TermId::try_from(len).map_err(|_| Error::VocabularyFull { terms: len })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_dense_and_stable() {
        let mut v = Vocabulary::new();
        assert_eq!(v.id_of("cat"), Ok(0));
        assert_eq!(v.id_of("dog"), Ok(1));
        assert_eq!(v.id_of("cat"), Ok(0));
        assert_eq!(v.len(), 2);
        assert_eq!(v.get("dog"), Some(1));
        assert_eq!(v.get("bird"), None);
        assert_eq!(v.term(1), Some("dog"));
        assert_eq!(v.term(2), None);
        let all: Vec<_> = v.iter().collect();
        assert_eq!(all, vec![(0, "cat"), (1, "dog")]);
    }

    #[test]
    fn id_space_is_bounded() {
        assert_eq!(next_id(u32::MAX as usize), Ok(u32::MAX));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn running_out_of_ids_fails() {
        let len = u32::MAX as usize + 1;
        assert_eq!(next_id(len), Err(Error::VocabularyFull { terms: len }));
    }
}
