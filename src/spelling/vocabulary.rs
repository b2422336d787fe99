//! Token frequency table used to score correction candidates.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{BkspellError, Result};

/// A vocabulary token and its observed usage count.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub token: String,
    pub frequency: u64,
}

impl VocabularyEntry {
    /// Create a new vocabulary entry.
    pub fn new<S: Into<String>>(token: S, frequency: u64) -> Self {
        VocabularyEntry {
            token: token.into(),
            frequency,
        }
    }
}

impl<S: Into<String>> From<(S, u64)> for VocabularyEntry {
    fn from((token, frequency): (S, u64)) -> Self {
        VocabularyEntry::new(token, frequency)
    }
}

/// An immutable token to frequency mapping with a precomputed maximum.
///
/// Entries keep the order of the source collection.
#[derive(Debug, Clone)]
pub struct VocabularyStore {
    entries: Vec<VocabularyEntry>,
    positions: AHashMap<String, usize>,
    max_frequency: u64,
}

impl VocabularyStore {
    /// Build a store from a non-empty collection of unique tokens.
    pub fn new<I, E>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<VocabularyEntry>,
    {
        let entries: Vec<VocabularyEntry> = entries.into_iter().map(Into::into).collect();
        if entries.is_empty() {
            return Err(BkspellError::config("vocabulary must not be empty"));
        }

        let mut positions = AHashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            if positions.insert(entry.token.clone(), position).is_some() {
                return Err(BkspellError::config(format!(
                    "duplicate vocabulary token '{}'",
                    entry.token
                )));
            }
        }

        let max_frequency = entries.iter().map(|e| e.frequency).max().unwrap_or(0);

        Ok(VocabularyStore {
            entries,
            positions,
            max_frequency,
        })
    }

    /// Frequency of a token, or 0 if it is not in the vocabulary.
    pub fn frequency_of(&self, token: &str) -> u64 {
        self.positions
            .get(token)
            .map(|&position| self.entries[position].frequency)
            .unwrap_or(0)
    }

    /// Largest frequency in the vocabulary.
    pub fn max_frequency(&self) -> u64 {
        self.max_frequency
    }

    /// Token frequency divided by the maximum frequency.
    ///
    /// A vocabulary whose frequencies are all zero gives every token a score of 0.
    pub fn frequency_score(&self, token: &str) -> f64 {
        if self.max_frequency == 0 {
            return 0.0;
        }
        self.frequency_of(token) as f64 / self.max_frequency as f64
    }

    /// Check if a token exists in the vocabulary.
    pub fn contains(&self, token: &str) -> bool {
        self.positions.contains_key(token)
    }

    /// Get the number of tokens.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; construction rejects empty vocabularies.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in source order.
    pub fn entries(&self) -> &[VocabularyEntry] {
        &self.entries
    }

    /// Tokens in source order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.token.as_str())
    }

    /// Sum of all frequencies.
    pub fn total_frequency(&self) -> u64 {
        self.entries.iter().map(|e| e.frequency).sum()
    }
}
