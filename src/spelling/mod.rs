//! Spelling correction for free-text queries.
//!
//! This module provides the quantized edit-distance metric, the BK-tree index
//! built over it, the vocabulary frequency table, and the corrector that ties
//! them together.

pub mod bk_tree;
pub mod corrector;
pub mod distance;
pub mod vocabulary;

// Re-export commonly used types
pub use bk_tree::{BkTree, Match};
pub use corrector::{
    Corrector, CorrectorConfig, CorrectorStats, DEFAULT_THRESHOLD, Suggestion, TokenCorrection,
    combined_score,
};
pub use distance::{Distance, Metric, QuantizedLevenshtein, levenshtein_distance};
pub use vocabulary::{VocabularyEntry, VocabularyStore};
