//! Frequency-weighted spelling corrector.
//!
//! Each query token is looked up in a BK-tree over the vocabulary. Every
//! candidate within the distance threshold is ranked by a combined score that
//! mixes similarity with relative usage frequency:
//!
//! ```text
//! score = ((1 - distance) + frequency / max_frequency / 4) / 2
//! ```
//!
//! The token is replaced by the candidate with the strictly highest score, or
//! kept verbatim when no candidate scores above zero.

use std::cmp::Ordering;

use log::{debug, trace};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::{Tokenizer, WordTokenizer};
use crate::error::{BkspellError, Result};
use crate::spelling::bk_tree::BkTree;
use crate::spelling::distance::{Distance, QuantizedLevenshtein, threshold_radius};
use crate::spelling::vocabulary::{VocabularyEntry, VocabularyStore};

/// Threshold used by the query pre-processing stage when none is configured.
pub const DEFAULT_THRESHOLD: f64 = 0.2;

/// Configuration for the spelling corrector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrectorConfig {
    /// Maximum normalized distance (0.0 to 1.0) of a correction candidate.
    pub threshold: f64,
}

impl Default for CorrectorConfig {
    fn default() -> Self {
        CorrectorConfig {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl CorrectorConfig {
    /// Create a configuration with the given threshold.
    pub fn new(threshold: f64) -> Self {
        CorrectorConfig { threshold }
    }

    /// Reject thresholds outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(BkspellError::config(format!(
                "threshold must be within [0, 1], got {}",
                self.threshold
            )));
        }
        Ok(())
    }
}

/// Ranking value for a candidate at `distance` with the given frequency score.
pub fn combined_score(distance: Distance, frequency_score: f64) -> f64 {
    ((1.0 - distance.value()) + frequency_score / 4.0) / 2.0
}

/// A ranked correction candidate for a single token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Vocabulary token.
    pub term: String,
    /// Quantized distance from the queried token.
    pub distance: Distance,
    /// Observed frequency of `term`.
    pub frequency: u64,
    /// Combined score.
    pub score: f64,
}

/// The outcome of correcting one token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenCorrection {
    /// Token as it appeared in the query.
    pub original: String,
    /// Chosen replacement, or the original token.
    pub corrected: String,
    /// Score of the chosen replacement; 0.0 when the original was kept.
    pub score: f64,
}

impl TokenCorrection {
    /// Whether the token was replaced by a different one.
    pub fn changed(&self) -> bool {
        self.original != self.corrected
    }
}

/// Statistics about a corrector's vocabulary and index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectorStats {
    /// Number of vocabulary tokens.
    pub vocabulary_size: usize,
    /// Largest token frequency.
    pub max_frequency: u64,
    /// Sum of all token frequencies.
    pub total_frequency: u64,
    /// Nodes in the BK-tree.
    pub index_nodes: usize,
    /// Longest root-to-leaf path in the BK-tree.
    pub index_depth: usize,
    /// Configured threshold.
    pub threshold: f64,
}

/// Spelling corrector over an immutable vocabulary.
///
/// The vocabulary and index are built once in the constructor and only read
/// afterwards, so a corrector can be shared between threads freely.
#[derive(Debug)]
pub struct Corrector {
    tokenizer: WordTokenizer,
    vocabulary: VocabularyStore,
    index: BkTree<QuantizedLevenshtein>,
    config: CorrectorConfig,
    max_distance: Distance,
}

impl Corrector {
    /// Build a corrector from a non-empty, duplicate-free vocabulary.
    ///
    /// Fails with [`BkspellError::Config`] if the vocabulary is empty or has
    /// duplicate tokens, or if `threshold` is outside `[0, 1]`.
    pub fn new<I, E>(vocabulary: I, threshold: f64) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<VocabularyEntry>,
    {
        Self::with_config(vocabulary, CorrectorConfig::new(threshold))
    }

    /// Build a corrector with an explicit configuration.
    pub fn with_config<I, E>(vocabulary: I, config: CorrectorConfig) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<VocabularyEntry>,
    {
        config.validate()?;
        let vocabulary = VocabularyStore::new(vocabulary)?;
        let index = BkTree::build(QuantizedLevenshtein, vocabulary.tokens());
        let max_distance = Distance::from_bucket(threshold_radius(config.threshold))
            .unwrap_or(Distance::MAX);

        debug!(
            "corrector ready: {} tokens, max frequency {}, threshold {}",
            vocabulary.len(),
            vocabulary.max_frequency(),
            config.threshold
        );

        Ok(Corrector {
            tokenizer: WordTokenizer::new(),
            vocabulary,
            index,
            config,
            max_distance,
        })
    }

    /// Correct every token of a query and join the results with single spaces.
    ///
    /// Punctuation and the original spacing are not preserved.
    pub fn correct(&self, query: &str) -> String {
        self.tokenizer
            .tokenize(query)
            .into_iter()
            .map(|token| self.best_candidate(token).0)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Correct a query and report the decision made for each token.
    pub fn correct_tokens(&self, query: &str) -> Vec<TokenCorrection> {
        self.tokenizer
            .tokenize(query)
            .into_iter()
            .map(|token| {
                let (corrected, score) = self.best_candidate(token);
                TokenCorrection {
                    original: token.to_string(),
                    corrected: corrected.to_string(),
                    score,
                }
            })
            .collect()
    }

    /// Correct many queries in parallel.
    pub fn correct_batch<S>(&self, queries: &[S]) -> Vec<String>
    where
        S: AsRef<str> + Sync,
    {
        queries
            .par_iter()
            .map(|query| self.correct(query.as_ref()))
            .collect()
    }

    /// Correct a single token.
    pub fn correct_token<'a>(&'a self, token: &'a str) -> &'a str {
        self.best_candidate(token).0
    }

    /// All candidates within the threshold, best first.
    ///
    /// Candidates with equal scores keep the order the index visits them in:
    /// among siblings, the most recently inserted vocabulary token comes first.
    pub fn suggest(&self, token: &str) -> Vec<Suggestion> {
        let mut suggestions: Vec<Suggestion> = self
            .index
            .query(token, self.max_distance)
            .into_iter()
            .map(|candidate| Suggestion {
                term: candidate.term.to_string(),
                distance: candidate.distance,
                frequency: self.vocabulary.frequency_of(candidate.term),
                score: combined_score(
                    candidate.distance,
                    self.vocabulary.frequency_score(candidate.term),
                ),
            })
            .collect();

        suggestions.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        suggestions
    }

    /// Pick the highest scoring candidate for a token.
    ///
    /// Starts from the token itself with a score of zero; only a strictly
    /// greater score replaces the current best, so the first of several equal
    /// candidates wins.
    fn best_candidate<'a>(&'a self, token: &'a str) -> (&'a str, f64) {
        let mut best = token;
        let mut best_score = 0.0;

        for candidate in self.index.query(token, self.max_distance) {
            let score = combined_score(
                candidate.distance,
                self.vocabulary.frequency_score(candidate.term),
            );
            if score > best_score {
                best_score = score;
                best = candidate.term;
            }
        }

        trace!("{token} -> {best} ({best_score:.5})");
        (best, best_score)
    }

    /// Check if a token is in the vocabulary.
    pub fn is_known(&self, token: &str) -> bool {
        self.vocabulary.contains(token)
    }

    /// The configured threshold.
    pub fn threshold(&self) -> f64 {
        self.config.threshold
    }

    /// The corrector configuration.
    pub fn config(&self) -> &CorrectorConfig {
        &self.config
    }

    /// The vocabulary used for scoring.
    pub fn vocabulary(&self) -> &VocabularyStore {
        &self.vocabulary
    }

    /// The index used for candidate lookup.
    pub fn index(&self) -> &BkTree<QuantizedLevenshtein> {
        &self.index
    }

    /// Get statistics about the corrector.
    pub fn stats(&self) -> CorrectorStats {
        CorrectorStats {
            vocabulary_size: self.vocabulary.len(),
            max_frequency: self.vocabulary.max_frequency(),
            total_frequency: self.vocabulary.total_frequency(),
            index_nodes: self.index.len(),
            index_depth: self.index.depth(),
            threshold: self.config.threshold,
        }
    }
}
