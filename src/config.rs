//! Configuration for the query normalization pipeline.
//!
//! Configuration is always passed explicitly; nothing is read from the
//! process environment.
//!
//! ```json
//! {
//!   "vocabulary_path": "data/frequency.csv",
//!   "threshold": 0.2,
//!   "profanity_path": "data/swear_words.json",
//!   "mask": "*",
//!   "duplicates": "reject"
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::filter::profanity::DEFAULT_MASK;
use crate::loader::DuplicatePolicy;
use crate::spelling::corrector::{CorrectorConfig, DEFAULT_THRESHOLD};

/// File-based configuration for a [`QueryNormalizer`](crate::pipeline::QueryNormalizer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Vocabulary frequency table (CSV or text).
    pub vocabulary_path: PathBuf,
    /// Maximum normalized distance of a correction candidate.
    pub threshold: f64,
    /// Optional JSON word list for the profanity filter.
    pub profanity_path: Option<PathBuf>,
    /// Character used to mask filtered words.
    pub mask: char,
    /// Handling of repeated tokens in the vocabulary file.
    pub duplicates: DuplicatePolicy,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        NormalizerConfig {
            vocabulary_path: PathBuf::new(),
            threshold: DEFAULT_THRESHOLD,
            profanity_path: None,
            mask: DEFAULT_MASK,
            duplicates: DuplicatePolicy::Reject,
        }
    }
}

impl NormalizerConfig {
    /// Create a configuration for the given vocabulary file.
    pub fn new<P: Into<PathBuf>>(vocabulary_path: P) -> Self {
        NormalizerConfig {
            vocabulary_path: vocabulary_path.into(),
            ..Default::default()
        }
    }

    /// Load a JSON configuration file.
    ///
    /// Relative paths inside the file are resolved against the file's directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut config: NormalizerConfig = serde_json::from_str(&fs::read_to_string(path)?)?;

        if let Some(base) = path.parent() {
            config.vocabulary_path = resolve(base, &config.vocabulary_path);
            config.profanity_path = config.profanity_path.map(|p| resolve(base, &p));
        }
        Ok(config)
    }

    /// The corrector part of this configuration.
    pub fn corrector(&self) -> CorrectorConfig {
        CorrectorConfig::new(self.threshold)
    }

    /// Check values that can be checked without touching the filesystem.
    pub fn validate(&self) -> Result<()> {
        self.corrector().validate()
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_relative() && !path.as_os_str().is_empty() {
        base.join(path)
    } else {
        path.to_path_buf()
    }
}
