//! # bkspell
//!
//! Frequency-weighted spelling correction for free-text queries.
//!
//! ## Features
//!
//! - BK-tree index over a capped, quantized Levenshtein distance
//! - Candidate ranking that blends similarity with observed usage frequency
//! - Unicode-aware tokenization, suitable for non-Latin scripts
//! - Vocabulary loading from CSV or plain frequency lists
//! - Profanity masking and a query normalization pipeline
//!
//! ```
//! use bkspell::{Corrector, VocabularyEntry};
//!
//! let vocabulary = vec![VocabularyEntry::new("سلام", 100), VocabularyEntry::new("صلام", 5)];
//! let corrector = Corrector::new(vocabulary, 0.2).unwrap();
//! assert_eq!(corrector.correct("صلام!"), "سلام");
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod pipeline;
pub mod spelling;

pub use error::{BkspellError, Result};
pub use spelling::{Corrector, CorrectorConfig, VocabularyEntry};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
