//! Tokenizers that split a raw query into correctable word tokens.
//!
//! # Examples
//!
//! ```
//! use bkspell::analysis::tokenizer::{Tokenizer, WordTokenizer};
//!
//! let tokenizer = WordTokenizer::new();
//! let tokens = tokenizer.tokenize("سلام،   دنیا!");
//! assert_eq!(tokens, vec!["سلام", "دنیا"]);
//! ```

use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::error::{BkspellError, Result};

/// Maximal runs of Unicode word characters.
static WORD_PATTERN: LazyLock<Arc<Regex>> = LazyLock::new(|| {
    Arc::new(Regex::new(r"\w+").expect("Default word pattern should be valid"))
});

/// Trait for tokenizers that convert text into word tokens.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text, borrowing each token from the input.
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// A regex tokenizer that keeps every match of its pattern and drops the gaps.
///
/// The default pattern `\w+` is Unicode-aware, so Arabic-script, Cyrillic and
/// CJK text tokenize the same way Latin text does. Punctuation and runs of
/// whitespace between tokens are discarded.
#[derive(Clone, Debug)]
pub struct WordTokenizer {
    pattern: Arc<Regex>,
}

impl WordTokenizer {
    /// Create a tokenizer that matches maximal runs of word characters.
    pub fn new() -> Self {
        WordTokenizer {
            pattern: Arc::clone(&WORD_PATTERN),
        }
    }

    /// Create a tokenizer with a custom token pattern.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| BkspellError::invalid_argument(format!("Invalid regex pattern: {e}")))?;

        Ok(WordTokenizer {
            pattern: Arc::new(regex),
        })
    }

    /// Tokens paired with their byte offset in `text`.
    pub fn spans<'a>(&self, text: &'a str) -> impl Iterator<Item = (usize, &'a str)> {
        self.pattern
            .find_iter(text)
            .filter(|mat| !mat.is_empty())
            .map(|mat| (mat.start(), mat.as_str()))
    }

    /// Get the regex pattern used by this tokenizer.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Default for WordTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for WordTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.spans(text).map(|(_, token)| token).collect()
    }

    fn name(&self) -> &'static str {
        "word"
    }
}
