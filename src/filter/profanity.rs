//! Dictionary-based profanity masking.
//!
//! # Examples
//!
//! ```
//! use bkspell::filter::{ProfanityFilter, TextFilter};
//!
//! let filter = ProfanityFilter::new(["darn"]);
//! assert_eq!(filter.apply("well darn it"), "well **** it");
//! ```

use std::fs;
use std::path::Path;

use ahash::AHashSet;
use log::debug;
use serde_json::Value;

use crate::analysis::tokenizer::WordTokenizer;
use crate::error::{BkspellError, Result};
use crate::filter::TextFilter;

/// Default character used to mask a listed word.
pub const DEFAULT_MASK: char = '*';

/// Masks listed words with a repeated mask character.
///
/// Words are compared case-insensitively against whole word tokens; a listed
/// word embedded inside a longer token is left alone. Everything that is not a
/// listed word, including punctuation and spacing, passes through unchanged.
#[derive(Debug, Clone)]
pub struct ProfanityFilter {
    words: AHashSet<String>,
    mask: char,
    tokenizer: WordTokenizer,
}

impl ProfanityFilter {
    /// Create a filter from a list of words.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ProfanityFilter {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
            mask: DEFAULT_MASK,
            tokenizer: WordTokenizer::new(),
        }
    }

    /// Use a different mask character.
    pub fn with_mask(mut self, mask: char) -> Self {
        self.mask = mask;
        self
    }

    /// Parse a JSON word list.
    ///
    /// Accepts either an array of strings or an object whose keys are the words.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        let words: Vec<String> = match value {
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(word) => Ok(word),
                    other => Err(BkspellError::invalid_argument(format!(
                        "word list entries must be strings, got {other}"
                    ))),
                })
                .collect::<Result<_>>()?,
            Value::Object(map) => map.into_iter().map(|(word, _)| word).collect(),
            other => {
                return Err(BkspellError::invalid_argument(format!(
                    "word list must be a JSON array or object, got {other}"
                )));
            }
        };
        Ok(Self::new(words))
    }

    /// Load a JSON word list from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let filter = Self::from_json(&fs::read_to_string(path)?)?;
        debug!("loaded {} filtered words from {}", filter.len(), path.display());
        Ok(filter)
    }

    /// Check if a word is listed.
    pub fn is_listed(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    /// Number of listed words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether no words are listed.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Mask every listed word in `text`.
    pub fn filter(&self, text: &str) -> String {
        if self.words.is_empty() {
            return text.to_string();
        }

        let mut output = String::with_capacity(text.len());
        let mut last_end = 0;
        for (start, token) in self.tokenizer.spans(text) {
            if !self.is_listed(token) {
                continue;
            }
            output.push_str(&text[last_end..start]);
            output.extend(std::iter::repeat_n(self.mask, token.chars().count()));
            last_end = start + token.len();
        }
        output.push_str(&text[last_end..]);
        output
    }
}

impl TextFilter for ProfanityFilter {
    fn apply(&self, text: &str) -> String {
        self.filter(text)
    }

    fn name(&self) -> &'static str {
        "profanity"
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_masks_whole_words() {
        let filter = ProfanityFilter::new(["bad", "worse"]);

        assert_eq!(filter.apply("a bad day"), "a *** day");
        assert_eq!(filter.apply("BAD, worse!"), "***, *****!");
        assert_eq!(filter.apply("badge"), "badge");
        assert_eq!(filter.apply(""), "");
    }

    #[test]
    fn test_masks_non_latin_words_by_character() {
        let filter = ProfanityFilter::new(["احمق"]).with_mask('#');
        assert_eq!(filter.apply("تو احمق هستی"), "تو #### هستی");
    }

    #[test]
    fn test_empty_filter_is_identity() {
        let filter = ProfanityFilter::new(Vec::<String>::new());
        assert!(filter.is_empty());
        assert_eq!(filter.apply("anything  goes"), "anything  goes");
    }

    #[test]
    fn test_from_json() {
        let filter = ProfanityFilter::from_json(r#"["Bad", " worse "]"#).unwrap();
        assert_eq!(filter.len(), 2);
        assert!(filter.is_listed("bad"));
        assert!(filter.is_listed("WORSE"));

        let filter = ProfanityFilter::from_json(r#"{"bad": 1, "worse": 2}"#).unwrap();
        assert_eq!(filter.len(), 2);

        assert!(ProfanityFilter::from_json("42").is_err());
        assert!(ProfanityFilter::from_json("[1, 2]").is_err());
        assert!(matches!(
            ProfanityFilter::from_json("not json"),
            Err(BkspellError::Json(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"["bad"]"#).unwrap();
        file.flush().unwrap();

        let filter = ProfanityFilter::from_file(file.path()).unwrap();
        assert_eq!(filter.apply("bad"), "***");
        assert_eq!(filter.name(), "profanity");
    }
}
