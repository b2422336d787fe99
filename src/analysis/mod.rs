//! Text analysis for query normalization.
//!
//! Splits raw user input into the word tokens that the spelling corrector
//! works on. Punctuation and whitespace never survive tokenization.

pub mod tokenizer;

pub use tokenizer::{Tokenizer, WordTokenizer};
