//! Post-correction text filters.
//!
//! Filters take the corrector's output string and return a new string. They
//! run after spelling correction in the query normalization pipeline.

pub mod profanity;

pub use profanity::ProfanityFilter;

/// A string to string transformation applied to corrected queries.
pub trait TextFilter: Send + Sync {
    /// Apply the filter.
    fn apply(&self, text: &str) -> String;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}
