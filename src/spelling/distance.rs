//! Quantized edit distance used to key the BK-tree.
//!
//! Raw Levenshtein distance is capped at [`MAX_EDIT_DISTANCE`] and divided by
//! it, so every pair of tokens lands in one of [`BUCKET_COUNT`] discrete
//! buckets `0.0, 0.1, ..., 1.0`. The cap makes the metric lossy: all pairs ten
//! or more edits apart share the bucket `1.0`.

use std::cmp::min;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Raw edit distances at or above this value collapse to the maximum bucket.
pub const MAX_EDIT_DISTANCE: usize = 10;

/// Number of discrete distance buckets.
pub const BUCKET_COUNT: usize = MAX_EDIT_DISTANCE + 1;

/// A quantized distance in `[0.0, 1.0]`, stored as its bucket index `0..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "f64", try_from = "f64")]
pub struct Distance(u8);

impl Distance {
    /// Identical tokens.
    pub const ZERO: Distance = Distance(0);
    /// Tokens ten or more edits apart.
    pub const MAX: Distance = Distance(MAX_EDIT_DISTANCE as u8);

    /// Quantize a raw edit distance.
    pub fn from_edits(edits: usize) -> Self {
        Distance(min(edits, MAX_EDIT_DISTANCE) as u8)
    }

    /// Build a distance from its bucket index, if it is in range.
    pub fn from_bucket(bucket: usize) -> Option<Self> {
        (bucket < BUCKET_COUNT).then_some(Distance(bucket as u8))
    }

    /// Bucket index in `0..BUCKET_COUNT`.
    pub fn bucket(self) -> usize {
        self.0 as usize
    }

    /// Normalized value in `[0.0, 1.0]`.
    pub fn value(self) -> f64 {
        self.0 as f64 / MAX_EDIT_DISTANCE as f64
    }
}

impl From<Distance> for f64 {
    fn from(distance: Distance) -> f64 {
        distance.value()
    }
}

impl TryFrom<f64> for Distance {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !(0.0..=1.0).contains(&value) {
            return Err(format!("distance {value} is outside [0, 1]"));
        }
        Ok(Distance((value * MAX_EDIT_DISTANCE as f64).round() as u8))
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.value())
    }
}

/// Number of buckets a normalized threshold spans.
///
/// A candidate bucket `b` satisfies `b / 10 <= threshold` exactly when
/// `b <= threshold_radius(threshold)`. The small epsilon absorbs binary
/// representation error, e.g. `0.3 * 10.0 == 2.9999999999999996`.
pub fn threshold_radius(threshold: f64) -> usize {
    let scaled = threshold * MAX_EDIT_DISTANCE as f64 + 1e-9;
    min(scaled.floor().max(0.0) as usize, MAX_EDIT_DISTANCE)
}

/// A distance function over tokens with exactly [`BUCKET_COUNT`] outcomes.
///
/// The same metric instance must be used to build and to query an index.
pub trait Metric: Send + Sync {
    /// Distance between two tokens. Must be symmetric and zero only for equal tokens.
    fn distance(&self, a: &str, b: &str) -> Distance;
}

/// Levenshtein distance capped at ten edits and scaled to `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuantizedLevenshtein;

impl Metric for QuantizedLevenshtein {
    fn distance(&self, a: &str, b: &str) -> Distance {
        Distance::from_edits(levenshtein_distance_capped(a, b, MAX_EDIT_DISTANCE))
    }
}

/// Levenshtein distance over Unicode scalar values with unit costs.
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    levenshtein_distance_capped(s1, s2, usize::MAX)
}

/// Levenshtein distance that stops early once the result is known to reach `cap`.
///
/// Returns the exact distance when it is below `cap`, and `cap` otherwise.
#[allow(clippy::needless_range_loop)]
pub fn levenshtein_distance_capped(s1: &str, s2: &str, cap: usize) -> usize {
    if s1 == s2 {
        return 0;
    }

    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();
    let len1 = s1_chars.len();
    let len2 = s2_chars.len();

    if len1.abs_diff(len2) >= cap {
        return cap;
    }
    if len1 == 0 {
        return len2;
    }
    if len2 == 0 {
        return len1;
    }

    // Use only two rows for space optimization
    let mut prev_row: Vec<usize> = (0..=len2).collect();
    let mut curr_row = vec![0; len2 + 1];

    for i in 1..=len1 {
        curr_row[0] = i;
        let mut min_in_row = i;

        for j in 1..=len2 {
            let cost = if s1_chars[i - 1] == s2_chars[j - 1] {
                0
            } else {
                1
            };

            curr_row[j] = min(
                min(
                    prev_row[j] + 1,     // deletion
                    curr_row[j - 1] + 1, // insertion
                ),
                prev_row[j - 1] + cost, // substitution
            );

            min_in_row = min(min_in_row, curr_row[j]);
        }

        // Row minimums never decrease, so the final distance is at least this
        if min_in_row >= cap {
            return cap;
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    min(prev_row[len2], cap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("", "a"), 1);
        assert_eq!(levenshtein_distance("a", ""), 1);
        assert_eq!(levenshtein_distance("a", "a"), 0);
        assert_eq!(levenshtein_distance("ab", "ac"), 1);
        assert_eq!(levenshtein_distance("abc", "def"), 3);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("search", "serach"), 2); // transposition
    }

    #[test]
    fn test_levenshtein_counts_characters_not_bytes() {
        // One substitution between two-byte Arabic-script letters
        assert_eq!(levenshtein_distance("صلام", "سلام"), 1);
        assert_eq!(levenshtein_distance("کتاب", "کتابها"), 2);
    }

    #[test]
    fn test_levenshtein_distance_capped() {
        assert_eq!(levenshtein_distance_capped("kitten", "sitting", 10), 3);
        assert_eq!(levenshtein_distance_capped("kitten", "sitting", 3), 3);
        assert_eq!(levenshtein_distance_capped("kitten", "sitting", 2), 2);
        assert_eq!(levenshtein_distance_capped("a", "abcdefghijklmn", 10), 10);
        assert_eq!(
            levenshtein_distance_capped("abcdefghijkl", "mnopqrstuvwx", 10),
            10
        );
    }

    #[test]
    fn test_quantized_metric() {
        let metric = QuantizedLevenshtein;

        assert_eq!(metric.distance("hello", "hello"), Distance::ZERO);
        assert_eq!(metric.distance("hello", "helo").value(), 0.1);
        assert_eq!(metric.distance("kitten", "sitting").bucket(), 3);
        assert_eq!(metric.distance("a", "bcdefghijklmnop"), Distance::MAX);
        assert_eq!(metric.distance("", "abcdefghij"), Distance::MAX);
        assert_eq!(metric.distance("", "abcdefghi").bucket(), 9);
    }

    #[test]
    fn test_quantized_metric_is_symmetric() {
        let metric = QuantizedLevenshtein;
        let words = ["search", "serach", "", "سلام", "صلام", "abcdefghijklmnop"];

        for a in words {
            for b in words {
                assert_eq!(metric.distance(a, b), metric.distance(b, a));
            }
        }
    }

    #[test]
    fn test_threshold_radius() {
        assert_eq!(threshold_radius(0.0), 0);
        assert_eq!(threshold_radius(0.2), 2);
        assert_eq!(threshold_radius(0.25), 2);
        assert_eq!(threshold_radius(0.3), 3);
        assert_eq!(threshold_radius(0.7), 7);
        assert_eq!(threshold_radius(1.0), 10);
    }

    #[test]
    fn test_distance_conversions() {
        assert_eq!(Distance::from_edits(14), Distance::MAX);
        assert_eq!(Distance::from_bucket(11), None);
        assert_eq!(Distance::from_bucket(4).map(Distance::value), Some(0.4));
        assert_eq!(Distance::try_from(0.3), Ok(Distance::from_edits(3)));
        assert!(Distance::try_from(1.5).is_err());
        assert_eq!(Distance::from_edits(2).to_string(), "0.2");
    }
}
