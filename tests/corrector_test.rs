//! Integration tests for the spelling corrector's observable behavior.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use bkspell::spelling::{BkTree, Distance, Metric, QuantizedLevenshtein};
use bkspell::{BkspellError, Corrector, Result, VocabularyEntry};

fn vocab(pairs: &[(&str, u64)]) -> Vec<VocabularyEntry> {
    pairs.iter().map(|&(t, f)| VocabularyEntry::new(t, f)).collect()
}

fn persian() -> Vec<VocabularyEntry> {
    vocab(&[
        ("سلام", 100),
        ("صلام", 5),
        ("کتاب", 80),
        ("کتابخانه", 30),
        ("دوست", 60),
        ("دست", 40),
        ("خوب", 90),
        ("خواب", 20),
    ])
}

#[test]
fn test_frequency_weighted_correction() -> Result<()> {
    let corrector = Corrector::new(vocab(&[("سلام", 100), ("صلام", 5)]), 0.2)?;

    assert_eq!(corrector.correct("صلام"), "سلام");
    Ok(())
}

#[test]
fn test_sentence_normalization() -> Result<()> {
    let corrector = Corrector::new(persian(), 0.2)?;

    // Punctuation is dropped and spacing collapses to single spaces
    assert_eq!(corrector.correct("  صلام،   دوست  خوب!  "), "سلام دوست خوب");
    assert_eq!(corrector.correct(""), "");
    assert_eq!(corrector.correct("a   b"), "a b");
    Ok(())
}

#[test]
fn test_out_of_threshold_tokens_are_unchanged() -> Result<()> {
    let corrector = Corrector::new(persian(), 0.1)?;

    // "دوستان" is two edits from "دوست" and three from "دست"
    assert_eq!(corrector.correct("دوستان"), "دوستان");
    assert_eq!(corrector.correct("کتابخ"), "کتاب");
    assert_eq!(corrector.correct("unrelated"), "unrelated");
    Ok(())
}

#[test]
fn test_threshold_zero_never_replaces_tokens() -> Result<()> {
    let corrector = Corrector::new(persian(), 0.0)?;

    for query in ["صلام دوست", "دست خواب", "کتابخ  سلامم", "xyz"] {
        let expected: Vec<&str> = query.split_whitespace().collect();
        assert_eq!(corrector.correct(query), expected.join(" "));
    }
    Ok(())
}

#[test]
fn test_repeated_calls_are_identical() -> Result<()> {
    let corrector = Corrector::new(persian(), 0.3)?;

    let first = corrector.correct("صلام دوصت کتب خاب");
    for _ in 0..20 {
        assert_eq!(corrector.correct("صلام دوصت کتب خاب"), first);
    }
    Ok(())
}

#[test]
fn test_concurrent_reads() -> Result<()> {
    let corrector = Arc::new(Corrector::new(persian(), 0.2)?);
    let expected = corrector.correct("صلام دوصت");

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let corrector = Arc::clone(&corrector);
            thread::spawn(move || corrector.correct("صلام دوصت"))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
    Ok(())
}

#[test]
fn test_construction_errors() {
    let empty = Corrector::new(Vec::<VocabularyEntry>::new(), 0.2);
    assert!(matches!(empty, Err(BkspellError::Config(_))));

    let out_of_range = Corrector::new(persian(), 1.5);
    assert!(matches!(out_of_range, Err(BkspellError::Config(_))));

    let duplicates = Corrector::new(vocab(&[("دست", 1), ("دست", 2)]), 0.2);
    assert!(matches!(duplicates, Err(BkspellError::Config(_))));
}

#[test]
fn test_suggestions_are_ranked() -> Result<()> {
    let corrector = Corrector::new(persian(), 0.2)?;
    let suggestions = corrector.suggest("دوست");

    let terms: Vec<&str> = suggestions.iter().map(|s| s.term.as_str()).collect();
    assert_eq!(terms, vec!["دوست", "دست"]);
    assert!(suggestions[0].score > suggestions[1].score);
    assert_eq!(suggestions[1].distance, Distance::from_edits(1));
    assert_eq!(suggestions[1].frequency, 40);
    Ok(())
}

#[test]
fn test_index_agrees_with_linear_scan_for_short_tokens() {
    let words: Vec<String> = (0..400)
        .map(|i| {
            let letters = ['a', 'b', 'c', 'd', 'e'];
            (0..(3 + i % 4))
                .map(|j| letters[(i * 7 + j * 3 + i / 5) % letters.len()])
                .collect()
        })
        .collect::<HashSet<String>>()
        .into_iter()
        .collect();

    let tree = BkTree::build(QuantizedLevenshtein, words.iter().cloned());
    let metric = QuantizedLevenshtein;

    for query in ["abc", "eeee", "dacb", "bbbbbb", "a"] {
        let max = Distance::from_edits(2);
        let found: HashSet<&str> = tree.query(query, max).into_iter().map(|m| m.term).collect();
        let expected: HashSet<&str> = words
            .iter()
            .map(String::as_str)
            .filter(|w| metric.distance(query, w) <= max)
            .collect();
        assert_eq!(found, expected, "query {query}");
    }
}
