//! Output formatting for CLI commands.

use std::fmt::Write as _;
use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::cli::args::{BkspellArgs, OutputFormat};
use crate::error::Result;
use crate::spelling::corrector::{CorrectorStats, Suggestion, TokenCorrection};

/// Result structure for a corrected query.
#[derive(Debug, Serialize, Deserialize)]
pub struct CorrectionOutput {
    pub query: String,
    pub corrected: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Vec<TokenCorrection>>,
}

/// Result structure for a suggestion lookup.
#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestionOutput {
    pub token: String,
    pub known: bool,
    pub suggestions: Vec<Suggestion>,
}

/// Results that have a plain-text rendering.
pub trait HumanReadable {
    /// Render for a terminal. `verbosity` follows [`BkspellArgs::verbosity`].
    fn render(&self, verbosity: u8) -> String;
}

impl HumanReadable for CorrectionOutput {
    fn render(&self, verbosity: u8) -> String {
        let mut out = String::new();
        if verbosity > 1 {
            let _ = writeln!(out, "{} -> {}", self.query, self.corrected);
        } else {
            let _ = writeln!(out, "{}", self.corrected);
        }

        for token in self.tokens.iter().flatten() {
            let marker = if token.changed() { "*" } else { " " };
            let _ = writeln!(
                out,
                "  {marker} {} -> {} ({:.5})",
                token.original, token.corrected, token.score
            );
        }
        out
    }
}

impl HumanReadable for Vec<CorrectionOutput> {
    fn render(&self, verbosity: u8) -> String {
        self.iter().map(|output| output.render(verbosity)).collect()
    }
}

impl HumanReadable for SuggestionOutput {
    fn render(&self, verbosity: u8) -> String {
        let mut out = String::new();
        if verbosity > 0 {
            let status = if self.known { "known" } else { "unknown" };
            let _ = writeln!(out, "Suggestions for '{}' ({status}):", self.token);
        }
        if self.suggestions.is_empty() && verbosity > 0 {
            let _ = writeln!(out, "  (none within threshold)");
        }
        for (rank, suggestion) in self.suggestions.iter().enumerate() {
            let _ = writeln!(
                out,
                "{:>3}. {:<20} distance {}  frequency {:>10}  score {:.5}",
                rank + 1,
                suggestion.term,
                suggestion.distance,
                suggestion.frequency,
                suggestion.score
            );
        }
        out
    }
}

impl HumanReadable for CorrectorStats {
    fn render(&self, _verbosity: u8) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Vocabulary size:  {}", self.vocabulary_size);
        let _ = writeln!(out, "Max frequency:    {}", self.max_frequency);
        let _ = writeln!(out, "Total frequency:  {}", self.total_frequency);
        let _ = writeln!(out, "Index nodes:      {}", self.index_nodes);
        let _ = writeln!(out, "Index depth:      {}", self.index_depth);
        let _ = writeln!(out, "Threshold:        {}", self.threshold);
        out
    }
}

/// Write a result to `out` in the format selected on the command line.
pub fn write_result<W, T>(out: &mut W, result: &T, args: &BkspellArgs) -> Result<()>
where
    W: Write,
    T: Serialize + HumanReadable,
{
    match args.output_format {
        OutputFormat::Human => {
            write!(out, "{}", result.render(args.verbosity()))?;
        }
        OutputFormat::Json => {
            let json = if args.pretty {
                serde_json::to_string_pretty(result)?
            } else {
                serde_json::to_string(result)?
            };
            writeln!(out, "{json}")?;
        }
    }
    Ok(())
}

/// Write a result to standard output.
pub fn output_result<T: Serialize + HumanReadable>(result: &T, args: &BkspellArgs) -> Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    write_result(&mut handle, result, args)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::spelling::distance::Distance;

    fn args(extra: &[&str]) -> BkspellArgs {
        let mut argv = vec!["bkspell"];
        argv.extend_from_slice(extra);
        argv.extend_from_slice(&["stats", "-d", "freq.csv"]);
        BkspellArgs::try_parse_from(argv).unwrap()
    }

    fn correction() -> CorrectionOutput {
        CorrectionOutput {
            query: "helo".to_string(),
            corrected: "hello".to_string(),
            tokens: Some(vec![TokenCorrection {
                original: "helo".to_string(),
                corrected: "hello".to_string(),
                score: 0.459,
            }]),
        }
    }

    #[test]
    fn test_human_output() {
        let mut out = Vec::new();
        write_result(&mut out, &correction(), &args(&[])).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("hello\n"));
        assert!(text.contains("* helo -> hello (0.45900)"));
    }

    #[test]
    fn test_json_output() {
        let mut out = Vec::new();
        write_result(&mut out, &correction(), &args(&["--format", "json"])).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["corrected"], "hello");
        assert_eq!(value["tokens"][0]["original"], "helo");
    }

    #[test]
    fn test_suggestion_distance_serializes_as_number() {
        let output = SuggestionOutput {
            token: "serch".to_string(),
            known: false,
            suggestions: vec![Suggestion {
                term: "search".to_string(),
                distance: Distance::from_edits(1),
                frequency: 900,
                score: 0.5,
            }],
        };

        let mut out = Vec::new();
        write_result(&mut out, &output, &args(&["-f", "json"])).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["suggestions"][0]["distance"], 0.1);

        let text = output.render(1);
        assert!(text.contains("Suggestions for 'serch' (unknown):"));
        assert!(text.contains("search"));
    }
}
