//! Command line argument parsing for the bkspell CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::NormalizerConfig;
use crate::error::{BkspellError, Result};
use crate::loader::DuplicatePolicy;

/// bkspell - frequency-weighted spelling correction for user queries
#[derive(Parser, Debug, Clone)]
#[command(name = "bkspell")]
#[command(about = "Frequency-weighted spelling correction over a BK-tree")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct BkspellArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl BkspellArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Correct a query, or every line of standard input
    Correct(CorrectArgs),

    /// List ranked correction candidates for a single token
    Suggest(SuggestArgs),

    /// Show vocabulary and index statistics
    Stats(StatsArgs),
}

/// Where the vocabulary comes from and how it is indexed.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Vocabulary file (CSV with Token,Frequency columns, or "token frequency" lines)
    #[arg(short = 'd', long, value_name = "VOCABULARY", env = "BKSPELL_VOCABULARY")]
    pub vocabulary: Option<PathBuf>,

    /// Maximum normalized edit distance (0.0 to 1.0) of a correction
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// JSON configuration file; flags override its values
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Merge repeated vocabulary tokens, keeping the last frequency
    #[arg(long)]
    pub keep_last_duplicates: bool,
}

impl SourceArgs {
    /// Combine the configuration file, if any, with command line overrides.
    pub fn to_config(&self) -> Result<NormalizerConfig> {
        let mut config = match &self.config {
            Some(path) => NormalizerConfig::from_file(path)?,
            None => NormalizerConfig::default(),
        };

        if let Some(vocabulary) = &self.vocabulary {
            config.vocabulary_path = vocabulary.clone();
        }
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if self.keep_last_duplicates {
            config.duplicates = DuplicatePolicy::KeepLast;
        }

        if config.vocabulary_path.as_os_str().is_empty() {
            return Err(BkspellError::invalid_argument(
                "no vocabulary given; use --vocabulary or a config file",
            ));
        }
        config.validate()?;
        Ok(config)
    }
}

/// Arguments for correcting queries
#[derive(Parser, Debug, Clone)]
pub struct CorrectArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// JSON word list whose words are masked after correction
    #[arg(long, value_name = "WORD_LIST")]
    pub profanity: Option<PathBuf>,

    /// Report the decision made for every token
    #[arg(long)]
    pub details: bool,

    /// Query string; standard input is read line by line when omitted
    #[arg(value_name = "QUERY")]
    pub query: Option<String>,
}

impl CorrectArgs {
    /// Normalizer configuration including the profanity word list.
    pub fn to_config(&self) -> Result<NormalizerConfig> {
        let mut config = self.source.to_config()?;
        if let Some(path) = &self.profanity {
            config.profanity_path = Some(path.clone());
        }
        Ok(config)
    }
}

/// Arguments for listing suggestions
#[derive(Parser, Debug, Clone)]
pub struct SuggestArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Token to look up
    #[arg(value_name = "TOKEN")]
    pub token: String,

    /// Maximum number of suggestions to show
    #[arg(short, long, default_value = "10")]
    pub limit: usize,
}

/// Arguments for showing statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_command() {
        let args = BkspellArgs::try_parse_from([
            "bkspell",
            "correct",
            "--vocabulary",
            "freq.csv",
            "--threshold",
            "0.3",
            "--details",
            "helo wrld",
        ])
        .unwrap();

        if let Command::Correct(correct_args) = args.command {
            assert_eq!(
                correct_args.source.vocabulary,
                Some(PathBuf::from("freq.csv"))
            );
            assert_eq!(correct_args.source.threshold, Some(0.3));
            assert_eq!(correct_args.query.as_deref(), Some("helo wrld"));
            assert!(correct_args.details);
        } else {
            panic!("Expected Correct command");
        }
    }

    #[test]
    fn test_suggest_command() {
        let args = BkspellArgs::try_parse_from([
            "bkspell", "suggest", "-d", "freq.txt", "serch", "--limit", "3",
        ])
        .unwrap();

        if let Command::Suggest(suggest_args) = args.command {
            assert_eq!(suggest_args.token, "serch");
            assert_eq!(suggest_args.limit, 3);
            assert_eq!(suggest_args.source.threshold, None);
        } else {
            panic!("Expected Suggest command");
        }
    }

    #[test]
    fn test_output_format_and_verbosity() {
        let args = BkspellArgs::try_parse_from([
            "bkspell", "-vv", "stats", "-d", "f.csv", "--format", "json",
        ])
        .unwrap();
        assert_eq!(args.output_format, OutputFormat::Json);
        assert_eq!(args.verbosity(), 2);

        let args = BkspellArgs::try_parse_from(["bkspell", "-q", "stats", "-d", "f.csv"]).unwrap();
        assert_eq!(args.verbosity(), 0);
        assert_eq!(args.output_format, OutputFormat::Human);
    }

    #[test]
    fn test_source_overrides() {
        let source = SourceArgs {
            vocabulary: Some(PathBuf::from("freq.csv")),
            threshold: Some(0.4),
            config: None,
            keep_last_duplicates: true,
        };
        let config = source.to_config().unwrap();
        assert_eq!(config.vocabulary_path, PathBuf::from("freq.csv"));
        assert_eq!(config.threshold, 0.4);
        assert_eq!(config.duplicates, DuplicatePolicy::KeepLast);
    }

    #[test]
    fn test_source_validation() {
        let missing = SourceArgs {
            vocabulary: None,
            threshold: None,
            config: None,
            keep_last_duplicates: false,
        };
        assert!(missing.to_config().is_err());

        let bad_threshold = SourceArgs {
            vocabulary: Some(PathBuf::from("freq.csv")),
            threshold: Some(1.5),
            config: None,
            keep_last_duplicates: false,
        };
        assert!(matches!(
            bad_threshold.to_config(),
            Err(BkspellError::Config(_))
        ));
    }
}
