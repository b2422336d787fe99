//! Command implementations for the bkspell CLI.

use std::io::{self, BufRead};
use std::time::Instant;

use log::info;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::Result;
use crate::loader::VocabularyLoader;
use crate::pipeline::QueryNormalizer;
use crate::spelling::corrector::Corrector;

/// Execute a CLI command.
pub fn execute_command(args: BkspellArgs) -> Result<()> {
    match &args.command {
        Command::Correct(correct_args) => correct(correct_args, &args),
        Command::Suggest(suggest_args) => suggest(suggest_args, &args),
        Command::Stats(stats_args) => show_stats(stats_args, &args),
    }
}

/// Build a bare corrector from the vocabulary options.
fn build_corrector(source: &SourceArgs) -> Result<Corrector> {
    let config = source.to_config()?;
    let start_time = Instant::now();

    let entries = VocabularyLoader::new()
        .with_duplicates(config.duplicates)
        .load_path(&config.vocabulary_path)?;
    let corrector = Corrector::with_config(entries, config.corrector())?;

    info!(
        "indexed {} tokens in {} ms",
        corrector.vocabulary().len(),
        start_time.elapsed().as_millis()
    );
    Ok(corrector)
}

/// Correct a single query or every line of standard input.
fn correct(args: &CorrectArgs, cli_args: &BkspellArgs) -> Result<()> {
    let normalizer = QueryNormalizer::from_config(&args.to_config()?)?;

    let queries: Vec<String> = match &args.query {
        Some(query) => vec![query.clone()],
        None => io::stdin().lock().lines().collect::<io::Result<_>>()?,
    };

    let start_time = Instant::now();
    let corrected = normalizer.normalize_batch(&queries);
    info!(
        "corrected {} queries in {} ms",
        queries.len(),
        start_time.elapsed().as_millis()
    );

    let outputs: Vec<CorrectionOutput> = queries
        .into_iter()
        .zip(corrected)
        .map(|(query, corrected)| {
            let tokens = args
                .details
                .then(|| normalizer.corrector().correct_tokens(&query));
            CorrectionOutput {
                query,
                corrected,
                tokens,
            }
        })
        .collect();

    match outputs.as_slice() {
        [single] if args.query.is_some() => output_result(single, cli_args),
        _ => output_result(&outputs, cli_args),
    }
}

/// Show ranked candidates for one token.
fn suggest(args: &SuggestArgs, cli_args: &BkspellArgs) -> Result<()> {
    let corrector = build_corrector(&args.source)?;

    let mut suggestions = corrector.suggest(&args.token);
    suggestions.truncate(args.limit);

    output_result(
        &SuggestionOutput {
            token: args.token.clone(),
            known: corrector.is_known(&args.token),
            suggestions,
        },
        cli_args,
    )
}

/// Show vocabulary and index statistics.
fn show_stats(args: &StatsArgs, cli_args: &BkspellArgs) -> Result<()> {
    let corrector = build_corrector(&args.source)?;
    output_result(&corrector.stats(), cli_args)
}
