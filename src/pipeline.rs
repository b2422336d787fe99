//! Query normalization: spelling correction followed by text filters.
//!
//! This is the pre-processing stage in front of a conversational answering
//! pipeline. The normalized string is handed downstream as the user's latest
//! utterance.

use std::sync::Arc;

use log::info;
use rayon::prelude::*;

use crate::config::NormalizerConfig;
use crate::error::Result;
use crate::filter::TextFilter;
use crate::filter::profanity::ProfanityFilter;
use crate::loader::VocabularyLoader;
use crate::spelling::corrector::Corrector;

/// Corrects a raw query, then runs it through each filter in order.
pub struct QueryNormalizer {
    corrector: Arc<Corrector>,
    filters: Vec<Box<dyn TextFilter>>,
}

impl QueryNormalizer {
    /// Create a normalizer with no filters.
    pub fn new(corrector: Arc<Corrector>) -> Self {
        QueryNormalizer {
            corrector,
            filters: Vec::new(),
        }
    }

    /// Append a filter.
    pub fn with_filter<F: TextFilter + 'static>(mut self, filter: F) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Build a normalizer from a configuration, loading every file it names.
    pub fn from_config(config: &NormalizerConfig) -> Result<Self> {
        config.validate()?;

        let entries = VocabularyLoader::new()
            .with_duplicates(config.duplicates)
            .load_path(&config.vocabulary_path)?;
        let corrector = Corrector::with_config(entries, config.corrector())?;
        let mut normalizer = QueryNormalizer::new(Arc::new(corrector));

        if let Some(path) = &config.profanity_path {
            let filter = ProfanityFilter::from_file(path)?.with_mask(config.mask);
            normalizer = normalizer.with_filter(filter);
        }

        info!(
            "query normalizer ready with {} vocabulary tokens and filters [{}]",
            normalizer.corrector.vocabulary().len(),
            normalizer.filter_names().join(", ")
        );
        Ok(normalizer)
    }

    /// Correct and filter a query.
    pub fn normalize(&self, query: &str) -> String {
        let corrected = self.corrector.correct(query);
        self.filters
            .iter()
            .fold(corrected, |text, filter| filter.apply(&text))
    }

    /// Normalize many queries in parallel.
    pub fn normalize_batch<S>(&self, queries: &[S]) -> Vec<String>
    where
        S: AsRef<str> + Sync,
    {
        queries
            .par_iter()
            .map(|query| self.normalize(query.as_ref()))
            .collect()
    }

    /// The underlying corrector.
    pub fn corrector(&self) -> &Arc<Corrector> {
        &self.corrector
    }

    /// Names of the configured filters, in application order.
    pub fn filter_names(&self) -> Vec<&'static str> {
        self.filters.iter().map(|f| f.name()).collect()
    }
}
