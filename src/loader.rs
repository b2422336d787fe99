//! Loading vocabulary frequency tables from disk.
//!
//! Two formats are understood:
//!
//! - CSV with a header row containing `Token` and `Frequency` columns
//!   (matched case-insensitively, other columns ignored):
//!   ```csv
//!   Token,Frequency
//!   سلام,100
//!   کتاب,42
//!   ```
//! - Plain text with one `token frequency` pair per line. Blank lines and
//!   lines starting with `#` are skipped.
//!
//! Entries are returned in file order.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use ahash::AHashMap;
use csv::{ReaderBuilder, StringRecord};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{BkspellError, Result};
use crate::spelling::vocabulary::VocabularyEntry;

/// What to do when the same token appears on more than one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Keep every row, so building a corrector from the result fails.
    #[default]
    Reject,
    /// Keep the first position and the last row's frequency.
    KeepLast,
}

/// On-disk layout of a vocabulary file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VocabularyFormat {
    /// Delimited file with a header row.
    Csv,
    /// Whitespace separated `token frequency` lines.
    Text,
}

impl VocabularyFormat {
    /// Guess the format from a file extension; anything but `.csv` is text.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => VocabularyFormat::Csv,
            _ => VocabularyFormat::Text,
        }
    }
}

/// Reads `(token, frequency)` tables.
#[derive(Debug, Clone)]
pub struct VocabularyLoader {
    format: Option<VocabularyFormat>,
    duplicates: DuplicatePolicy,
    delimiter: u8,
}

impl Default for VocabularyLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl VocabularyLoader {
    /// Create a loader that detects the format from the file extension.
    pub fn new() -> Self {
        VocabularyLoader {
            format: None,
            duplicates: DuplicatePolicy::Reject,
            delimiter: b',',
        }
    }

    /// Force a specific format.
    pub fn with_format(mut self, format: VocabularyFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Set the duplicate handling policy.
    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }

    /// Set the CSV delimiter character. It must be a single ASCII character.
    pub fn with_delimiter(mut self, delimiter: char) -> Result<Self> {
        if !delimiter.is_ascii() {
            return Err(BkspellError::invalid_argument(format!(
                "CSV delimiter must be an ASCII character, got {delimiter:?}"
            )));
        }
        self.delimiter = delimiter as u8;
        Ok(self)
    }

    /// Load a vocabulary file.
    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<VocabularyEntry>> {
        let path = path.as_ref();
        let format = self
            .format
            .unwrap_or_else(|| VocabularyFormat::from_path(path));
        let file = File::open(path)?;

        let entries = match format {
            VocabularyFormat::Csv => self.load_csv(file)?,
            VocabularyFormat::Text => self.load_text(BufReader::new(file))?,
        };

        debug!(
            "loaded {} vocabulary entries from {}",
            entries.len(),
            path.display()
        );
        Ok(entries)
    }

    /// Parse a CSV table with `Token` and `Frequency` columns.
    pub fn load_csv<R: Read>(&self, reader: R) -> Result<Vec<VocabularyEntry>> {
        let mut csv_reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let token_column = find_column(&headers, "token")?;
        let frequency_column = find_column(&headers, "frequency")?;

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            let token = record.get(token_column).unwrap_or("");
            let frequency = record.get(frequency_column).unwrap_or("");

            if token.is_empty() {
                warn!("skipping vocabulary row {line} with an empty token");
                continue;
            }
            rows.push(VocabularyEntry::new(token, parse_frequency(frequency, line)?));
        }

        Ok(self.apply_duplicates(rows))
    }

    /// Parse `token frequency` lines.
    pub fn load_text<R: BufRead>(&self, reader: R) -> Result<Vec<VocabularyEntry>> {
        let mut rows = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let mut parts = trimmed.split_whitespace();
            match (parts.next(), parts.next()) {
                (Some(token), Some(frequency)) => {
                    rows.push(VocabularyEntry::new(
                        token,
                        parse_frequency(frequency, index as u64 + 1)?,
                    ));
                }
                _ => {
                    return Err(BkspellError::vocabulary(format!(
                        "line {}: expected 'token frequency', got '{trimmed}'",
                        index + 1
                    )));
                }
            }
        }

        Ok(self.apply_duplicates(rows))
    }

    fn apply_duplicates(&self, rows: Vec<VocabularyEntry>) -> Vec<VocabularyEntry> {
        if self.duplicates == DuplicatePolicy::Reject {
            return rows;
        }

        let mut positions: AHashMap<String, usize> = AHashMap::with_capacity(rows.len());
        let mut entries: Vec<VocabularyEntry> = Vec::with_capacity(rows.len());
        for row in rows {
            match positions.get(&row.token) {
                Some(&position) => {
                    warn!(
                        "duplicate vocabulary token '{}', frequency {} replaces {}",
                        row.token, row.frequency, entries[position].frequency
                    );
                    entries[position].frequency = row.frequency;
                }
                None => {
                    positions.insert(row.token.clone(), entries.len());
                    entries.push(row);
                }
            }
        }
        entries
    }
}

fn find_column(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|header| header.trim().eq_ignore_ascii_case(name))
        .ok_or_else(|| BkspellError::vocabulary(format!("missing '{name}' column in header")))
}

fn parse_frequency(value: &str, line: u64) -> Result<u64> {
    value.trim().parse::<u64>().map_err(|_| {
        BkspellError::vocabulary(format!(
            "line {line}: frequency '{value}' is not a non-negative integer"
        ))
    })
}

/// Load a vocabulary file with default settings.
pub fn load_vocabulary<P: AsRef<Path>>(path: P) -> Result<Vec<VocabularyEntry>> {
    VocabularyLoader::new().load_path(path)
}
