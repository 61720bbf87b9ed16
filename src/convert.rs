//! `.bbl` to BibTeX conversion.
//!
//! This module wires the splitter, the field extractor and the renderer
//! together, and decides what happens to entries the pattern cannot read.

use thiserror::Error;
use tracing::{debug, warn};

use crate::bibtex::{render, OutputFormat};
use crate::extract::{BibitemPattern, EntryFields, ExtractError};
use crate::splitter::split_entries;

/// Errors that can occur during conversion.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("invalid bibitem pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// What to do with an entry whose line does not match the entry pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MismatchPolicy {
    /// Leave the entry out of the output and report it
    #[default]
    Skip,
    /// Emit the entry in place, with empty key, authors and year
    Keep,
}

/// Options controlling one conversion run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvertOptions {
    pub on_mismatch: MismatchPolicy,
}

/// An entry the pattern did not match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// 1-based position of the entry in the bibliography
    pub position: usize,
    /// The normalized entry line
    pub line: String,
}

/// The result of converting one `.bbl` document.
#[derive(Debug, Clone, Default)]
pub struct Bibliography {
    /// Entries to emit, in citation order
    pub entries: Vec<EntryFields>,
    /// Entries that failed extraction, in citation order
    pub mismatches: Vec<Mismatch>,
}

impl Bibliography {
    /// Renders the entries with the given output format.
    pub fn render(&self, format: OutputFormat) -> Result<String, ConvertError> {
        Ok(render(format, &self.entries)?)
    }
}

/// Parses every `\bibitem` entry of a `.bbl` document.
///
/// # Arguments
///
/// * `pattern` - The compiled entry pattern
/// * `text` - The `.bbl` document text
/// * `options` - Conversion options (mismatch policy)
///
/// # Returns
///
/// The extracted entries and the list of mismatches. A mismatch never aborts
/// the run; with [`MismatchPolicy::Keep`] it still yields an entry.
pub fn parse_bbl(pattern: &BibitemPattern, text: &str, options: &ConvertOptions) -> Bibliography {
    let raw_entries = split_entries(text);
    debug!(count = raw_entries.len(), entries = ?raw_entries, "bibitem entries");

    let mut bibliography = Bibliography::default();

    for (index, raw) in raw_entries.iter().enumerate() {
        let position = index + 1;
        match pattern.extract(raw) {
            Ok(fields) => bibliography.entries.push(fields),
            Err(ExtractError::Mismatch { line }) => {
                warn!(
                    position,
                    line = %preview(&line),
                    "entry does not match the expected bibitem shape"
                );
                if options.on_mismatch == MismatchPolicy::Keep {
                    bibliography.entries.push(EntryFields::unmatched(&line));
                }
                bibliography.mismatches.push(Mismatch { position, line });
            }
        }
    }

    bibliography
}

/// Converts `.bbl` text straight to rendered output.
///
/// Compiles the entry pattern, parses the text and renders the entries.
pub fn convert(
    text: &str,
    options: &ConvertOptions,
    format: OutputFormat,
) -> Result<(String, Bibliography), ConvertError> {
    let pattern = BibitemPattern::new()?;
    let bibliography = parse_bbl(&pattern, text, options);
    let output = bibliography.render(format)?;
    Ok((output, bibliography))
}

/// Returns the first 60 characters of a line, for log messages.
fn preview(line: &str) -> String {
    const LIMIT: usize = 60;
    if line.chars().count() <= LIMIT {
        line.to_string()
    } else {
        let head: String = line.chars().take(LIMIT).collect();
        format!("{head}...")
    }
}
