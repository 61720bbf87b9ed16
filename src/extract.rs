//! Field extraction from raw `\bibitem` entries.
//!
//! Each raw entry is flattened to one line and searched with a single
//! composite pattern of the shape
//!
//! ```text
//! [{<reference info>}]{<label>} <authors> \titlecap{...} ... <year>.
//! ```
//!
//! Authors are whatever sits between the citation key and the first
//! `\titlecap`; the year is the last four-digit token (optionally followed by
//! a lowercase letter) that is immediately followed by a period.

use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// The entry type written for every converted record.
pub const ENTRY_TYPE: &str = "article";

/// Bracketed reference info, e.g. `[{Zeng and Qin(2018)}]`.
const REF_INFO: &str = r"\[\{[^\]]+\}\]";
/// Braced citation key, e.g. `{ZENG2018269}`.
const REF_LABEL: &str = r"\{\b(?P<ref_label>\w+)\b\}";
/// Everything up to the title macro.
const AUTHORS: &str = r"(?P<authors>.*?)";
/// Title macro plus the rest of the entry body.
const TITLECAP: &str = r"\\titlecap.+";
/// Four digits, optional disambiguation letter, closing period.
const YEAR: &str = r"(?P<year>[0-9]{4}[a-z]?)\.";

/// Errors that can occur during field extraction.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("entry does not match the expected bibitem shape: {line}")]
    Mismatch { line: String },
}

/// The fields extracted from one bibliography entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryFields {
    /// Citation key, e.g. "ZENG2018269"
    pub ref_label: String,
    /// Free-text author list as written in the source
    pub authors: String,
    /// Publication year, e.g. "2018" or "2014a"
    pub year: String,
    /// The whole entry collapsed onto a single line
    pub bibitem_line: String,
    /// BibTeX entry type, always [`ENTRY_TYPE`]
    #[serde(rename = "type")]
    pub entry_type: String,
}

impl EntryFields {
    /// Builds a record for a line the pattern did not match.
    ///
    /// Only `bibitem_line` and `entry_type` are filled; the captured fields
    /// are left empty.
    pub fn unmatched(line: &str) -> Self {
        EntryFields {
            ref_label: String::new(),
            authors: String::new(),
            year: String::new(),
            bibitem_line: clean_value(line).to_string(),
            entry_type: ENTRY_TYPE.to_string(),
        }
    }
}

/// The compiled composite entry pattern.
///
/// Build it once with [`BibitemPattern::new`] and hand it to every
/// extraction call.
#[derive(Debug, Clone)]
pub struct BibitemPattern {
    regex: Regex,
}

impl BibitemPattern {
    /// Compiles the entry pattern.
    pub fn new() -> Result<Self, regex::Error> {
        let source = format!("{REF_INFO}{REF_LABEL}{AUTHORS}{TITLECAP}{YEAR}");
        let regex = Regex::new(&source)?;
        Ok(BibitemPattern { regex })
    }

    /// Returns the pattern source, for diagnostics.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Extracts the fields of one raw entry.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Mismatch`] carrying the normalized line when the
    /// entry does not have the expected shape.
    pub fn extract(&self, raw: &str) -> Result<EntryFields, ExtractError> {
        let line = normalize_line(raw);
        debug!(line = %line, "normalized bibitem line");

        let caps = match self.regex.captures(&line) {
            Some(caps) => caps,
            None => return Err(ExtractError::Mismatch { line }),
        };

        let capture = |name: &str| {
            caps.name(name)
                .map(|m| clean_value(m.as_str()).to_string())
                .unwrap_or_default()
        };

        let fields = EntryFields {
            ref_label: capture("ref_label"),
            authors: capture("authors"),
            year: capture("year"),
            bibitem_line: clean_value(&line).to_string(),
            entry_type: ENTRY_TYPE.to_string(),
        };
        debug!(?fields, "extracted fields");

        Ok(fields)
    }
}

/// Collapses every whitespace run into a single space and trims both ends.
pub fn normalize_line(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strips whitespace and commas from both ends of a field value.
pub fn clean_value(value: &str) -> &str {
    value.trim_matches(|c: char| c.is_whitespace() || c == ',')
}
