//! Output rendering for converted entries.
//!
//! Entries are rendered either as minimal BibTeX records or as a JSON array
//! of the raw extracted fields.

use crate::extract::EntryFields;

/// Output renderers supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One `@article{...}` block per entry
    #[default]
    Bibtex,
    /// Pretty-printed JSON array of the extracted fields
    Json,
}

/// Renders one entry as a BibTeX block.
///
/// The block ends with the closing brace, a newline and a blank line:
///
/// ```text
/// @article{ZENG2018269,
///     author = {Zeng, Q. and Qin, Y.},
///     year = {2018},
///     note = {[{Zeng and Qin(2018)}]{ZENG2018269} Zeng, Q. and Qin, Y., ...}
/// }
///
/// ```
pub fn format_entry(entry: &EntryFields) -> String {
    format!(
        "@{}{{{},\n    author = {{{}}},\n    year = {{{}}},\n    note = {{{}}}\n}}\n\n",
        entry.entry_type, entry.ref_label, entry.authors, entry.year, entry.bibitem_line
    )
}

/// Renders all entries as BibTeX, in the order given.
///
/// # Returns
///
/// The concatenated blocks, or an empty string when there are no entries.
pub fn format_bibliography(entries: &[EntryFields]) -> String {
    entries.iter().map(format_entry).collect()
}

/// Renders all entries as a pretty-printed JSON array.
pub fn format_json(entries: &[EntryFields]) -> Result<String, serde_json::Error> {
    let mut json = serde_json::to_string_pretty(entries)?;
    json.push('\n');
    Ok(json)
}

/// Renders entries with the selected output format.
pub fn render(format: OutputFormat, entries: &[EntryFields]) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Bibtex => Ok(format_bibliography(entries)),
        OutputFormat::Json => format_json(entries),
    }
}
