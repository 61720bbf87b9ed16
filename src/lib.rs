//! bbl2bib: convert LaTeX `thebibliography` entries into BibTeX.
//!
//! This library provides functionality to:
//! - Split a `.bbl` document into its `\bibitem` entries
//! - Extract the citation key, authors and year of each entry
//! - Render the entries as BibTeX (or JSON) records

pub mod bibtex;
pub mod convert;
pub mod extract;
pub mod selftest;
pub mod splitter;

pub use bibtex::{format_bibliography, format_entry, format_json, render, OutputFormat};
pub use convert::{
    convert, parse_bbl, Bibliography, ConvertError, ConvertOptions, Mismatch, MismatchPolicy,
};
pub use extract::{clean_value, normalize_line, BibitemPattern, EntryFields, ExtractError};
pub use selftest::run_self_test;
pub use splitter::{count_entries, split_entries};
