//! Bibliography block segmentation.
//!
//! Cuts a `.bbl` document down to its `thebibliography` entries and splits
//! them at every `\bibitem` marker.

/// Token that starts one bibliography entry.
pub const ENTRY_MARKER: &str = r"\bibitem";

/// Token that closes the bibliography environment.
pub const END_MARKER: &str = r"\end{thebibliography}";

/// Splits the given `.bbl` text into raw entry chunks.
///
/// Everything from the first `\end{thebibliography}` onward is dropped, as is
/// the preamble before the first `\bibitem`. Each returned chunk still carries
/// its bracketed label metadata and the entry body, untouched.
///
/// # Examples
///
/// ```
/// use bbl2bib::split_entries;
///
/// let text = "\\begin{thebibliography}{9}\n\\bibitem[{A}]{a} one\n\\bibitem[{B}]{b} two\n\\end{thebibliography}";
/// let entries = split_entries(text);
/// assert_eq!(entries, vec!["[{A}]{a} one\n", "[{B}]{b} two\n"]);
/// ```
pub fn split_entries(text: &str) -> Vec<&str> {
    let body = match text.find(END_MARKER) {
        Some(end) => &text[..end],
        None => text,
    };

    body.split(ENTRY_MARKER).skip(1).collect()
}

/// Counts the entry markers that appear before the end of the bibliography.
pub fn count_entries(text: &str) -> usize {
    split_entries(text).len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_entries_two_items() {
        // Given: a bibliography block with two entries
        let text = "\\begin{thebibliography}{2}\n\
                    \\bibitem[{A(2001)}]{a2001} First entry.\n\
                    \\bibitem[{B(2002)}]{b2002} Second entry.\n\
                    \\end{thebibliography}\n";

        // When: we split it
        let entries = split_entries(text);

        // Then: each entry is returned in order without its marker
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], "[{A(2001)}]{a2001} First entry.\n");
        assert_eq!(entries[1], "[{B(2002)}]{b2002} Second entry.\n");
    }

    #[test]
    fn test_split_entries_discards_preamble() {
        let text = "\\begin{thebibliography}{1}\n\\providecommand{\\url}[1]{#1}\n\\bibitem[{A}]{a} body";

        let entries = split_entries(text);

        assert_eq!(entries, vec!["[{A}]{a} body"]);
    }

    #[test]
    fn test_split_entries_drops_text_after_end_marker() {
        // Given: an entry marker that appears after the end of the bibliography
        let text = "\\bibitem[{A}]{a} kept\n\\end{thebibliography}\n\\bibitem[{B}]{b} dropped";

        // When: we split it
        let entries = split_entries(text);

        // Then: only the entry before the end marker survives
        assert_eq!(entries, vec!["[{A}]{a} kept\n"]);
    }

    #[test]
    fn test_split_entries_without_end_marker() {
        // The last entry runs to the end of the input
        let text = "\\bibitem[{A}]{a} one\n\\bibitem[{B}]{b} two, unterminated";

        let entries = split_entries(text);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1], "[{B}]{b} two, unterminated");
    }

    #[test]
    fn test_split_entries_no_markers() {
        assert!(split_entries("").is_empty());
        assert!(split_entries("\\begin{thebibliography}{0}\n\\end{thebibliography}").is_empty());
        assert!(split_entries("plain text without entries").is_empty());
    }

    #[test]
    fn test_count_entries_matches_markers() {
        let text = "\\bibitem a\n\\bibitem b\n\\bibitem c\n\\end{thebibliography}\\bibitem d";
        assert_eq!(count_entries(text), 3);
    }
}
