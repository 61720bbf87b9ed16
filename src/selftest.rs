//! Embedded self-check run by `bbl2bib --self-test`.
//!
//! Converts a small built-in bibliography and verifies the extracted keys,
//! years and mismatch count. It is a smoke check of the installed binary; the
//! full suite lives in the crate tests.

use tracing::{info, warn};

use crate::convert::{parse_bbl, ConvertOptions};
use crate::extract::BibitemPattern;

/// Sample bibliography: two matching entries around one without `\titlecap`.
pub const SAMPLE_BBL: &str = r"\begin{thebibliography}{3}

\bibitem[{Alveen et~al.(2014)Alveen, McNamara, Carolan, Murphy, and Ivankovi{\'{c}}}]{Alveen2014}
Alveen, P., McNamara, D., Carolan, D., Murphy, N., and Ivankovi{\'{c}}, A.,
  \titlecap{Analysis of two-phase ceramic composites using micromechanical
  models}, {\em Comput. Mater. Sci.}, vol.~{\bf 92}, pp.~318--324, 2014.

\bibitem[{Allaire, 2002}]{Allaire2002}
Allaire, G., {\em Shape optimization by the homogenization method},
 New York: Springer, 2002.

\bibitem[{Doe(2014a)}]{Doe2014a}
Doe, J., \titlecap{A disambiguated year}, {\em J. Test}, 2014a.

\end{thebibliography}
";

/// Expected (key, year) pairs for the matching sample entries.
const EXPECTED: &[(&str, &str)] = &[("Alveen2014", "2014"), ("Doe2014a", "2014a")];

/// One failed self-check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckFailure {
    pub check: String,
    pub detail: String,
}

/// Runs the self-check with the given pattern.
///
/// # Returns
///
/// The list of failed checks; an empty list means the check passed.
pub fn run_self_test(pattern: &BibitemPattern) -> Vec<CheckFailure> {
    let bibliography = parse_bbl(pattern, SAMPLE_BBL, &ConvertOptions::default());
    let mut failures = Vec::new();

    let mut check = |name: &str, ok: bool, detail: String| {
        if ok {
            info!(check = name, "self-test check passed");
        } else {
            warn!(check = name, %detail, "self-test check failed");
            failures.push(CheckFailure {
                check: name.to_string(),
                detail,
            });
        }
    };

    check(
        "entry count",
        bibliography.entries.len() == EXPECTED.len(),
        format!(
            "expected {} entries, got {}",
            EXPECTED.len(),
            bibliography.entries.len()
        ),
    );

    for (i, (key, year)) in EXPECTED.iter().enumerate() {
        let got = bibliography.entries.get(i);
        check(
            *key,
            got.is_some_and(|e| e.ref_label == *key && e.year == *year),
            format!("expected {key} ({year}), got {:?}", got.map(|e| (&e.ref_label, &e.year))),
        );
    }

    let positions: Vec<usize> = bibliography.mismatches.iter().map(|m| m.position).collect();
    check(
        "mismatch reported",
        positions == [2],
        format!("expected a mismatch at entry 2, got {positions:?}"),
    );

    failures
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_test_passes() {
        let pattern = BibitemPattern::new().unwrap();
        let failures = run_self_test(&pattern);
        assert!(failures.is_empty(), "unexpected failures: {:?}", failures);
    }
}
