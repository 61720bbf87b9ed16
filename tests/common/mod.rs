//! Shared sample bibliographies for integration tests.

/// Entry from the README example: key `ZENG2018269`, year 2018.
pub const ZENG: &str = r"\bibitem[{Zeng and Qin(2018)}]{ZENG2018269}
Zeng, Q. and Qin, Y., \titlecap{Multiscale Modeling of Hybrid Machining
  Processes}, in \textit{Hybrid Machining}, X. Luo and Y. Qin, Eds., New York:
  Academic Press, pp. 269--298, 2018.
";

/// Multi-author entry with accented names: key `Alveen2014`, year 2014.
pub const ALVEEN: &str = r"\bibitem[{Alveen et~al.(2014)Alveen, McNamara, Carolan, Murphy, and Ivankovi{\'{c}}}]{Alveen2014}
Alveen, P., McNamara, D., Carolan, D., Murphy, N., and Ivankovi{\'{c}}, A.,
  \titlecap{Analysis of two-phase ceramic composites using micromechanical
  models}, {\em Comput. Mater. Sci.}, vol.~{\bf 92}, pp.~318--324, 2014.
";

/// Entry with a disambiguated year: key `Doe2014a`, year 2014a.
pub const DOE: &str = r"\bibitem[{Doe(2014a)}]{Doe2014a}
Doe, J., \titlecap{A disambiguated year}, {\em J. Test}, 2014a.
";

/// Entry without `\titlecap`; never matches the entry pattern.
pub const ALLAIRE: &str = r"\bibitem[{Allaire, 2002}]{Allaire2002}
Allaire, G., {\em Shape optimization by the homogenization method},
 New York: Springer, 2002.
";

/// Wraps entries in a `thebibliography` environment.
pub fn build_bbl(entries: &[&str]) -> String {
    format!(
        "\\begin{{thebibliography}}{{{}}}\n\n{}\n\\end{{thebibliography}}\n",
        entries.len(),
        entries.join("\n")
    )
}
