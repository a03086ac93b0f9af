//! Decomposition of hostnames into alternating text and number runs.
//!
//! Both the numeric ordering and the collapse algorithm look at hostnames through this lens:
//! `node12b3` is seen as `["node", "12", "b", "3"]`. Only ASCII digits count as numeric.

use std::iter::FusedIterator;

/// One maximal run of a hostname, consisting either entirely of ASCII digits or entirely of
/// other characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Run<'a> {
    /// A run of non-digit characters.
    Text(&'a str),

    /// A run of ASCII digits, exactly as written (leading zeros included).
    Number(&'a str),
}

impl<'a> Run<'a> {
    /// The run as it appears in the hostname.
    #[must_use]
    pub fn as_str(&self) -> &'a str {
        match self {
            Run::Text(s) | Run::Number(s) => s,
        }
    }
}

/// Splits a hostname into its alternating text and number runs.
///
/// An empty hostname yields no runs.
///
/// # Example
///
/// ```
/// use hostlist::{Run, split_runs};
///
/// let runs: Vec<_> = split_runs("node12b3").collect();
///
/// assert_eq!(
///     runs,
///     vec![
///         Run::Text("node"),
///         Run::Number("12"),
///         Run::Text("b"),
///         Run::Number("3"),
///     ]
/// );
/// ```
#[must_use]
pub fn split_runs(hostname: &str) -> Runs<'_> {
    Runs {
        remaining: hostname,
    }
}

/// Iterator over the runs of a hostname, created by [`split_runs()`].
#[derive(Clone, Debug)]
pub struct Runs<'a> {
    remaining: &'a str,
}

impl<'a> Iterator for Runs<'a> {
    type Item = Run<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.remaining.chars().next()?;
        let numeric = first.is_ascii_digit();

        let end = self
            .remaining
            .find(|c: char| c.is_ascii_digit() != numeric)
            .unwrap_or(self.remaining.len());

        let (run, rest) = self.remaining.split_at(end);
        self.remaining = rest;

        Some(if numeric {
            Run::Number(run)
        } else {
            Run::Text(run)
        })
    }
}

impl FusedIterator for Runs<'_> {}

/// Splits `s` around its last run of digits, returning `(prefix, digits, suffix)`.
///
/// Returns `None` if `s` contains no digits.
pub(crate) fn split_last_number(s: &str) -> Option<(&str, &str, &str)> {
    let digits_end = s.trim_end_matches(|c: char| !c.is_ascii_digit()).len();

    if digits_end == 0 {
        return None;
    }

    let (head, suffix) = s.split_at(digits_end);
    let digits_start = head.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    let (prefix, digits) = head.split_at(digits_start);

    Some((prefix, digits, suffix))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn split_runs_smoke_test() {
        assert_eq!(split_runs("").count(), 0);

        assert_eq!(split_runs("login").collect::<Vec<_>>(), vec![Run::Text("login")]);

        assert_eq!(split_runs("0042").collect::<Vec<_>>(), vec![Run::Number("0042")]);

        assert_eq!(
            split_runs("r1n007-ib").collect::<Vec<_>>(),
            vec![
                Run::Text("r"),
                Run::Number("1"),
                Run::Text("n"),
                Run::Number("007"),
                Run::Text("-ib"),
            ]
        );
    }

    #[test]
    fn split_runs_treats_non_ascii_digits_as_text() {
        assert_eq!(
            split_runs("nöde٣1").collect::<Vec<_>>(),
            vec![Run::Text("nöde٣"), Run::Number("1")]
        );
    }

    #[test]
    fn split_last_number_smoke_test() {
        assert_eq!(split_last_number(""), None);
        assert_eq!(split_last_number("login"), None);
        assert_eq!(split_last_number("node12"), Some(("node", "12", "")));
        assert_eq!(split_last_number("r1n07-ib"), Some(("r1n", "07", "-ib")));
        assert_eq!(split_last_number("42"), Some(("", "42", "")));
    }
}
