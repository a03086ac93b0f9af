use std::cmp::Ordering;

use crate::{Run, split_runs};

/// Compares two hostnames in numerically-aware order, so that `node2` sorts before `node10`.
///
/// Both hostnames are split into their text and number runs (see [`split_runs()`]) and compared
/// run by run:
///
/// * Two number runs compare by integer value. Numbers of any length are supported. If the values
///   are equal, the shorter spelling sorts first, so `2` < `02` < `002`.
/// * Two text runs compare byte-wise.
/// * A text run compared against a number run compares its first byte against `'0'`, which is
///   where the digits would sort in a plain byte-wise comparison.
///
/// If one hostname runs out of runs first, it sorts first.
///
/// This is a total order that is consistent with string equality: it returns
/// [`Ordering::Equal`] only for identical hostnames.
#[must_use]
pub fn compare_hostnames(a: &str, b: &str) -> Ordering {
    let mut left = split_runs(a);
    let mut right = split_runs(b);

    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => match compare_runs(x, y) {
                Ordering::Equal => {}
                decided => return decided,
            },
        }
    }
}

/// Returns the hostnames sorted by [`compare_hostnames()`].
///
/// Duplicates are preserved. Use [`HostSet`][crate::HostSet] or
/// [`expand_hostlist()`][crate::expand_hostlist] if you need them removed.
///
/// # Example
///
/// ```
/// let sorted = hostlist::numerically_sorted(["node10", "node9", "node1"]);
///
/// assert_eq!(sorted, vec!["node1", "node9", "node10"]);
/// ```
#[must_use]
pub fn numerically_sorted<I>(hosts: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut hosts: Vec<String> = hosts.into_iter().map(Into::into).collect();
    hosts.sort_by(|a, b| compare_hostnames(a, b));
    hosts
}

fn compare_runs(a: Run<'_>, b: Run<'_>) -> Ordering {
    match (a, b) {
        (Run::Number(x), Run::Number(y)) => compare_numbers(x, y),
        (Run::Text(x), Run::Text(y)) => x.cmp(y),
        (Run::Text(x), Run::Number(_)) => compare_text_to_digits(x),
        (Run::Number(_), Run::Text(y)) => compare_text_to_digits(y).reverse(),
    }
}

// Text runs are never empty and never start with a digit.
fn compare_text_to_digits(text: &str) -> Ordering {
    match text.as_bytes().first() {
        Some(first) if *first < b'0' => Ordering::Less,
        _ => Ordering::Greater,
    }
}

fn compare_numbers(a: &str, b: &str) -> Ordering {
    let a_significant = a.trim_start_matches('0');
    let b_significant = b.trim_start_matches('0');

    a_significant
        .len()
        .cmp(&b_significant.len())
        .then_with(|| a_significant.cmp(b_significant))
        .then_with(|| a.len().cmp(&b.len()))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn numbers_compare_by_value() {
        assert_eq!(compare_hostnames("node2", "node10"), Ordering::Less);
        assert_eq!(compare_hostnames("node10", "node2"), Ordering::Greater);
        assert_eq!(compare_hostnames("node10", "node10"), Ordering::Equal);
    }

    #[test]
    fn padding_breaks_ties_shorter_first() {
        assert_eq!(compare_hostnames("n2", "n02"), Ordering::Less);
        assert_eq!(compare_hostnames("n02", "n002"), Ordering::Less);
        assert_eq!(compare_hostnames("n002", "n2"), Ordering::Greater);

        // Value still wins over padding.
        assert_eq!(compare_hostnames("n03", "n2"), Ordering::Greater);
    }

    #[test]
    fn huge_numbers_do_not_overflow() {
        assert_eq!(
            compare_hostnames("n99999999999999999999999", "n100000000000000000000000"),
            Ordering::Less
        );
    }

    #[test]
    fn text_runs_compare_bytewise() {
        assert_eq!(compare_hostnames("alpha1", "beta1"), Ordering::Less);
        assert_eq!(compare_hostnames("n1a", "n1b"), Ordering::Less);
    }

    #[test]
    fn shorter_run_sequence_sorts_first() {
        assert_eq!(compare_hostnames("node", "node1"), Ordering::Less);
        assert_eq!(compare_hostnames("node1", "node1-ib"), Ordering::Less);
    }

    #[test]
    fn mixed_shapes_stay_transitive() {
        // A whole-string fallback for mixed shapes would make these three form a cycle.
        let mut hosts = ["x1y", "x10", "x2"];
        hosts.sort_by(|a, b| compare_hostnames(a, b));

        assert_eq!(hosts, ["x1y", "x2", "x10"]);
        assert_eq!(compare_hostnames("x1y", "x2"), Ordering::Less);
        assert_eq!(compare_hostnames("x2", "x10"), Ordering::Less);
        assert_eq!(compare_hostnames("x1y", "x10"), Ordering::Less);
    }

    #[test]
    fn text_against_number_uses_first_byte() {
        // '-' sorts below the digits, 'a' above them.
        assert_eq!(compare_hostnames("-1", "1"), Ordering::Less);
        assert_eq!(compare_hostnames("a", "1"), Ordering::Greater);
        assert_eq!(compare_hostnames("1x", "1-"), Ordering::Greater);
    }

    #[test]
    fn numerically_sorted_smoke_test() {
        let expected: Vec<String> = (1..=10).map(|i| format!("node{i}")).collect();
        let lexical = [
            "node1", "node10", "node2", "node3", "node4", "node5", "node6", "node7", "node8",
            "node9",
        ];

        assert_eq!(numerically_sorted(lexical), expected);
    }

    #[test]
    fn numerically_sorted_is_idempotent() {
        let once = numerically_sorted(["b2", "a10", "a9", "a09", "b", "a1x"]);
        let twice = numerically_sorted(once.clone());

        assert_eq!(once, twice);
    }

    #[test]
    fn numerically_sorted_keeps_duplicates() {
        assert_eq!(numerically_sorted(["n2", "n1", "n2"]), vec!["n1", "n2", "n2"]);
    }
}
