use tracing::trace;

/// An unordered set of hostnames without duplicates.
///
/// Use [`numerically_sorted()`][crate::numerically_sorted] to turn it into an ordered sequence.
pub type HostSet = foldhash::HashSet<String>;

/// How a list of host sets is combined into one.
///
/// Every operation is a left fold over the sets in the order given, so only the first set is
/// special for [`Difference`][Self::Difference]; the others may come in any order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SetOperation {
    /// Hosts present in any of the sets.
    #[default]
    Union,

    /// Hosts present in all of the sets.
    Intersection,

    /// Hosts present in the first set but in none of the others.
    Difference,

    /// Hosts present in an odd number of the sets.
    SymmetricDifference,
}

impl SetOperation {
    /// Combines the sets with this operation.
    ///
    /// Combining zero sets yields an empty set and combining a single set yields that set.
    ///
    /// # Example
    ///
    /// ```
    /// use hostlist::{HostSet, SetOperation, expand_hostlist, numerically_sorted};
    ///
    /// let a: HostSet = expand_hostlist("a[1-3]").unwrap().into_iter().collect();
    /// let b: HostSet = expand_hostlist("a[2-4]").unwrap().into_iter().collect();
    ///
    /// let difference = SetOperation::Difference.apply([a, b]);
    ///
    /// assert_eq!(numerically_sorted(difference), vec!["a1"]);
    /// ```
    #[must_use]
    pub fn apply<I>(self, sets: I) -> HostSet
    where
        I: IntoIterator<Item = HostSet>,
    {
        let mut sets = sets.into_iter();

        let Some(first) = sets.next() else {
            return HostSet::default();
        };

        let mut operand_count: usize = 1;

        let result = sets.fold(first, |accumulated, set| {
            operand_count = operand_count.saturating_add(1);
            self.combine(accumulated, set)
        });

        trace!(operation = ?self, operand_count, host_count = result.len(), "combined host sets");

        result
    }

    fn combine(self, mut accumulated: HostSet, other: HostSet) -> HostSet {
        match self {
            Self::Union => accumulated.extend(other),
            Self::Intersection => accumulated.retain(|host| other.contains(host)),
            Self::Difference => accumulated.retain(|host| !other.contains(host)),
            Self::SymmetricDifference => {
                for host in other {
                    if !accumulated.remove(&host) {
                        accumulated.insert(host);
                    }
                }
            }
        }

        accumulated
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::{expand_hostlist, numerically_sorted};

    fn set(expression: &str) -> HostSet {
        expand_hostlist(expression).unwrap().into_iter().collect()
    }

    fn apply(operation: SetOperation, expressions: &[&str]) -> Vec<String> {
        numerically_sorted(operation.apply(expressions.iter().map(|e| set(e))))
    }

    #[test]
    fn union_smoke_test() {
        assert_eq!(
            apply(SetOperation::Union, &["a[1-3]", "a[2-4]"]),
            vec!["a1", "a2", "a3", "a4"]
        );

        assert_eq!(
            apply(SetOperation::Union, &["a[2-4]", "a[1-3]"]),
            vec!["a1", "a2", "a3", "a4"]
        );
    }

    #[test]
    fn intersection_smoke_test() {
        assert_eq!(
            apply(SetOperation::Intersection, &["a[1-3]", "a[2-4]"]),
            vec!["a2", "a3"]
        );

        assert_eq!(
            apply(SetOperation::Intersection, &["a[1-3]", "a[2-4]", "a[3-9]"]),
            vec!["a3"]
        );
    }

    #[test]
    fn difference_subtracts_rest_from_first() {
        assert_eq!(
            apply(SetOperation::Difference, &["a[1-3]", "a[2-4]"]),
            vec!["a1"]
        );

        assert_eq!(
            apply(SetOperation::Difference, &["a[1-9]", "a2", "a[5-6]"]),
            vec!["a1", "a3", "a4", "a7", "a8", "a9"]
        );

        assert_eq!(
            apply(SetOperation::Difference, &["a[2-4]", "a[1-3]"]),
            vec!["a4"]
        );
    }

    #[test]
    fn symmetric_difference_keeps_odd_membership() {
        assert_eq!(
            apply(SetOperation::SymmetricDifference, &["a[1-3]", "a[2-4]"]),
            vec!["a1", "a4"]
        );

        assert_eq!(
            apply(SetOperation::SymmetricDifference, &["a[1-3]", "a[2-4]", "a[3-5]"]),
            vec!["a1", "a3", "a5"]
        );
    }

    #[test]
    fn degenerate_operand_counts() {
        assert!(SetOperation::Union.apply(Vec::<HostSet>::new()).is_empty());
        assert!(SetOperation::Intersection.apply(Vec::<HostSet>::new()).is_empty());

        assert_eq!(apply(SetOperation::Difference, &["a[1-2]"]), vec!["a1", "a2"]);
    }

    #[test]
    fn union_is_default() {
        assert_eq!(SetOperation::default(), SetOperation::Union);
    }
}
