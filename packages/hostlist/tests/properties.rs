//! Property tests for the laws tying expansion, collapse and ordering together.

#![cfg(not(miri))] // Too slow under Miri.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::num::NonZero;

use hostlist::{
    HostSet, SetOperation, collapse_chunks, collapse_hostlist, compare_hostnames,
    expand_hostlist, numerically_sorted,
};
use proptest::prelude::*;

// Hostnames with up to three numeric runs, some of them zero-padded.
fn hostname() -> impl Strategy<Value = String> {
    prop_oneof![
        ("[a-c]{1,3}", 0_u32..40).prop_map(|(prefix, n)| format!("{prefix}{n}")),
        ("[a-c]{1,2}", 0_u32..40).prop_map(|(prefix, n)| format!("{prefix}{n:02}")),
        (0_u32..4, 0_u32..12).prop_map(|(rack, n)| format!("r{rack}n{n}-ib")),
        "[a-z-]{1,6}",
        "[a-c0-9]{1,8}",
    ]
}

fn hostnames() -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set(hostname(), 0..60)
}

fn expanded_set(expression: &str) -> BTreeSet<String> {
    expand_hostlist(expression).unwrap().into_iter().collect()
}

proptest! {
    #[test]
    fn collapse_then_expand_round_trips(hosts in hostnames()) {
        let collapsed = collapse_hostlist(numerically_sorted(hosts.clone()), None).unwrap();

        prop_assert_eq!(expanded_set(&collapsed), hosts);
    }

    #[test]
    fn collapse_round_trips_in_any_order(hosts in hostnames()) {
        // Reverse lexical order is about as far from the intended order as it gets.
        let collapsed = collapse_hostlist(hosts.iter().rev(), None).unwrap();

        prop_assert_eq!(expanded_set(&collapsed), hosts);
    }

    #[test]
    fn chunking_preserves_the_set(hosts in hostnames(), chunk_size in 1_usize..10) {
        let sorted = numerically_sorted(hosts.clone());
        let chunks = collapse_chunks(&sorted, NonZero::new(chunk_size)).unwrap();

        prop_assert_eq!(chunks.len(), sorted.len().div_ceil(chunk_size));

        let mut recovered = BTreeSet::new();
        for chunk in &chunks {
            let expanded = expanded_set(chunk);
            prop_assert!(expanded.len() <= chunk_size);
            recovered.extend(expanded);
        }

        prop_assert_eq!(recovered, hosts);
    }

    #[test]
    fn numerically_sorted_is_idempotent(hosts in prop::collection::vec(hostname(), 0..40)) {
        let once = numerically_sorted(hosts);
        let twice = numerically_sorted(once.clone());

        prop_assert_eq!(once, twice);
    }

    #[test]
    fn comparison_is_antisymmetric(a in hostname(), b in hostname()) {
        prop_assert_eq!(compare_hostnames(&a, &b), compare_hostnames(&b, &a).reverse());
        prop_assert_eq!(compare_hostnames(&a, &b) == Ordering::Equal, a == b);
    }

    #[test]
    fn comparison_is_transitive(a in hostname(), b in hostname(), c in hostname()) {
        let mut sorted = [a, b, c];
        sorted.sort_by(|x, y| compare_hostnames(x, y));

        prop_assert_ne!(compare_hostnames(&sorted[0], &sorted[1]), Ordering::Greater);
        prop_assert_ne!(compare_hostnames(&sorted[1], &sorted[2]), Ordering::Greater);
        prop_assert_ne!(compare_hostnames(&sorted[0], &sorted[2]), Ordering::Greater);
    }

    #[test]
    fn set_operations_agree_with_btree_sets(a in hostnames(), b in hostnames()) {
        let to_host_set = |set: &BTreeSet<String>| set.iter().cloned().collect::<HostSet>();
        let apply = |operation: SetOperation| -> BTreeSet<String> {
            operation.apply([to_host_set(&a), to_host_set(&b)]).into_iter().collect()
        };

        prop_assert_eq!(apply(SetOperation::Union), a.union(&b).cloned().collect::<BTreeSet<_>>());
        prop_assert_eq!(
            apply(SetOperation::Intersection),
            a.intersection(&b).cloned().collect::<BTreeSet<_>>()
        );
        prop_assert_eq!(
            apply(SetOperation::Difference),
            a.difference(&b).cloned().collect::<BTreeSet<_>>()
        );
        prop_assert_eq!(
            apply(SetOperation::SymmetricDifference),
            a.symmetric_difference(&b).cloned().collect::<BTreeSet<_>>()
        );
    }
}

#[test]
fn numeric_ordering_of_expanded_range() {
    let sorted = numerically_sorted(expand_hostlist("node[1-10]").unwrap());
    let expected: Vec<String> = (1..=10).map(|i| format!("node{i}")).collect();

    assert_eq!(sorted, expected);
}

#[test]
fn width_is_preserved_both_ways() {
    let hosts = expand_hostlist("n[01-03]").unwrap();
    assert_eq!(hosts, vec!["n01", "n02", "n03"]);

    assert_eq!(collapse_hostlist(&hosts, None).unwrap(), "n[01-03]");
}
