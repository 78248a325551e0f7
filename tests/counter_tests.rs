//! Unit tests for Counter.
//!
//! Covers construction, count lookup, removal, the memoized sorted views
//! and their invalidation on every mutating operation.

#![cfg(feature = "counter")]

use rstest::{fixture, rstest};
use static_assertions::{assert_impl_all, assert_not_impl_any};
use tallyflow::counter::{Counter, CounterItem};

assert_impl_all!(Counter<String>: Send, Clone, Default);
assert_not_impl_any!(Counter<String>: Sync);

#[fixture]
fn letters() -> Counter<&'static str> {
    let source = vec![
        "a", "b", "c", "d", "e", "f", "g", "h", "i", "a", "b", "c", "d", "e", "f", "g", "h", "i",
        "a", "b", "z",
    ];
    Counter::from(source)
}

// =============================================================================
// Construction and Lookup
// =============================================================================

#[rstest]
fn test_letters_scenario_totals(letters: Counter<&'static str>) {
    assert_eq!(letters.total(), 21);
    assert_eq!(letters.len(), 10);
    assert_eq!(letters.count("a"), 3);
    assert_eq!(letters.count("b"), 3);
    assert_eq!(letters.count("z"), 1);
}

#[rstest]
fn test_letters_scenario_selection(letters: Counter<&'static str>) {
    let top = letters.most_common(1);
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].value, "b");
    assert_eq!(letters.most_common_values(1), vec!["b"]);

    assert_eq!(letters.least_common(1)[0].value, "z");
    assert_eq!(letters.least_common_values(1), vec!["z"]);
}

#[rstest]
fn test_letters_scenario_views(letters: Counter<&'static str>) {
    let ascending = letters.ascending_values();
    assert_eq!(ascending.first(), Some(&"z"));
    assert_eq!(ascending.last(), Some(&"b"));

    let descending = letters.descending_values();
    assert_eq!(descending.first(), Some(&"b"));
    assert_eq!(descending.last(), Some(&"z"));
}

#[rstest]
fn test_empty_source_yields_zero_total() {
    let counter = Counter::from(Vec::<u32>::new());
    assert_eq!(counter.total(), 0);
    assert!(counter.is_empty());
    assert!(counter.ascending().is_empty());
}

#[rstest]
fn test_owned_keys_accept_borrowed_lookups() {
    let mut counter: Counter<String> = ["x", "y", "x"].iter().map(|s| (*s).to_string()).collect();
    assert_eq!(counter.count("x"), 2);
    assert!(counter.contains("y"));
    assert_eq!(counter.remove("x"), Some(2));
    assert_eq!(counter.total(), 1);
}

#[rstest]
fn test_from_slice_clones_elements() {
    let source = [3_u8, 3, 4];
    let counter = Counter::from(&source[..]);
    assert_eq!(counter.count(&3), 2);
    assert_eq!(counter.count(&4), 1);
}

#[rstest]
fn test_custom_ordered_keys() {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    struct Millis(i64);

    let counter = Counter::from([Millis(1500), Millis(250), Millis(1500)]);
    assert_eq!(counter.most_common_values(1), vec![Millis(1500)]);
}

// =============================================================================
// Removal
// =============================================================================

#[rstest]
#[case("a", 3)]
#[case("e", 2)]
#[case("z", 1)]
fn test_remove_subtracts_full_count(
    mut letters: Counter<&'static str>,
    #[case] value: &'static str,
    #[case] expected: usize,
) {
    let before = letters.total();
    assert_eq!(letters.remove(value), Some(expected));
    assert_eq!(letters.total(), before - expected);
    assert_eq!(letters.count(value), 0);
}

#[rstest]
fn test_remove_missing_is_noop(mut letters: Counter<&'static str>) {
    let snapshot = letters.clone();
    assert_eq!(letters.remove("nope"), None);
    assert_eq!(letters, snapshot);
}

// =============================================================================
// Cache Invalidation
// =============================================================================

#[rstest]
fn test_remove_after_view_built_refreshes_every_view(mut letters: Counter<&'static str>) {
    assert_eq!(letters.most_common_values(1), vec!["b"]);
    assert_eq!(letters.descending_values()[0], "b");

    letters.remove("b");

    assert!(!letters.is_view_built());
    assert_eq!(letters.most_common_values(1), vec!["a"]);
    assert_eq!(letters.descending_values()[0], "a");
    assert!(!letters.ascending_values().contains(&"b"));
}

#[rstest]
fn test_insert_after_view_built_refreshes_view(mut letters: Counter<&'static str>) {
    let _ = letters.ascending();
    letters.insert("q");
    assert!(!letters.is_view_built());
    assert_eq!(letters.least_common_values(2), vec!["q", "z"]);
}

#[rstest]
fn test_extend_after_view_built_refreshes_view(mut letters: Counter<&'static str>) {
    let _ = letters.descending();
    letters.extend(["z", "z", "z"]);
    assert_eq!(letters.most_common(1), &[CounterItem::new("z", 4)]);
    assert_eq!(letters.total(), 24);
}

#[rstest]
fn test_merge_after_view_built_refreshes_view(mut letters: Counter<&'static str>) {
    let _ = letters.ascending();
    let other = Counter::from(["c", "c"]);
    letters.merge(&other);
    assert_eq!(letters.most_common(1), &[CounterItem::new("c", 4)]);
    assert_eq!(letters.total(), 23);
}

#[rstest]
fn test_retain_and_clear_refresh_view(mut letters: Counter<&'static str>) {
    let _ = letters.ascending();
    letters.retain(|_, count| count == 3);
    assert_eq!(letters.ascending_values(), vec!["a", "b"]);
    assert_eq!(letters.total(), 6);

    letters.clear();
    assert!(letters.ascending().is_empty());
    assert!(letters.descending().is_empty());
}

#[rstest]
fn test_reads_reuse_memoized_view(letters: Counter<&'static str>) {
    let first = letters.ascending().as_ptr();
    let _ = letters.most_common(3);
    let _ = letters.least_common_values(2);
    assert_eq!(letters.ascending().as_ptr(), first);
}

#[rstest]
fn test_cloned_counter_views_follow_their_own_table(letters: Counter<&'static str>) {
    assert_eq!(letters.most_common_values(1), vec!["b"]);
    let mut copy = letters.clone();
    assert!(copy.is_view_built());

    copy.insert_many("z", 10);

    assert_eq!(copy.most_common_values(1), vec!["z"]);
    assert_eq!(letters.most_common_values(1), vec!["b"]);
    assert_eq!(letters.count("z"), 1);
}

#[rstest]
fn test_descending_first_still_matches_ascending(letters: Counter<&'static str>) {
    let descending = letters.descending().to_vec();
    let mut ascending = letters.ascending().to_vec();
    ascending.reverse();
    assert_eq!(descending, ascending);
}

// =============================================================================
// Iteration
// =============================================================================

#[rstest]
fn test_into_iter_yields_owned_pairs(letters: Counter<&'static str>) {
    let total: usize = letters.into_iter().map(|(_, count)| count).sum();
    assert_eq!(total, 21);
}

#[rstest]
fn test_ref_into_iter(letters: Counter<&'static str>) {
    let mut distinct = 0;
    for (value, count) in &letters {
        assert_eq!(letters.count(*value), count);
        distinct += 1;
    }
    assert_eq!(distinct, letters.len());
}
