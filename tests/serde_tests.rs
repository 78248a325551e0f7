//! Serialization tests for Counter and CounterItem.

#![cfg(all(feature = "serde", feature = "counter"))]

use rstest::rstest;
use tallyflow::counter::{Counter, CounterItem};

#[rstest]
fn counter_serializes_as_value_to_count_map() {
    let counter = Counter::from(["a", "b", "a"]);
    let json: serde_json::Value = serde_json::to_value(&counter).unwrap();
    assert_eq!(json, serde_json::json!({ "a": 2, "b": 1 }));
}

#[rstest]
fn counter_deserializes_with_consistent_total() {
    let counter: Counter<String> = serde_json::from_str(r#"{"x": 3, "y": 1}"#).unwrap();
    assert_eq!(counter.total(), 4);
    assert_eq!(counter.count("x"), 3);
    assert_eq!(counter.most_common_values(1), vec!["x".to_string()]);
}

#[rstest]
fn counter_deserialization_skips_zero_counts() {
    let counter: Counter<String> = serde_json::from_str(r#"{"x": 0, "y": 2}"#).unwrap();
    assert!(!counter.contains("x"));
    assert_eq!(counter.len(), 1);
    assert_eq!(counter.total(), 2);
}

#[cfg(target_pointer_width = "64")]
#[rstest]
#[case::single_entry_then_more(r#"{"a": 18446744073709551615, "b": 1}"#)]
#[case::duplicate_key(r#"{"a": 18446744073709551615, "a": 1}"#)]
fn counter_deserialization_rejects_count_overflow(#[case] json: &str) {
    let result = serde_json::from_str::<Counter<String>>(json);
    let error = result.unwrap_err();
    assert!(error.to_string().contains("count overflow"));
}

#[rstest]
fn counter_round_trips_through_json() {
    let counter = Counter::from(vec![5_u32, 5, 7]);
    let json = serde_json::to_string(&counter).unwrap();
    let restored: Counter<u32> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, counter);
}

#[rstest]
fn counter_item_serializes_fields() {
    let item = CounterItem::new("z", 1);
    let json = serde_json::to_value(item).unwrap();
    assert_eq!(json, serde_json::json!({ "value": "z", "count": 1 }));
}
