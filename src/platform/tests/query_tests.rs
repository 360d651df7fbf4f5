//! Tests for query filtering, ordering and value comparison.

use std::cmp::Ordering;

use rstest::rstest;
use serde_json::{Value, json};

use super::record;
use crate::platform::domain::{Direction, Query, compare_values};

#[rstest]
#[case(json!(1), json!(2), Some(Ordering::Less))]
#[case(json!(2.5), json!(2), Some(Ordering::Greater))]
#[case(json!("b"), json!("a"), Some(Ordering::Greater))]
#[case(
    json!("2026-01-01T10:00:00+02:00"),
    json!("2026-01-01T09:00:00Z"),
    Some(Ordering::Less)
)]
#[case(json!(null), json!(null), Some(Ordering::Equal))]
#[case(json!(true), json!(1), None)]
fn compare_values_orders_scalars(
    #[case] left: Value,
    #[case] right: Value,
    #[case] expected: Option<Ordering>,
) {
    assert_eq!(compare_values(&left, &right), expected);
}

#[rstest]
fn filters_skip_rows_with_missing_or_null_columns() {
    let rows = vec![
        record(json!({"id": 1, "owner": "a"})),
        record(json!({"id": 2, "owner": null})),
        record(json!({"id": 3})),
    ];

    let matched = Query::new().eq("owner", "a").apply(&rows);

    assert_eq!(matched, vec![record(json!({"id": 1, "owner": "a"}))]);
}

#[rstest]
fn range_filters_are_inclusive() {
    let rows: Vec<_> = ["2026-03-01", "2026-03-15", "2026-03-31", "2026-04-01"]
        .into_iter()
        .map(|date| record(json!({ "date": date })))
        .collect();

    let matched = Query::new()
        .gte("date", "2026-03-01")
        .lte("date", "2026-03-31")
        .apply(&rows);

    assert_eq!(matched.len(), 3);
}

#[rstest]
fn ordering_places_nulls_last_when_ascending() {
    let rows = vec![
        record(json!({"id": "undated", "due_date": null})),
        record(json!({"id": "late", "due_date": "2026-05-02"})),
        record(json!({"id": "early", "due_date": "2026-05-01"})),
    ];

    let ids: Vec<_> = Query::new()
        .order_by("due_date", Direction::Ascending)
        .apply(&rows)
        .into_iter()
        .filter_map(|row| row.get("id").and_then(Value::as_str).map(str::to_owned))
        .collect();

    assert_eq!(ids, ["early", "late", "undated"]);
}

#[rstest]
fn ordering_is_stable_and_applied_in_sequence() {
    let rows = vec![
        record(json!({"id": 1, "pinned": false, "at": 3})),
        record(json!({"id": 2, "pinned": true, "at": 1})),
        record(json!({"id": 3, "pinned": true, "at": 3})),
        record(json!({"id": 4, "pinned": true, "at": 3})),
    ];

    let ids: Vec<_> = Query::new()
        .order_by("pinned", Direction::Descending)
        .order_by("at", Direction::Descending)
        .limit(3)
        .apply(&rows)
        .into_iter()
        .filter_map(|row| row.get("id").and_then(Value::as_i64))
        .collect();

    assert_eq!(ids, [3, 4, 2]);
}
