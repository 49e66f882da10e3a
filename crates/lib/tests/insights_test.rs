//! # Insight Summarizer Tests
//!
//! Validates the size thresholds, the per-column insight triggers, and the
//! ordering of the rendered observations.

use nlquery::analysis::{profile, summarize};
use serde_json::{json, Value};

/// More than 1,000 rows triggers the large-dataset insight with a
/// thousands-separated count.
#[test]
fn test_large_dataset_insight_mentions_count() {
    let rows: Vec<Value> = (0..1500).map(|i| json!({"n": i})).collect();
    let insights = summarize(&profile(&rows));

    assert!(insights[0].contains("Large dataset"));
    assert!(insights[0].contains("1,500"));
}

/// Fewer than 10 rows triggers the small-dataset insight with the exact
/// count.
#[test]
fn test_small_dataset_insight_mentions_count() {
    let rows: Vec<Value> = (0..5).map(|i| json!({"n": i})).collect();
    let insights = summarize(&profile(&rows));

    assert!(insights[0].contains("Small dataset"));
    assert!(insights[0].contains('5'));
}

/// Between 10 and 1,000 rows inclusive there is no size insight.
#[test]
fn test_mid_size_dataset_has_no_size_insight() {
    let rows: Vec<Value> = (0..100).map(|_| json!({"n": 0})).collect();
    let insights = summarize(&profile(&rows));
    assert!(insights.iter().all(|insight| !insight.contains("dataset")));
}

/// A numeric column with a positive sum yields an insight carrying its
/// aggregates.
#[test]
fn test_numeric_insight_carries_aggregates() {
    let rows = vec![
        json!({"amt": 100}),
        json!({"amt": 200}),
        json!({"amt": 50}),
    ];
    let insights = summarize(&profile(&rows));
    let amt = insights
        .iter()
        .find(|insight| insight.starts_with("amt"))
        .expect("an amt insight");

    assert!(amt.contains("350"));
    assert!(amt.contains("116.67"));
    assert!(amt.contains("50"));
    assert!(amt.contains("200"));
}

/// A numeric column summing to zero is not worth an insight.
#[test]
fn test_zero_sum_numeric_column_is_silent() {
    let rows: Vec<Value> = (0..20).map(|_| json!({"n": 0})).collect();
    assert!(summarize(&profile(&rows)).is_empty());
}

/// A categorical column whose values repeat substantially yields a
/// concentration insight with the top value's share.
#[test]
fn test_categorical_concentration_insight() {
    let mut rows: Vec<Value> = (0..8).map(|_| json!({"status": "done"})).collect();
    rows.push(json!({"status": "open"}));
    rows.push(json!({"status": "open"}));

    let insights = summarize(&profile(&rows));
    let status = insights
        .iter()
        .find(|insight| insight.starts_with("status"))
        .expect("a status insight");

    assert!(status.contains("'done'"));
    assert!(status.contains("80%"));
}

/// High-cardinality categorical columns stay silent.
#[test]
fn test_high_cardinality_categorical_is_silent() {
    let rows: Vec<Value> = (0..12).map(|i| json!({"id": format!("u{i}")})).collect();
    let insights = summarize(&profile(&rows));
    assert!(insights.iter().all(|insight| !insight.starts_with("id")));
}

/// An empty row set yields an empty insight sequence.
#[test]
fn test_empty_profile_yields_no_insights() {
    assert!(summarize(&profile(&[])).is_empty());
}

/// The size insight comes first; column insights follow in lexicographic
/// column order.
#[test]
fn test_insight_ordering() {
    let rows: Vec<Value> = (0..5)
        .map(|i| {
            json!({
                "z_num": 10,
                "a_cat": if i == 4 { "rare" } else { "common" },
            })
        })
        .collect();
    let insights = summarize(&profile(&rows));

    assert_eq!(insights.len(), 3);
    assert!(insights[0].contains("Small dataset"));
    assert!(insights[1].starts_with("a_cat"));
    assert!(insights[2].starts_with("z_num"));
}
