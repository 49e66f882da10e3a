//! # SQL Extraction Tests
//!
//! Validates the markdown-fence stripping applied to model responses and the
//! readonly-query acceptance check.

use nlquery::{extract_sql, is_readonly_query};

#[test]
fn test_extracts_from_sql_fence() {
    let raw = "```sql\nSELECT COUNT(*) AS total FROM t;\n```";
    assert_eq!(
        extract_sql(raw).unwrap(),
        "SELECT COUNT(*) AS total FROM t;"
    );
}

#[test]
fn test_extracts_from_plain_fence() {
    let raw = "```\nSELECT 1;\n```";
    assert_eq!(extract_sql(raw).unwrap(), "SELECT 1;");
}

#[test]
fn test_unfenced_response_is_trimmed() {
    let raw = "  SELECT event_name FROM t;  \n";
    assert_eq!(extract_sql(raw).unwrap(), "SELECT event_name FROM t;");
}

#[test]
fn test_fence_with_surrounding_prose() {
    let raw = "Here you go:\n```sql\nSELECT 1;\n```\nLet me know if you need more.";
    assert_eq!(extract_sql(raw).unwrap(), "SELECT 1;");
}

#[test]
fn test_select_and_with_are_readonly() {
    assert!(is_readonly_query("SELECT 1;"));
    assert!(is_readonly_query("select 1;"));
    assert!(is_readonly_query(
        "WITH t AS (SELECT 1 AS n) SELECT n FROM t;"
    ));
    assert!(is_readonly_query("  \nSELECT 1;"));
}

#[test]
fn test_mutating_statements_are_rejected() {
    assert!(!is_readonly_query("DROP TABLE events;"));
    assert!(!is_readonly_query("DELETE FROM events;"));
    assert!(!is_readonly_query("I cannot answer that question."));
    assert!(!is_readonly_query(""));
}
