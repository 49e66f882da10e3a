//! # HTML Quality Gate Tests
//!
//! Validates the fixed scoring checklist applied to generated report pages
//! and the fence-stripping applied to raw model responses.

use nlquery::html::{strip_html_fences, validate_html};

const GOOD_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <script src="https://cdnjs.cloudflare.com/ajax/libs/Chart.js/3.9.1/chart.min.js"></script>
</head>
<body>
    <canvas id="chart"></canvas>
    <script>
        const ctx = document.getElementById('chart').getContext('2d');
        new Chart(ctx, { type: 'bar', data: { labels: [], datasets: [] } });
    </script>
</body>
</html>"#;

/// A complete, clean page scores the full 100 points.
#[test]
fn test_clean_page_scores_full() {
    let validation = validate_html(GOOD_PAGE);
    assert!(validation.is_valid);
    assert!(validation.issues.is_empty());
    assert_eq!(validation.score, 100);
}

/// A missing DOCTYPE costs one issue.
#[test]
fn test_missing_doctype_is_flagged() {
    let validation = validate_html("<html><body>hi</body></html>");
    assert!(!validation.is_valid);
    assert_eq!(validation.score, 80);
    assert!(validation.issues[0].contains("DOCTYPE"));
}

/// Mentioning Chart.js without the CDN reference is flagged.
#[test]
fn test_chart_js_without_cdn_is_flagged() {
    let html = "<!DOCTYPE html><html><body>Chart.js powered</body></html>";
    let validation = validate_html(html);
    assert_eq!(validation.score, 80);
    assert!(validation.issues[0].contains("CDN"));
}

/// Each disallowed script pattern is flagged separately.
#[test]
fn test_disallowed_patterns_are_flagged() {
    let html = "<!DOCTYPE html><script>eval(code); el.innerHTML = x;</script>";
    let validation = validate_html(html);
    assert_eq!(validation.issues.len(), 2);
    assert_eq!(validation.score, 60);
}

/// A chart constructor call without a context variable is flagged.
#[test]
fn test_chart_without_context_is_flagged() {
    let html = "<!DOCTYPE html><script>new Chart(document.body, {});</script>";
    let validation = validate_html(html);
    assert!(validation
        .issues
        .iter()
        .any(|issue| issue.contains("context")));
}

/// The score never goes below zero, however bad the page.
#[test]
fn test_score_floors_at_zero() {
    let html = "Chart.js document.location window.location eval( innerHTML new Chart(";
    let validation = validate_html(html);
    assert!(validation.issues.len() >= 6);
    assert_eq!(validation.score, 0);
}

/// Responses already starting at the document root pass through untouched.
#[test]
fn test_bare_html_passes_through() {
    assert_eq!(strip_html_fences(GOOD_PAGE), GOOD_PAGE);
}

/// An ```html fence around the document is stripped.
#[test]
fn test_html_fence_is_stripped() {
    let raw = "```html\n<!DOCTYPE html><html></html>\n```";
    assert_eq!(strip_html_fences(raw), "<!DOCTYPE html><html></html>");
}

/// A plain ``` fence is stripped too.
#[test]
fn test_plain_fence_is_stripped() {
    let raw = "Here is the page:\n```\n<!DOCTYPE html><html></html>\n```";
    assert_eq!(strip_html_fences(raw), "<!DOCTYPE html><html></html>");
}

/// An unterminated fence still yields the body after the fence marker.
#[test]
fn test_unterminated_fence_yields_rest() {
    let raw = "```html\n<!DOCTYPE html><html></html>";
    assert_eq!(strip_html_fences(raw), "<!DOCTYPE html><html></html>");
}
