//! # Report Composer Tests
//!
//! Validates the composition of the structured analysis report and the HTML
//! report against fake AI providers: the happy paths, the quality-gate retry
//! loop, and every fallback route.

use async_trait::async_trait;
use nlquery::{
    analysis::{ChartType, ColumnKind},
    errors::NlqError,
    providers::ai::AiProvider,
    report::{compose_html, compose_report, fallback_html},
};
use serde_json::{json, Value};

/// An AI fake that always returns the same reply.
#[derive(Clone, Debug)]
struct StaticAi {
    reply: String,
}

#[async_trait]
impl AiProvider for StaticAi {
    async fn generate(&self, _system: &str, _user: &str) -> Result<String, NlqError> {
        Ok(self.reply.clone())
    }
}

/// An AI fake that always fails.
#[derive(Clone, Debug)]
struct FailingAi;

#[async_trait]
impl AiProvider for FailingAi {
    async fn generate(&self, _system: &str, _user: &str) -> Result<String, NlqError> {
        Err(NlqError::AiApi("model unavailable".to_string()))
    }
}

fn city_rows() -> Vec<Value> {
    vec![
        json!({"city": "Seoul", "count": 10}),
        json!({"city": "Busan", "count": 5}),
    ]
}

const VALID_PAGE: &str = "<!DOCTYPE html>\n<html><body>report</body></html>";

#[tokio::test]
async fn test_compose_report_packages_analysis() {
    let ai = StaticAi {
        reply: "## Model Report".to_string(),
    };
    let rows = city_rows();
    let report = compose_report(&ai, "visits per city", "SELECT 1;", &rows).await;

    assert_eq!(report.report, "## Model Report");

    let chart = report.chart_config.expect("a chart recommendation");
    assert_eq!(chart.chart_type, ChartType::Bar);
    assert_eq!(chart.label_column, "city");

    let overview = &report.data_summary.overview;
    assert_eq!(overview.total_rows, 2);
    assert_eq!(overview.columns_count, 2);
    assert_eq!(overview.data_types["count"], ColumnKind::Numeric);
    assert_eq!(overview.data_types["city"], ColumnKind::Categorical);

    assert!(report.data_summary.key_statistics.contains_key("count"));
    // Two rows is a small dataset, so at least the size insight fires.
    assert!(!report.data_summary.quick_insights.is_empty());
}

#[tokio::test]
async fn test_compose_report_falls_back_when_model_fails() {
    let rows = city_rows();
    let report = compose_report(&FailingAi, "visits per city", "SELECT 1;", &rows).await;

    assert!(report.report.contains("Data Analysis Report"));
    assert!(report.report.contains("visits per city"));
    // The deterministic parts are unaffected by the model failure.
    assert!(report.chart_config.is_some());
    assert_eq!(report.data_summary.overview.total_rows, 2);
}

#[tokio::test]
async fn test_compose_report_skips_model_for_empty_rows() {
    // FailingAi would surface in the report text if the model were called.
    let report = compose_report(&FailingAi, "anything", "SELECT 1;", &[]).await;

    assert_eq!(report.report, "No data to analyze.");
    assert!(report.chart_config.is_none());
    assert_eq!(report.data_summary.overview.total_rows, 0);
    assert!(report.data_summary.quick_insights.is_empty());
}

#[tokio::test]
async fn test_compose_html_accepts_a_clean_page() {
    let ai = StaticAi {
        reply: VALID_PAGE.to_string(),
    };
    let page = compose_html(&ai, "visits per city", "SELECT 1;", &city_rows()).await;

    assert!(!page.is_fallback);
    assert_eq!(page.quality_score, 100);
    assert_eq!(page.attempts, 1);
    assert_eq!(page.html_content, VALID_PAGE);
    assert!(page.issues.is_empty());
}

#[tokio::test]
async fn test_compose_html_strips_markdown_fences() {
    let ai = StaticAi {
        reply: format!("```html\n{VALID_PAGE}\n```"),
    };
    let page = compose_html(&ai, "visits per city", "SELECT 1;", &city_rows()).await;

    assert!(!page.is_fallback);
    assert!(page.html_content.starts_with("<!DOCTYPE html>"));
}

#[tokio::test]
async fn test_compose_html_falls_back_after_repeated_rejections() {
    // Missing DOCTYPE plus two disallowed patterns: 40 points, under the
    // acceptance threshold on every attempt.
    let ai = StaticAi {
        reply: "<div>eval(payload); el.innerHTML = x;</div>".to_string(),
    };
    let page = compose_html(&ai, "visits per city", "SELECT 1;", &city_rows()).await;

    assert!(page.is_fallback);
    assert_eq!(page.quality_score, 60);
    assert_eq!(page.attempts, 2);
    assert!(page.html_content.starts_with("<!DOCTYPE html>"));
    assert!(!page.issues.is_empty());
}

#[tokio::test]
async fn test_compose_html_falls_back_when_model_fails() {
    let page = compose_html(&FailingAi, "visits per city", "SELECT 1;", &city_rows()).await;

    assert!(page.is_fallback);
    assert_eq!(page.quality_score, 60);
    assert!(page.html_content.contains("visits per city"));
}

#[tokio::test]
async fn test_compose_html_skips_model_for_empty_rows() {
    let page = compose_html(&FailingAi, "anything", "SELECT 1;", &[]).await;

    assert!(page.is_fallback);
    assert_eq!(page.attempts, 1);
    assert!(page.html_content.contains("No data to display."));
}

#[test]
fn test_fallback_html_renders_a_table() {
    let html = fallback_html("visits per city", &city_rows());

    assert!(html.trim_start().starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<th>city</th>"));
    assert!(html.contains("<td>Seoul</td>"));
    assert!(html.contains("<td>10</td>"));
    assert!(html.contains("2 records"));
}

#[test]
fn test_fallback_html_escapes_markup() {
    let html = fallback_html("<script>alert(1)</script>", &[]);
    assert!(html.contains("&lt;script&gt;"));
    assert!(!html.contains("<script>alert"));
}
