//! # Report Composition
//!
//! Packages the analysis pipeline's output with model-written prose or HTML.
//! Both composers degrade to deterministic fallbacks when the model call
//! fails or keeps producing pages the quality gate rejects, so a request
//! never fails at this stage.

use crate::{
    analysis::{
        profile, suggest_chart, summarize, ChartConfig, ColumnKind, ColumnProfile, Profile,
    },
    html::{strip_html_fences, validate_html},
    prompts,
    providers::ai::AiProvider,
};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

/// Rows rendered into the fallback HTML table.
const FALLBACK_TABLE_ROWS: usize = 10;
/// Rows considered when extracting Chart.js label/value series.
const CHART_SAMPLE_ROWS: usize = 10;
/// How often a rejected HTML page is regenerated before falling back.
const MAX_HTML_ATTEMPTS: u32 = 2;
/// Minimum quality-gate score an accepted HTML page must reach.
const ACCEPTABLE_HTML_SCORE: u32 = 70;
/// Quality score assigned to the deterministic fallback page.
const FALLBACK_HTML_SCORE: u32 = 60;

/// High-level shape of the result set.
#[derive(Debug, Clone, Serialize)]
pub struct DataOverview {
    pub total_rows: usize,
    pub columns_count: usize,
    pub data_types: BTreeMap<String, ColumnKind>,
}

/// The structured summary returned alongside the prose report.
#[derive(Debug, Clone, Serialize)]
pub struct DataSummary {
    pub overview: DataOverview,
    pub key_statistics: BTreeMap<String, ColumnProfile>,
    pub quick_insights: Vec<String>,
}

/// The `/analyze` payload: a prose report plus the structured summary.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub report: String,
    pub chart_config: Option<ChartConfig>,
    pub data_summary: DataSummary,
}

/// The `/creative-html` payload.
#[derive(Debug, Clone, Serialize)]
pub struct HtmlReport {
    pub html_content: String,
    pub quality_score: u32,
    pub attempts: u32,
    pub issues: Vec<String>,
    pub is_fallback: bool,
}

/// Composes the structured analysis report for one query result.
///
/// The profile, chart recommendation, and quick insights are always computed
/// deterministically; only the prose narrative comes from the model, and a
/// failed model call degrades to a templated fallback instead of an error.
pub async fn compose_report(
    ai_provider: &dyn AiProvider,
    question: &str,
    sql: &str,
    rows: &[Value],
) -> AnalysisReport {
    let data_profile = profile(rows);
    let insights = summarize(&data_profile);
    let columns = column_names(rows);
    let chart_config = suggest_chart(rows, &columns);

    let data_summary = DataSummary {
        overview: DataOverview {
            total_rows: data_profile.row_count,
            columns_count: columns.len(),
            data_types: data_profile
                .columns
                .iter()
                .map(|(name, column)| (name.clone(), column.kind))
                .collect(),
        },
        key_statistics: data_profile.columns.clone(),
        quick_insights: insights.clone(),
    };

    let report = if rows.is_empty() {
        "No data to analyze.".to_string()
    } else {
        let user_prompt =
            prompts::analysis_report_prompt(question, sql, &data_profile, &insights, rows);
        match ai_provider
            .generate(prompts::ANALYSIS_REPORT_SYSTEM_PROMPT, &user_prompt)
            .await
        {
            Ok(text) => text.trim().to_string(),
            Err(error) => {
                warn!("Report generation failed, using the fallback report: {error}");
                fallback_report(question, &data_profile, &insights)
            }
        }
    };

    AnalysisReport {
        report,
        chart_config,
        data_summary,
    }
}

/// Composes a self-contained HTML report for one query result.
///
/// The model's output must pass the quality gate; rejected pages are
/// regenerated up to [`MAX_HTML_ATTEMPTS`] times before the deterministic
/// fallback page is returned. Empty or malformed row sets skip the model
/// entirely.
pub async fn compose_html(
    ai_provider: &dyn AiProvider,
    question: &str,
    sql: &str,
    rows: &[Value],
) -> HtmlReport {
    if rows.is_empty() || rows.first().and_then(Value::as_object).is_none() {
        return HtmlReport {
            html_content: fallback_html(question, rows),
            quality_score: FALLBACK_HTML_SCORE,
            attempts: 1,
            issues: Vec::new(),
            is_fallback: true,
        };
    }

    let columns = column_names(rows);
    let (chart_labels, chart_values) = chart_series(rows, &columns);
    let user_prompt =
        prompts::html_report_prompt(question, sql, rows, &columns, &chart_labels, &chart_values);

    let mut last_issues = Vec::new();
    for attempt in 1..=MAX_HTML_ATTEMPTS {
        match ai_provider
            .generate(prompts::HTML_REPORT_SYSTEM_PROMPT, &user_prompt)
            .await
        {
            Ok(raw) => {
                let html = strip_html_fences(&raw);
                let validation = validate_html(&html);
                if validation.is_valid || validation.score >= ACCEPTABLE_HTML_SCORE {
                    return HtmlReport {
                        html_content: html,
                        quality_score: validation.score,
                        attempts: attempt,
                        issues: validation.issues,
                        is_fallback: false,
                    };
                }
                warn!(
                    score = validation.score,
                    "Generated HTML rejected by the quality gate, retrying"
                );
                last_issues = validation.issues;
            }
            Err(error) => warn!("HTML generation attempt {attempt} failed: {error}"),
        }
    }

    HtmlReport {
        html_content: fallback_html(question, rows),
        quality_score: FALLBACK_HTML_SCORE,
        attempts: MAX_HTML_ATTEMPTS,
        issues: last_issues,
        is_fallback: true,
    }
}

/// Column names in result order, taken from the first object row.
pub fn column_names(rows: &[Value]) -> Vec<String> {
    rows.iter()
        .find_map(Value::as_object)
        .map(|object| object.keys().cloned().collect())
        .unwrap_or_default()
}

/// Chart.js label/value series from the leading two columns of the sample.
/// Labels render as text; values that resist numeric conversion become zero,
/// mirroring what the chart would draw for them anyway.
fn chart_series(rows: &[Value], columns: &[String]) -> (Vec<String>, Vec<f64>) {
    if columns.len() < 2 {
        return (Vec::new(), Vec::new());
    }

    let mut labels = Vec::new();
    let mut values = Vec::new();
    for row in rows.iter().take(CHART_SAMPLE_ROWS) {
        let Some(object) = row.as_object() else {
            continue;
        };
        let label = match object.get(&columns[0]) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
        };
        labels.push(label);

        let value = match object.get(&columns[1]) {
            Some(Value::Number(number)) => number.as_f64().unwrap_or(0.0),
            Some(Value::String(text)) => text.parse().unwrap_or(0.0),
            Some(Value::Bool(flag)) => {
                if *flag {
                    1.0
                } else {
                    0.0
                }
            }
            _ => 0.0,
        };
        values.push(value);
    }
    (labels, values)
}

/// Deterministic prose report used when the model call fails.
fn fallback_report(question: &str, profile: &Profile, insights: &[String]) -> String {
    let mut report = format!(
        "## Data Analysis Report\n\n**Question:** {question}\n\nThe query returned {} records across {} columns.\n",
        profile.row_count,
        profile.columns.len()
    );
    if !insights.is_empty() {
        report.push_str("\n### Key Insights\n");
        for insight in insights {
            report.push_str("- ");
            report.push_str(insight);
            report.push('\n');
        }
    }
    report.push_str(
        "\n_The narrative report could not be generated; the figures above were computed directly from the query result._\n",
    );
    report
}

/// Deterministic HTML page used when generation fails or keeps scoring below
/// the acceptance threshold. Renders the first rows as a plain table.
pub fn fallback_html(question: &str, rows: &[Value]) -> String {
    let row_count = rows.len();
    let table = match rows.iter().find_map(Value::as_object) {
        Some(first) => {
            let headers: Vec<&String> = first.keys().collect();
            let head = headers
                .iter()
                .map(|column| format!("<th>{}</th>", escape_html(column)))
                .collect::<String>();
            let body = rows
                .iter()
                .take(FALLBACK_TABLE_ROWS)
                .filter_map(Value::as_object)
                .map(|row| {
                    let cells = headers
                        .iter()
                        .map(|column| {
                            let text = match row.get(*column) {
                                None | Some(Value::Null) => String::new(),
                                Some(Value::String(text)) => text.clone(),
                                Some(other) => other.to_string(),
                            };
                            format!("<td>{}</td>", escape_html(&text))
                        })
                        .collect::<String>();
                    format!("<tr>{cells}</tr>")
                })
                .collect::<String>();
            format!(
                "<table class=\"data-table\"><thead><tr>{head}</tr></thead><tbody>{body}</tbody></table>"
            )
        }
        None => "<p>No data to display.</p>".to_string(),
    };

    let question = escape_html(question);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{question} - Analysis Result</title>
    <style>
        body {{ font-family: 'Segoe UI', sans-serif; margin: 0; padding: 20px; background: #f5f5f5; }}
        .container {{ max-width: 800px; margin: 0 auto; background: white; border-radius: 12px; padding: 30px; box-shadow: 0 4px 12px rgba(0,0,0,0.1); }}
        .header {{ text-align: center; margin-bottom: 30px; color: #333; }}
        .data-table {{ width: 100%; border-collapse: collapse; margin: 20px 0; }}
        .data-table th {{ background: #4285f4; color: white; padding: 12px; text-align: left; }}
        .data-table td {{ padding: 10px; border-bottom: 1px solid #ddd; }}
        .summary {{ background: #f8f9fa; padding: 15px; border-radius: 8px; margin: 20px 0; }}
        .warning {{ background: #fff3cd; padding: 15px; border-radius: 8px; margin: 20px 0; border-left: 4px solid #ffc107; }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>{question}</h1>
            <p>GA4 analysis result &bull; {row_count} records</p>
        </div>
        <div class="warning">
            <h3>Basic report</h3>
            <p>The rich HTML report could not be generated; showing the plain result instead.</p>
        </div>
        <div class="summary">
            <h3>Data summary</h3>
            <p>The query returned {row_count} records.</p>
        </div>
        {table}
        <div class="summary">
            <p><em>For a deeper breakdown, try the structured analysis mode.</em></p>
        </div>
    </div>
</body>
</html>
"#
    )
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
