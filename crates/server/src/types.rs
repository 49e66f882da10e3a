use nlquery::{analysis::ChartConfig, report::DataSummary};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The request body shared by all question endpoints.
#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    #[serde(default)]
    pub question: String,
}

/// The response body for `/quick`.
#[derive(Serialize)]
pub struct QuickResponse {
    pub success: bool,
    pub mode: &'static str,
    pub original_question: String,
    pub generated_sql: String,
    pub data: Vec<Value>,
    pub row_count: usize,
}

/// The response body for `/analyze`.
#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub mode: &'static str,
    pub original_question: String,
    pub generated_sql: String,
    pub data: Vec<Value>,
    pub row_count: usize,
    pub analysis_report: String,
    pub chart_config: Option<ChartConfig>,
    pub data_summary: DataSummary,
}

/// The response body for `/creative-html`.
#[derive(Serialize)]
pub struct CreativeHtmlResponse {
    pub success: bool,
    pub mode: &'static str,
    pub original_question: String,
    pub generated_sql: String,
    pub row_count: usize,
    pub html_content: String,
    pub quality_score: u32,
    pub attempts: u32,
    pub is_fallback: bool,
}
