//! # Question Route Handlers
//!
//! The three question-answering endpoints. They share the same front half
//! (SQL generation and execution) and differ only in how much analysis is
//! layered on the result rows. Report composition never fails a request;
//! upstream SQL or query failures do, as structured errors.

use crate::{
    errors::AppError,
    state::AppState,
    types::{AnalyzeResponse, CreativeHtmlResponse, QuestionRequest, QuickResponse},
};
use axum::{extract::State, Json};
use tracing::info;

/// Rejects a request whose question is missing or blank before any
/// downstream work happens.
fn validated_question(request: &QuestionRequest) -> Result<String, AppError> {
    let question = request.question.trim();
    if question.is_empty() {
        return Err(AppError::BadRequest(
            "The request body requires a non-empty 'question' field.".to_string(),
        ));
    }
    Ok(question.to_string())
}

/// The handler for `/quick`: SQL generation and execution, no analysis.
pub async fn quick_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<QuestionRequest>,
) -> Result<Json<QuickResponse>, AppError> {
    let question = validated_question(&payload)?;
    info!("Received /quick question: '{question}'");

    let outcome = app_state.client.execute_question(&question).await?;

    Ok(Json(QuickResponse {
        success: true,
        mode: "quick",
        original_question: outcome.question,
        generated_sql: outcome.sql,
        row_count: outcome.rows.len(),
        data: outcome.rows,
    }))
}

/// The handler for `/analyze`: adds the structured analysis report, the
/// chart recommendation, and the data summary.
pub async fn analyze_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<QuestionRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let question = validated_question(&payload)?;
    info!("Received /analyze question: '{question}'");

    let (outcome, analysis) = app_state.client.analyze_question(&question).await?;

    Ok(Json(AnalyzeResponse {
        success: true,
        mode: "structured",
        original_question: outcome.question,
        generated_sql: outcome.sql,
        row_count: outcome.rows.len(),
        data: outcome.rows,
        analysis_report: analysis.report,
        chart_config: analysis.chart_config,
        data_summary: analysis.data_summary,
    }))
}

/// The handler for `/creative-html`: returns a self-contained HTML report
/// page, falling back to a plain table page when generation keeps failing
/// the quality gate.
pub async fn creative_html_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<QuestionRequest>,
) -> Result<Json<CreativeHtmlResponse>, AppError> {
    let question = validated_question(&payload)?;
    info!("Received /creative-html question: '{question}'");

    let (outcome, page) = app_state.client.creative_html(&question).await?;

    Ok(Json(CreativeHtmlResponse {
        success: true,
        mode: "creative_html",
        original_question: outcome.question,
        generated_sql: outcome.sql,
        row_count: outcome.rows.len(),
        html_content: page.html_content,
        quality_score: page.quality_score,
        attempts: page.attempts,
        is_fallback: page.is_fallback,
    }))
}
