//! # Natural Language to BigQuery Analytics
//!
//! This crate converts natural-language questions about a fixed GA4 events
//! table into BigQuery SQL using a configurable AI provider, executes the
//! query against a storage provider, and analyzes the result set: a
//! per-column statistical profile, a chart recommendation, quick insight
//! strings, and optional model-composed prose or HTML reports.

pub mod analysis;
pub mod errors;
pub mod html;
pub mod prompts;
pub mod providers;
pub mod report;
pub mod schema;
pub mod types;

pub use errors::NlqError;
pub use types::{NlqClient, NlqClientBuilder, QueryOutcome};

use regex::Regex;
use report::{AnalysisReport, HtmlReport};
use tracing::{debug, info};

impl NlqClient {
    /// Converts a question into SQL, executes it, and returns the rows.
    ///
    /// This is the shared front half of every endpoint: `/quick` returns the
    /// outcome as-is, while the analysis endpoints feed the rows into the
    /// profiling pipeline. Failures here (AI or query engine) propagate to
    /// the caller; no partial analysis is computed over absent data.
    pub async fn execute_question(&self, question: &str) -> Result<QueryOutcome, NlqError> {
        let sql = self.generate_sql(question).await?;
        let rows = self.storage_provider.execute_query(&sql).await?;
        Ok(QueryOutcome {
            question: question.to_string(),
            sql,
            rows,
        })
    }

    /// Runs the full structured-analysis pipeline for `/analyze`.
    pub async fn analyze_question(
        &self,
        question: &str,
    ) -> Result<(QueryOutcome, AnalysisReport), NlqError> {
        let outcome = self.execute_question(question).await?;
        let analysis = report::compose_report(
            self.ai_provider.as_ref(),
            question,
            &outcome.sql,
            &outcome.rows,
        )
        .await;
        Ok((outcome, analysis))
    }

    /// Runs the self-contained HTML report pipeline for `/creative-html`.
    pub async fn creative_html(
        &self,
        question: &str,
    ) -> Result<(QueryOutcome, HtmlReport), NlqError> {
        let outcome = self.execute_question(question).await?;
        let page = report::compose_html(
            self.ai_provider.as_ref(),
            question,
            &outcome.sql,
            &outcome.rows,
        )
        .await;
        Ok((outcome, page))
    }

    /// Converts a natural language question into a BigQuery SQL query using
    /// the configured AI provider.
    async fn generate_sql(&self, question: &str) -> Result<String, NlqError> {
        info!("[generate_sql] received question: {question:?}");
        let system_prompt = prompts::sql_generation_system_prompt();

        debug!(system_prompt = %system_prompt, "--> Sending prompts to AI provider");
        let raw_response = self.ai_provider.generate(&system_prompt, question).await?;
        debug!("<-- Query from AI: {raw_response}");

        let query = extract_sql(&raw_response)?;
        if !is_readonly_query(&query) {
            return Err(NlqError::EmptyQuery);
        }
        Ok(query)
    }
}

/// Extracts a SQL query from a model response that may wrap it in markdown
/// code fences.
pub fn extract_sql(raw_response: &str) -> Result<String, NlqError> {
    let re = Regex::new(r"```(?:sql|query)?\n?([\s\S]*?)```")?;
    let query = re
        .captures(raw_response)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_else(|| raw_response.trim().to_string());
    Ok(query)
}

/// A generated query is accepted only if it is readonly.
pub fn is_readonly_query(query: &str) -> bool {
    let upper = query.trim().to_uppercase();
    upper.starts_with("SELECT") || upper.starts_with("WITH")
}
