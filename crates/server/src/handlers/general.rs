//! # General Route Handlers
//!
//! The root, health check, and schema description endpoints.

use crate::state::AppState;
use axum::{extract::State, Json};
use chrono::Utc;
use nlquery::{providers::db::storage::Storage, schema};
use serde_json::{json, Value};

/// The handler for the root (`/`) endpoint.
pub async fn root() -> &'static str {
    "nlquery server is running."
}

/// The handler for the health check (`/health`) endpoint.
pub async fn health_check(State(app_state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "project_id": app_state.config.project_id,
        "table": schema::full_table_name(),
        "services": {
            "ai": format!("configured ({})", app_state.config.ai_provider),
            "storage": format!("configured ({})", app_state.client.storage_provider.name()),
        },
        "supported_modes": ["quick", "structured", "creative_html"],
    }))
}

/// The handler for the `/schema` endpoint, describing the fixed GA4 table.
pub async fn schema_info(State(app_state): State<AppState>) -> Json<Value> {
    Json(json!({
        "success": true,
        "project_id": app_state.config.project_id,
        "table": schema::full_table_name(),
        "schema": {
            (schema::TABLE_ID): {
                "description": schema::TABLE_DESCRIPTION,
                "columns": schema::COLUMNS,
                "sample_questions": schema::SAMPLE_QUESTIONS,
            }
        },
    }))
}
