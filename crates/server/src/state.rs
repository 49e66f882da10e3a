//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the
//! logic for building it at startup. The state holds the configuration and
//! the `NlqClient` with its provider clients; everything is constructed once
//! and shared immutably across request handlers.

use crate::config::Config;
use nlquery::{
    providers::{
        ai::{anthropic::AnthropicProvider, local::LocalAiProvider, AiProvider},
        db::bigquery::BigQueryProvider,
    },
    NlqClient, NlqClientBuilder,
};
use std::sync::Arc;

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The server's configuration, loaded from the environment at startup.
    pub config: Arc<Config>,
    /// The client that runs the question-to-analysis pipeline.
    pub client: Arc<NlqClient>,
}

/// Builds the shared application state from the configuration.
///
/// This instantiates the configured AI provider and the BigQuery storage
/// provider, and wires them into an `NlqClient`.
pub async fn build_app_state(config: Config) -> anyhow::Result<AppState> {
    let ai_provider: Box<dyn AiProvider> = match config.ai_provider.as_str() {
        "anthropic" => {
            let api_key = config.anthropic_api_key.clone().ok_or_else(|| {
                anyhow::anyhow!("ANTHROPIC_API_KEY is required for the anthropic provider")
            })?;
            Box::new(AnthropicProvider::new(
                config.anthropic_api_url.clone(),
                api_key,
                config.anthropic_model.clone(),
            )?)
        }
        "local" => {
            let api_url = config.ai_api_url.clone().ok_or_else(|| {
                anyhow::anyhow!("AI_API_URL is required for the local provider")
            })?;
            Box::new(LocalAiProvider::new(
                api_url,
                config.ai_api_key.clone(),
                config.ai_model.clone(),
            )?)
        }
        other => return Err(anyhow::anyhow!("Unsupported AI provider: {other}")),
    };

    let storage_provider = BigQueryProvider::new(config.project_id.clone()).await?;

    let client = NlqClientBuilder::new()
        .ai_provider(ai_provider)
        .storage_provider(Box::new(storage_provider))
        .build()?;

    Ok(AppState {
        config: Arc::new(config),
        client: Arc::new(client),
    })
}
