//! # Server Configuration
//!
//! Configuration is read from environment variables (optionally seeded from
//! a `.env` file) using the `config` crate and passed explicitly into
//! `build_app_state`. Provider clients and the fixed schema text are the
//! only process-wide data, and both are built once at startup; there are no
//! ambient globals.

use config::{Config as ConfigBuilder, ConfigError, Environment};
use serde::Deserialize;

/// The server's runtime configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// The port for the server to listen on. Loaded from `PORT`.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Which AI provider to use: "anthropic" or "local". Loaded from
    /// `AI_PROVIDER`.
    #[serde(default = "default_ai_provider")]
    pub ai_provider: String,
    /// API key for the Anthropic provider. Loaded from `ANTHROPIC_API_KEY`.
    #[serde(default)]
    pub anthropic_api_key: Option<String>,
    /// Endpoint for the Anthropic provider. Loaded from `ANTHROPIC_API_URL`.
    #[serde(default = "default_anthropic_api_url")]
    pub anthropic_api_url: String,
    /// Model name for the Anthropic provider. Loaded from `ANTHROPIC_MODEL`.
    #[serde(default = "default_anthropic_model")]
    pub anthropic_model: String,
    /// Endpoint for the local OpenAI-compatible provider. Loaded from
    /// `AI_API_URL`; required when `AI_PROVIDER=local`.
    #[serde(default)]
    pub ai_api_url: Option<String>,
    /// Optional API key for the local provider. Loaded from `AI_API_KEY`.
    #[serde(default)]
    pub ai_api_key: Option<String>,
    /// Optional model name for the local provider. Loaded from `AI_MODEL`.
    #[serde(default)]
    pub ai_model: Option<String>,
    /// The Google Cloud project queries are billed to. Loaded from
    /// `PROJECT_ID`.
    #[serde(default = "default_project_id")]
    pub project_id: String,
}

fn default_port() -> u16 {
    8080
}

fn default_ai_provider() -> String {
    "anthropic".to_string()
}

fn default_anthropic_api_url() -> String {
    nlquery::providers::ai::anthropic::DEFAULT_API_URL.to_string()
}

fn default_anthropic_model() -> String {
    nlquery::providers::ai::anthropic::DEFAULT_MODEL.to_string()
}

fn default_project_id() -> String {
    nlquery::schema::PROJECT_ID.to_string()
}

/// Loads the application configuration from the environment.
pub fn get_config() -> Result<Config, ConfigError> {
    ConfigBuilder::builder()
        .add_source(Environment::default())
        .build()?
        .try_deserialize()
}
