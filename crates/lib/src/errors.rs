use thiserror::Error;

/// Custom error types for the question-to-analysis pipeline.
#[derive(Error, Debug)]
pub enum NlqError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Request to AI provider failed: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI provider returned an error: {0}")]
    AiApi(String),
    #[error("Storage provider connection error: {0}")]
    StorageConnection(String),
    #[error("Storage query execution failed: {0}")]
    StorageQueryFailed(String),
    #[error("The question did not produce a readonly query")]
    EmptyQuery,
    #[error("AI provider is missing")]
    MissingAiProvider,
    #[error("Storage provider is missing")]
    MissingStorageProvider,
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}
