use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use nlquery::NlqError;
use serde_json::json;
use tracing::error;

/// A custom error type for the server application.
///
/// This enum encapsulates the different kinds of errors that can occur while
/// serving a request, allowing each to be converted into an appropriate HTTP
/// response with a `{"success": false, "error": ...}` body.
pub enum AppError {
    /// Client-side request errors, e.g. a missing or blank question.
    BadRequest(String),
    /// Errors originating from the `nlquery` pipeline.
    Nlq(NlqError),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

impl From<NlqError> for AppError {
    fn from(err: NlqError) -> Self {
        AppError::Nlq(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::Nlq(err) => {
                // Log the original error for debugging purposes.
                error!("NlqError: {:?}", err);
                match err {
                    NlqError::MissingAiProvider | NlqError::MissingStorageProvider => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Server is not configured correctly.".to_string(),
                    ),
                    NlqError::AiRequest(e) => (
                        StatusCode::BAD_GATEWAY,
                        format!("Request to AI provider failed: {e}"),
                    ),
                    NlqError::AiDeserialization(e) => (
                        StatusCode::BAD_GATEWAY,
                        format!("Failed to deserialize AI provider response: {e}"),
                    ),
                    NlqError::AiApi(e) => {
                        (StatusCode::BAD_GATEWAY, format!("AI provider error: {e}"))
                    }
                    NlqError::StorageConnection(e) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Storage provider connection error: {e}"),
                    ),
                    NlqError::StorageQueryFailed(e) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Storage query execution failed: {e}"),
                    ),
                    NlqError::EmptyQuery => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "The question did not produce a readonly query.".to_string(),
                    ),
                    NlqError::Regex(e) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Internal regex error: {e}"),
                    ),
                    NlqError::JsonSerialization(e) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Failed to serialize result: {e}"),
                    ),
                    NlqError::ReqwestClientBuild(e) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Failed to build HTTP client: {e}"),
                    ),
                }
            }
            AppError::Internal(err) => {
                error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "success": false,
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}
