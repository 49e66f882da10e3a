use crate::{
    errors::NlqError,
    providers::{ai::AiProvider, db::storage::Storage},
};
use serde_json::Value;
use std::fmt;

/// A client that turns natural-language questions into executed queries and
/// analysis. It owns one AI provider and one storage provider, both behind
/// trait objects so callers can swap implementations freely (and tests can
/// inject fakes).
pub struct NlqClient {
    pub ai_provider: Box<dyn AiProvider>,
    pub storage_provider: Box<dyn Storage>,
}

impl fmt::Debug for NlqClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NlqClient")
            .field("storage_provider", &self.storage_provider.name())
            .finish_non_exhaustive()
    }
}

/// A builder for creating `NlqClient` instances.
#[derive(Default)]
pub struct NlqClientBuilder {
    ai_provider: Option<Box<dyn AiProvider>>,
    storage_provider: Option<Box<dyn Storage>>,
}

impl NlqClientBuilder {
    /// Creates a new `NlqClientBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the AI provider.
    pub fn ai_provider(mut self, ai_provider: Box<dyn AiProvider>) -> Self {
        self.ai_provider = Some(ai_provider);
        self
    }

    /// Sets the storage provider.
    pub fn storage_provider(mut self, storage_provider: Box<dyn Storage>) -> Self {
        self.storage_provider = Some(storage_provider);
        self
    }

    /// Builds the `NlqClient`, failing if either provider is missing.
    pub fn build(self) -> Result<NlqClient, NlqError> {
        Ok(NlqClient {
            ai_provider: self.ai_provider.ok_or(NlqError::MissingAiProvider)?,
            storage_provider: self.storage_provider.ok_or(NlqError::MissingStorageProvider)?,
        })
    }
}

/// The outcome of the SQL-generation and execution stages, shared by every
/// endpoint before any analysis is layered on.
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub question: String,
    pub sql: String,
    pub rows: Vec<Value>,
}
