use crate::errors::NlqError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use serde_json::Value;
use std::fmt::Debug;

/// A trait for executing SQL against a query engine.
///
/// Implementations return result rows as JSON objects with engine-native
/// types already normalized: temporal values as ISO-8601 text, nested
/// records as objects, and repeated fields as arrays. That row shape is what
/// the analysis pipeline consumes.
#[async_trait]
pub trait Storage: Send + Sync + DynClone + Debug {
    /// Returns the name of the storage provider (e.g., "BigQuery").
    fn name(&self) -> &str;

    /// Executes a SQL query and returns the result rows.
    async fn execute_query(&self, sql: &str) -> Result<Vec<Value>, NlqError>;
}

dyn_clone::clone_trait_object!(Storage);
