pub mod anthropic;
pub mod local;

use crate::errors::NlqError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A trait for interacting with an AI provider.
///
/// This defines a common text-in, text-out interface over different Large
/// Language Models. The pipeline uses it for SQL generation and for report
/// composition; providers carry no per-request state.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Generates a response from a given system and user prompt.
    async fn generate(&self, system_prompt: &str, user_prompt: &str)
        -> Result<String, NlqError>;
}

dyn_clone::clone_trait_object!(AiProvider);
