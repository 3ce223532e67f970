//! Port definitions for text generation
//!
//! Defines the trait that remote generator clients implement.

use async_trait::async_trait;

use crate::{error::GenerationError, prompt::FablePrompt};

/// A backend that turns a fable prompt into text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a fable for the prompt
    async fn generate(&self, prompt: &FablePrompt) -> Result<String, GenerationError>;

    /// Whether the backend has a credential to authenticate with
    fn has_credentials(&self) -> bool;

    /// Model identifier used for requests
    fn model(&self) -> &str;
}
