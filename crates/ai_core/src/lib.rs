//! AI Core - Remote fable generation
//!
//! Provides the prompt builder and a client for OpenAI-compatible
//! chat-completion APIs.

pub mod config;
pub mod error;
pub mod openai;
pub mod ports;
pub mod prompt;

pub use config::GenerationConfig;
pub use error::GenerationError;
pub use openai::OpenAiFableClient;
pub use ports::TextGenerator;
pub use prompt::FablePrompt;
