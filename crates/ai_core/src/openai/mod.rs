//! OpenAI-compatible chat-completion backend

mod client;

pub use client::OpenAiFableClient;
