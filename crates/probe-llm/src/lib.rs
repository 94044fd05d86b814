//! Non-streaming chat transport for an Ollama-compatible endpoint.

mod client;
mod error;

pub use client::{ChatRequest, ChatResponse, OllamaClient, DEFAULT_TIMEOUT};
pub use error::LlmError;

pub type Result<T> = std::result::Result<T, LlmError>;
