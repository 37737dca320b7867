//! LLM Abstraction Layer
//!
//! A provider-neutral request/response model plus the Google Gemini client
//! used by the sentiment classifier and the coach relay.

pub mod core;
pub mod gemini;

// Re-export commonly used types
pub use core::{
    config::GenerationConfig,
    error::LlmError,
    fallback::content_or,
    provider::LlmProvider,
    types::{FinishReason, GenerateRequest, Generation, Message, MessageRole, UsageMetadata},
};

pub use gemini::{GeminiClient, GeminiModel};
