//! Provider trait for LLM implementations

use async_trait::async_trait;

use super::{
    error::LlmError,
    types::{GenerateRequest, Generation},
};

/// Main interface that all LLM provider implementations must satisfy
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a complete answer from the LLM
    ///
    /// One call maps to exactly one outbound request. A successful call may
    /// still carry no usable text (blocked, or empty output); callers decide
    /// how to degrade, usually through [`content_or`](super::fallback::content_or).
    ///
    /// # Errors
    /// Returns an error on transport failure, timeout, or a non-success status.
    async fn generate(&self, request: GenerateRequest) -> Result<Generation, LlmError>;
}
