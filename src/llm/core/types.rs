//! Core types for the LLM abstraction layer

use serde::{Deserialize, Serialize};

use super::config::GenerationConfig;

/// Request to generate content from an LLM
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Conversation turns, oldest first
    pub messages: Vec<Message>,
    /// Generation parameters
    pub config: GenerationConfig,
}

impl GenerateRequest {
    /// Create a request for a single user prompt
    pub fn prompt(text: impl Into<String>, config: GenerationConfig) -> Self {
        Self {
            messages: vec![Message::user(text)],
            config,
        }
    }
}

/// A single message in the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender
    pub role: MessageRole,
    /// Text of the message
    pub text: String,
}

impl Message {
    /// Create a new user message
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            text: text.into(),
        }
    }

    /// Create a new assistant message
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            text: text.into(),
        }
    }
}

/// Role of a message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Human input
    User,
    /// Model output
    Assistant,
}

/// A complete, non-streamed answer from the provider
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Generation {
    /// Generated text, `None` when the provider returned no text part at all
    pub text: Option<String>,
    /// Why generation stopped, if the provider said
    pub finish_reason: Option<FinishReason>,
    /// Token accounting, if the provider reported it
    pub usage: Option<UsageMetadata>,
}

impl Generation {
    /// Create a generation holding the given text
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            finish_reason: Some(FinishReason::Stop),
            usage: None,
        }
    }

    /// Create a generation the provider withheld for the given reason
    pub fn withheld(reason: FinishReason) -> Self {
        Self {
            text: None,
            finish_reason: Some(reason),
            usage: None,
        }
    }

    /// The generated text, if there is any non-blank text to use
    pub fn usable_text(&self) -> Option<&str> {
        self.text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}

/// Reason why generation finished
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural completion
    Stop,
    /// Hit token limit
    MaxTokens,
    /// Blocked by safety filters
    Safety,
    /// Blocked for reciting source material
    Recitation,
    /// Provider-specific reason
    Other(String),
}

impl FinishReason {
    /// Whether the provider withheld content on policy grounds
    pub fn is_blocked(&self) -> bool {
        matches!(self, FinishReason::Safety | FinishReason::Recitation)
    }
}

/// Token usage information
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageMetadata {
    /// Prompt tokens consumed
    pub input_tokens: u32,
    /// Response tokens generated
    pub output_tokens: u32,
    /// Sum of input and output
    pub total_tokens: u32,
}
