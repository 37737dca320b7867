//! Wellness-coach chat relay
//!
//! Builds the conversation the provider sees (persona and user context
//! first, then the replayed history, then the new message) and returns the
//! coach's reply. Streaming the reply is left to the handler.

use std::sync::Arc;
use tracing::info;

use crate::error::ApiError;
use crate::llm::{content_or, GenerateRequest, GenerationConfig, LlmProvider, Message};
use crate::models::ChatRequest;
use crate::pacing::word_fragments;

const TEMPERATURE: f32 = 0.7;
const MAX_OUTPUT_TOKENS: u32 = 4096;

/// Sent instead of a reply when the provider answers with nothing usable
pub const FALLBACK_REPLY: &str =
    "I understand you're reaching out. Could you tell me more about what's on your mind today?";

const PERSONA: &str = "You are a compassionate mental wellness coach for the MindTrack app. \n\
                       Provide supportive, encouraging, and actionable advice.";

const JOURNAL_NOTE: &str =
    "Recent journal themes: User has been reflecting on personal growth and daily experiences.";

const CLOSING: &str = "Respond naturally and adapt your response length to what's needed. \
    Give brief acknowledgments when appropriate, but provide comprehensive, detailed advice when \
    the situation calls for it. Elaborate on techniques, strategies, or explanations when it helps \
    the user better understand or apply your guidance. Always be empathetic and supportive.";

/// How many mood labels are quoted back to the model
const RECENT_MOOD_LABELS: usize = 3;

/// What the coach answers with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoachReply {
    /// Text generated by the provider
    Generated(String),
    /// The provider gave nothing usable
    Fallback,
}

impl CoachReply {
    /// Fragments to stream, in order
    ///
    /// Generated text is cut into words; the fallback goes out whole.
    pub fn fragments(&self) -> Vec<String> {
        match self {
            CoachReply::Generated(text) => word_fragments(text),
            CoachReply::Fallback => vec![FALLBACK_REPLY.to_string()],
        }
    }
}

pub struct CoachRelay {
    provider: Arc<dyn LlmProvider>,
}

impl CoachRelay {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Ask the provider for the coach's next reply
    ///
    /// Returns [`CoachReply::Fallback`] when the provider succeeds without usable text.
    ///
    /// # Errors
    /// `ApiError::Upstream` when the provider call fails.
    pub async fn reply(&self, request: &ChatRequest) -> Result<CoachReply, ApiError> {
        info!(
            history = request.conversation_history.len(),
            moods = request.mood_history.len(),
            challenges = request.active_challenges.len(),
            "Relaying coach chat"
        );

        let generate = GenerateRequest {
            messages: build_conversation(request),
            config: GenerationConfig::new(MAX_OUTPUT_TOKENS).with_temperature(TEMPERATURE),
        };
        let generation = self.provider.generate(generate).await?;
        if let Some(usage) = generation.usage {
            info!(
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                "Coach reply generated"
            );
        }

        Ok(content_or(&generation, CoachReply::Fallback, |text| {
            Some(CoachReply::Generated(text.to_string()))
        }))
    }
}

/// Persona plus whatever user context the request carries
pub fn build_context(request: &ChatRequest) -> String {
    let mut context = String::from(PERSONA);

    if !request.mood_history.is_empty() {
        let count = request.mood_history.len();
        let total: f64 = request
            .mood_history
            .iter()
            .map(|m| m.mood_score.unwrap_or(0.0))
            .sum();
        let average = total / count as f64;
        context.push_str(&format!(
            "\n\nUser's recent mood trend: Average score {:.1}/10 over the last {} entries.",
            average, count
        ));

        let recent = request
            .mood_history
            .iter()
            .take(RECENT_MOOD_LABELS)
            .filter_map(|m| m.mood_label.as_deref())
            .filter(|label| !label.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        if !recent.is_empty() {
            context.push_str(&format!("\nRecent moods: {}", recent));
        }
    }

    if !request.recent_journal.is_empty() {
        context.push_str("\n\n");
        context.push_str(JOURNAL_NOTE);
    }

    let challenges = request
        .active_challenges
        .iter()
        .filter_map(|c| c.description.as_deref())
        .filter(|description| !description.trim().is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    if !challenges.is_empty() {
        context.push_str(&format!("\n\nActive challenges: {}", challenges));
    }

    context.push_str("\n\n");
    context.push_str(CLOSING);
    context
}

/// Turns sent to the provider, oldest first
///
/// The provider has no system slot, so the context goes first as a user turn.
pub fn build_conversation(request: &ChatRequest) -> Vec<Message> {
    let mut messages = Vec::with_capacity(request.conversation_history.len() + 2);
    messages.push(Message::user(build_context(request)));
    messages.extend(request.conversation_history.iter().cloned().map(Message::from));
    messages.push(Message::user(request.message.clone()));
    messages
}
