//! Mapping between abstraction types and Gemini types

use crate::llm::core::{
    config::GenerationConfig,
    types::{FinishReason, GenerateRequest, Generation, Message, MessageRole, UsageMetadata},
};

use super::types::{
    Content, GeminiGenerationConfig, GenerateContentRequest, GenerateContentResponse, Part,
};

/// Convert our abstraction request to Gemini's request format
pub fn to_gemini_request(request: GenerateRequest) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: request.messages.into_iter().map(to_gemini_content).collect(),
        generation_config: Some(to_gemini_generation_config(request.config)),
    }
}

/// Convert a message to Gemini's content format
fn to_gemini_content(message: Message) -> Content {
    let role = match message.role {
        MessageRole::User => "user",
        MessageRole::Assistant => "model",
    };

    Content {
        role: role.to_string(),
        parts: vec![Part::Text { text: message.text }],
    }
}

/// Convert generation config to Gemini's format
fn to_gemini_generation_config(config: GenerationConfig) -> GeminiGenerationConfig {
    GeminiGenerationConfig {
        max_output_tokens: Some(config.max_tokens),
        temperature: config.temperature,
    }
}

/// Convert a Gemini response into a single [`Generation`]
///
/// Only the first candidate is considered. Its text parts are joined in
/// order; a candidate with no text parts yields `text: None`. A prompt that
/// was blocked before generation reports the block reason as the finish reason.
pub fn from_gemini_response(response: GenerateContentResponse) -> Generation {
    let usage = response.usage_metadata.map(|usage| UsageMetadata {
        input_tokens: usage.prompt_token_count,
        output_tokens: usage.candidates_token_count,
        total_tokens: usage.total_token_count,
    });

    let Some(candidate) = response.candidates.into_iter().next() else {
        let finish_reason = response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
            .map(|reason| map_finish_reason(&reason));
        return Generation {
            text: None,
            finish_reason,
            usage,
        };
    };

    let texts: Vec<String> = candidate
        .content
        .map(|content| content.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|part| match part {
            Part::Text { text } => Some(text),
            Part::Other(_) => None,
        })
        .collect();

    Generation {
        text: (!texts.is_empty()).then(|| texts.concat()),
        finish_reason: candidate.finish_reason.as_deref().map(map_finish_reason),
        usage,
    }
}

/// Map Gemini's finish reason to our abstraction
fn map_finish_reason(reason: &str) -> FinishReason {
    match reason {
        "STOP" => FinishReason::Stop,
        "MAX_TOKENS" => FinishReason::MaxTokens,
        "SAFETY" => FinishReason::Safety,
        "RECITATION" => FinishReason::Recitation,
        other => FinishReason::Other(other.to_string()),
    }
}
