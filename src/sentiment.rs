//! Journal-entry mood classification
//!
//! One provider call per entry. Anything short of a transport or status
//! failure produces a result, so a journal save is never blocked on it.

use serde_json::{Number, Value};
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::llm::{content_or, GenerateRequest, GenerationConfig, LlmProvider};
use crate::models::{MoodLabel, SentimentResult};

const TEMPERATURE: f32 = 0.3;
const MAX_OUTPUT_TOKENS: u32 = 300;

pub struct SentimentClassifier {
    provider: Arc<dyn LlmProvider>,
}

impl SentimentClassifier {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Classify one journal entry
    ///
    /// # Errors
    /// `ApiError::Validation` for absent or empty text (no provider call is made), and
    /// `ApiError::Upstream` when the provider call itself fails.
    pub async fn classify(&self, text: Option<&str>) -> Result<SentimentResult, ApiError> {
        let text = match text {
            Some(text) if !text.is_empty() => text,
            _ => return Err(ApiError::Validation("Text is required".to_string())),
        };

        info!(chars = text.chars().count(), "Classifying journal entry");

        let request = GenerateRequest::prompt(
            build_prompt(text),
            GenerationConfig::new(MAX_OUTPUT_TOKENS).with_temperature(TEMPERATURE),
        );
        let generation = self.provider.generate(request).await?;
        if let Some(usage) = generation.usage {
            info!(
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                "Sentiment generated"
            );
        }

        Ok(content_or(
            &generation,
            SentimentResult::neutral(),
            parse_sentiment,
        ))
    }
}

/// The instruction sent to the provider, with the entry appended verbatim
pub fn build_prompt(text: &str) -> String {
    let labels = MoodLabel::ALL
        .iter()
        .map(MoodLabel::as_str)
        .collect::<Vec<_>>()
        .join("|");

    format!(
        "You are a sentiment analysis expert for a mental health journaling app. \n\
         Analyze the given journal entry and respond with ONLY a JSON object in this exact format:\n\
         {{\n  \"mood_label\": \"{labels}\",\n  \"mood_score\": <number 1-10>\n}}\n\n\
         Where:\n\
         - mood_score: 1-3 = very negative, 4-5 = somewhat negative, 6-7 = neutral/ok, 8-9 = positive, 10 = very positive\n\
         - mood_label: choose the most fitting emotion from the list\n\n\
         Respond with ONLY the JSON object, no additional text.\n\n\
         Journal entry: {text}"
    )
}

/// Remove markdown code fences the model sometimes wraps its JSON in
pub fn strip_code_fences(content: &str) -> String {
    content
        .replace("```json\n", "")
        .replace("```json", "")
        .replace("```\n", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Parse the provider's answer, `None` if it is not a usable JSON object
pub fn parse_sentiment(content: &str) -> Option<SentimentResult> {
    let cleaned = strip_code_fences(content);
    let value: Value = match serde_json::from_str(&cleaned) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "Provider returned malformed sentiment JSON");
            return None;
        }
    };

    let object = value.as_object()?;
    let mood_label = match object.get("mood_label") {
        Some(Value::String(label)) => label.clone(),
        other => {
            warn!(mood_label = ?other, "Sentiment JSON has no string mood_label");
            return None;
        }
    };
    let mood_score = match object.get("mood_score").and_then(coerce_number) {
        Some(score) => score,
        None => {
            warn!(mood_score = ?object.get("mood_score"), "Sentiment JSON has no numeric mood_score");
            return None;
        }
    };

    Some(SentimentResult {
        mood_label,
        mood_score,
    })
}

/// Accept a JSON number as-is, or a string holding one
fn coerce_number(value: &Value) -> Option<Number> {
    match value {
        Value::Number(n) => Some(n.clone()),
        Value::String(s) => {
            let s = s.trim();
            if let Ok(n) = s.parse::<i64>() {
                return Some(Number::from(n));
            }
            s.parse::<f64>().ok().and_then(Number::from_f64)
        }
        _ => None,
    }
}
