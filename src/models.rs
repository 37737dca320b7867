// Request and response bodies for the HTTP endpoints

use serde::{Deserialize, Serialize};

use crate::llm::{Message, MessageRole};

// Sentiment

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SentimentRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// Classifier output, passed through from the provider without range checks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub mood_label: String,
    pub mood_score: serde_json::Number,
}

impl SentimentResult {
    /// The result used whenever the provider gives nothing usable
    pub fn neutral() -> Self {
        Self {
            mood_label: MoodLabel::Neutral.as_str().to_string(),
            mood_score: serde_json::Number::from(5),
        }
    }
}

/// Labels the classifier is asked to choose from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodLabel {
    Happy,
    Sad,
    Anxious,
    Neutral,
    Excited,
    Calm,
    Stressed,
}

impl MoodLabel {
    pub const ALL: [MoodLabel; 7] = [
        MoodLabel::Happy,
        MoodLabel::Sad,
        MoodLabel::Anxious,
        MoodLabel::Neutral,
        MoodLabel::Excited,
        MoodLabel::Calm,
        MoodLabel::Stressed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MoodLabel::Happy => "happy",
            MoodLabel::Sad => "sad",
            MoodLabel::Anxious => "anxious",
            MoodLabel::Neutral => "neutral",
            MoodLabel::Excited => "excited",
            MoodLabel::Calm => "calm",
            MoodLabel::Stressed => "stressed",
        }
    }
}

// Chat

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub conversation_history: Vec<ChatTurn>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub mood_history: Vec<MoodSample>,
    /// Journal rows from the client; only their presence matters here
    #[serde(default, deserialize_with = "null_as_empty")]
    pub recent_journal: Vec<serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub active_challenges: Vec<Challenge>,
}

/// One earlier turn of the conversation
///
/// Any role other than `user` is replayed as the coach's side.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatTurn {
    #[serde(default = "assistant_role", deserialize_with = "role_or_assistant")]
    pub role: MessageRole,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
}

impl From<ChatTurn> for Message {
    fn from(turn: ChatTurn) -> Self {
        Message {
            role: turn.role,
            text: turn.content,
        }
    }
}

/// A journal entry's classification, either field may be missing
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MoodSample {
    #[serde(default)]
    pub mood_label: Option<String>,
    #[serde(default)]
    pub mood_score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Challenge {
    #[serde(default)]
    pub description: Option<String>,
}

// Errors

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    null_as_default(deserializer)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn assistant_role() -> MessageRole {
    MessageRole::Assistant
}

fn role_or_assistant<'de, D>(deserializer: D) -> Result<MessageRole, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let role = Option::<String>::deserialize(deserializer)?;
    Ok(match role.as_deref() {
        Some("user") => MessageRole::User,
        _ => MessageRole::Assistant,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sentiment_request_missing_text() {
        let request: SentimentRequest = serde_json::from_value(json!({})).unwrap();
        assert!(request.text.is_none());
    }

    #[test]
    fn test_neutral_result_serialization() {
        let value = serde_json::to_value(SentimentResult::neutral()).unwrap();
        assert_eq!(value, json!({"mood_label": "neutral", "mood_score": 5}));
    }

    #[test]
    fn test_mood_labels() {
        let labels: Vec<&str> = MoodLabel::ALL.iter().map(MoodLabel::as_str).collect();
        assert_eq!(
            labels,
            vec!["happy", "sad", "anxious", "neutral", "excited", "calm", "stressed"]
        );
    }

    #[test]
    fn test_chat_request_full() {
        let request: ChatRequest = serde_json::from_value(json!({
            "message": "I feel tired",
            "conversationHistory": [
                {"role": "user", "content": "Hi"},
                {"role": "assistant", "content": "Hello!"}
            ],
            "moodHistory": [
                {"mood_label": "sad", "mood_score": 3},
                {"mood_label": null, "mood_score": null}
            ],
            "recentJournal": [{"id": "abc", "text": "private"}],
            "activeChallenges": [{"description": "Sleep 8 hours", "progress": 2}]
        }))
        .unwrap();

        assert_eq!(request.message, "I feel tired");
        assert_eq!(request.conversation_history[1].role, MessageRole::Assistant);
        assert_eq!(request.mood_history[0].mood_score, Some(3.0));
        assert_eq!(request.mood_history[1], MoodSample::default());
        assert_eq!(request.recent_journal.len(), 1);
        assert_eq!(
            request.active_challenges[0].description.as_deref(),
            Some("Sleep 8 hours")
        );
    }

    #[test]
    fn test_chat_request_optional_collections() {
        let request: ChatRequest = serde_json::from_value(json!({
            "message": "Hello",
            "moodHistory": null
        }))
        .unwrap();

        assert!(request.conversation_history.is_empty());
        assert!(request.mood_history.is_empty());
        assert!(request.recent_journal.is_empty());
        assert!(request.active_challenges.is_empty());
    }

    #[test]
    fn test_chat_request_tolerates_null_strings() {
        let request: ChatRequest = serde_json::from_value(json!({
            "message": null,
            "conversationHistory": [{"role": "user", "content": null}],
            "activeChallenges": [{"description": null, "title": "Walk daily"}]
        }))
        .unwrap();

        assert_eq!(request.message, "");
        assert_eq!(request.conversation_history[0].content, "");
        assert!(request.active_challenges[0].description.is_none());
    }

    #[test]
    fn test_non_user_roles_replay_as_assistant() {
        let request: ChatRequest = serde_json::from_value(json!({
            "message": "Hi",
            "conversationHistory": [
                {"role": "user", "content": "a"},
                {"role": "system", "content": "b"},
                {"role": "model", "content": "c"},
                {"role": null, "content": "d"},
                {"content": "e"}
            ]
        }))
        .unwrap();

        let roles: Vec<MessageRole> = request
            .conversation_history
            .iter()
            .map(|turn| turn.role)
            .collect();
        assert_eq!(
            roles,
            vec![
                MessageRole::User,
                MessageRole::Assistant,
                MessageRole::Assistant,
                MessageRole::Assistant,
                MessageRole::Assistant,
            ]
        );
    }

    #[test]
    fn test_chat_turn_into_message() {
        let turn = ChatTurn {
            role: MessageRole::Assistant,
            content: "Earlier reply".to_string(),
        };
        assert_eq!(Message::from(turn), Message::assistant("Earlier reply"));
    }
}
