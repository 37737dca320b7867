// Handlers module

pub mod analyze_sentiment;
pub mod chat_coach;

pub use analyze_sentiment::analyze_sentiment_handler;
pub use chat_coach::chat_coach_handler;

use std::sync::Arc;
use std::time::Duration;

use crate::coach::CoachRelay;
use crate::llm::LlmProvider;
use crate::sentiment::SentimentClassifier;

/// Everything a request needs, cloned into each one
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<SentimentClassifier>,
    pub coach: Arc<CoachRelay>,
    /// Gap between streamed chat tokens
    pub token_interval: Duration,
}

impl AppState {
    pub fn new(provider: Arc<dyn LlmProvider>, token_interval: Duration) -> Self {
        Self {
            classifier: Arc::new(SentimentClassifier::new(provider.clone())),
            coach: Arc::new(CoachRelay::new(provider)),
            token_interval,
        }
    }
}
