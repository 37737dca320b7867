// POST /functions/v1/analyzeSentiment handler

use std::convert::Infallible;
use tracing::info;
use warp::http::StatusCode;
use warp::Reply;

use super::AppState;
use crate::models::SentimentRequest;

pub async fn analyze_sentiment_handler(
    state: AppState,
    request: SentimentRequest,
) -> Result<warp::reply::Response, Infallible> {
    match state.classifier.classify(request.text.as_deref()).await {
        Ok(result) => {
            info!(mood_label = %result.mood_label, mood_score = %result.mood_score, "Sentiment classified");
            Ok(warp::reply::with_status(warp::reply::json(&result), StatusCode::OK).into_response())
        }
        Err(e) => Ok(e.into_response()),
    }
}
