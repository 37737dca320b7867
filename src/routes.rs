// Route definitions and handlers

use serde::de::DeserializeOwned;
use std::convert::Infallible;
use warp::http::StatusCode;
use warp::{Filter, Rejection};

use crate::error::{error_reply, ApiError};
use crate::handlers::{self, AppState};
use crate::models::{ChatRequest, SentimentRequest};

/// Largest request body accepted, in bytes
const MAX_BODY_BYTES: u64 = 1024 * 1024;

/// Headers the browser client sends with its function calls
const ALLOWED_HEADERS: [&str; 4] = ["authorization", "x-client-info", "apikey", "content-type"];

pub fn configure_routes(
    state: AppState,
) -> impl Filter<Extract = impl warp::Reply, Error = Rejection> + Clone {
    let functions = warp::path("functions").and(warp::path("v1"));

    // POST /functions/v1/analyzeSentiment
    let analyze_sentiment = functions
        .and(warp::path("analyzeSentiment"))
        .and(warp::path::end())
        .and(warp::post())
        .and(with_state(state.clone()))
        .and(json_body::<SentimentRequest>())
        .and_then(handlers::analyze_sentiment_handler);

    // POST /functions/v1/chatCoach
    let chat_coach = functions
        .and(warp::path("chatCoach"))
        .and(warp::path::end())
        .and(warp::post())
        .and(with_state(state))
        .and(json_body::<ChatRequest>())
        .and_then(handlers::chat_coach_handler);

    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods(vec!["POST", "OPTIONS"])
        .allow_headers(ALLOWED_HEADERS);

    analyze_sentiment
        .or(chat_coach)
        .recover(handle_rejection)
        .with(cors)
}

fn with_state(state: AppState) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

/// Decode a JSON body regardless of its declared content type
fn json_body<T>() -> impl Filter<Extract = (T,), Error = Rejection> + Clone
where
    T: DeserializeOwned + Send + 'static,
{
    warp::body::content_length_limit(MAX_BODY_BYTES)
        .and(warp::body::bytes())
        .and_then(|body: bytes::Bytes| async move {
            serde_json::from_slice::<T>(&body)
                .map_err(|e| warp::reject::custom(ApiError::BadRequest(e.to_string())))
        })
}

/// Shape every rejection into the `{ "error": ... }` envelope
pub async fn handle_rejection(err: Rejection) -> Result<warp::reply::Response, Infallible> {
    let (status, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found".to_string())
    } else if let Some(e) = err.find::<ApiError>() {
        (e.status(), e.to_string())
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large".to_string())
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        (StatusCode::LENGTH_REQUIRED, "Content-Length required".to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_string())
    } else {
        tracing::error!(rejection = ?err, "Unhandled rejection");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
        )
    };

    if status.is_client_error() {
        tracing::warn!(status = status.as_u16(), error = %message, "Request rejected");
    }

    Ok(error_reply(status, message))
}
