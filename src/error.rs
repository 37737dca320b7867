// Error envelope shared by every endpoint

use thiserror::Error;
use tracing::{error, warn};
use warp::http::StatusCode;
use warp::Reply;

use crate::llm::LlmError;
use crate::models::ErrorBody;

/// Failures a handler turns into an `{ "error": ... }` response
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required field is missing or blank
    #[error("{0}")]
    Validation(String),

    /// The body could not be read as the expected JSON
    #[error("Invalid request body: {0}")]
    BadRequest(String),

    /// The provider call failed
    #[error("Provider request failed: {0}")]
    Upstream(#[from] LlmError),
}

impl warp::reject::Reject for ApiError {}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn into_response(self) -> warp::reply::Response {
        match &self {
            ApiError::Upstream(e) => error!(error = %e, "Upstream failure"),
            other => warn!(error = %other, "Rejected request"),
        }
        error_reply(self.status(), self.to_string())
    }
}

/// Build the JSON error envelope with the given status
pub fn error_reply(status: StatusCode, message: impl Into<String>) -> warp::reply::Response {
    let body = ErrorBody {
        error: message.into(),
    };
    warp::reply::with_status(warp::reply::json(&body), status).into_response()
}
