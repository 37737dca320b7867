// POST /functions/v1/chatCoach handler

use futures::stream::{self, StreamExt};
use std::convert::Infallible;
use tracing::info;
use warp::Reply;

use super::AppState;
use crate::coach::CoachReply;
use crate::models::ChatRequest;
use crate::pacing::paced;
use crate::sse::{create_delta_event, create_done_event};

pub async fn chat_coach_handler(
    state: AppState,
    request: ChatRequest,
) -> Result<warp::reply::Response, Infallible> {
    // The provider is asked before any byte is streamed, so a failure is a
    // plain JSON error and never a truncated stream.
    let reply = match state.coach.reply(&request).await {
        Ok(reply) => reply,
        Err(e) => return Ok(e.into_response()),
    };

    let fragments = reply.fragments();
    info!(
        fragments = fragments.len(),
        fallback = matches!(reply, CoachReply::Fallback),
        "Streaming coach reply"
    );

    let event_stream = paced(fragments, state.token_interval)
        .map(|fragment| create_delta_event(&fragment))
        .chain(stream::once(async { create_done_event() }));

    Ok(warp::sse::reply(event_stream).into_response())
}
