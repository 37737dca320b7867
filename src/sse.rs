use std::convert::Infallible;
use warp::sse::Event;

/// Marker the client parser treats as end of stream
pub const DONE_SENTINEL: &str = "[DONE]";

/// Create a data-only SSE event carrying one text fragment
pub fn create_delta_event(content: &str) -> Result<Event, Infallible> {
    Ok(data_event(&delta_payload(content)))
}

/// Create the terminal `[DONE]` event
pub fn create_done_event() -> Result<Event, Infallible> {
    Ok(data_event(DONE_SENTINEL))
}

// warp writes the field as `data:<value>`; the browser parser matches on
// `data: `, so the value carries the conventional single leading space.
fn data_event(value: &str) -> Event {
    Event::default().data(format!(" {}", value))
}

/// JSON payload of a delta event, shaped like an OpenAI streaming chunk
pub fn delta_payload(content: &str) -> String {
    serde_json::json!({
        "choices": [{ "delta": { "content": content } }]
    })
    .to_string()
}
