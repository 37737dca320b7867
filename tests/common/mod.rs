#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use mindtrack_coach::handlers::AppState;
use mindtrack_coach::llm::{GenerateRequest, Generation, LlmError, LlmProvider};

/// Token gap used by tests, small enough to keep them fast
pub const TEST_TOKEN_INTERVAL: Duration = Duration::from_millis(1);

/// Provider that answers from a script and remembers what it was asked
pub struct ScriptedProvider {
    responses: Mutex<VecDeque<Result<Generation, LlmError>>>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedProvider {
    pub fn new(responses: Vec<Result<Generation, LlmError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// A provider that answers once with `text`
    pub fn replying(text: &str) -> Arc<Self> {
        Self::new(vec![Ok(Generation::text(text))])
    }

    /// A provider whose only call fails with the given status
    pub fn failing(status: u16) -> Arc<Self> {
        Self::new(vec![Err(LlmError::HttpError {
            status,
            body: "upstream exploded".to_string(),
        })])
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn generate(&self, request: GenerateRequest) -> Result<Generation, LlmError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::InvalidRequest("script exhausted".to_string())))
    }
}

pub fn state_with(provider: Arc<ScriptedProvider>) -> AppState {
    AppState::new(provider, TEST_TOKEN_INTERVAL)
}

/// Split an event-stream body into its `data: ` payloads, checking the framing
pub fn sse_payloads(body: &[u8]) -> Vec<String> {
    let body = std::str::from_utf8(body).expect("event stream is UTF-8");
    assert!(body.ends_with("\n\n"), "stream must end with a blank line: {:?}", body);
    body.split("\n\n")
        .filter(|event| !event.is_empty())
        .map(|event| {
            event
                .strip_prefix("data: ")
                .unwrap_or_else(|| panic!("event without `data: ` prefix: {:?}", event))
                .to_string()
        })
        .collect()
}

/// The text fragment carried by one delta payload
pub fn delta_content(payload: &str) -> String {
    let value: serde_json::Value = serde_json::from_str(payload).expect("delta payload is JSON");
    value["choices"][0]["delta"]["content"]
        .as_str()
        .expect("delta carries string content")
        .to_string()
}

/// One-shot HTTP server standing in for the Gemini API
///
/// Answers the first request with `status_line` and `body` after `delay`,
/// then resolves to the raw request it received.
pub async fn spawn_fake_gemini(
    status_line: &'static str,
    body: String,
    delay: Duration,
) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}/v1beta", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;

        tokio::time::sleep(delay).await;

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        // the client may already have hung up after a timeout
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
        request
    });

    (base_url, handle)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// A `generateContent` success body with a single text part
pub fn gemini_text_body(text: &str) -> String {
    serde_json::json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }],
        "usageMetadata": {
            "promptTokenCount": 120,
            "candidatesTokenCount": 30,
            "totalTokenCount": 150
        }
    })
    .to_string()
}
