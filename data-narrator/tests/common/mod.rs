// Shared helpers for integration tests: an in-process stand-in for the
// chat completion and speech endpoints.
#![allow(dead_code)]

use std::io::Cursor;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use data_narrator::config::ApiConfig;

pub const TEST_KEY: &str = "sk-test-key";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: &'static str,
    pub authorization: Option<String>,
    pub body: Value,
}

pub struct MockState {
    pub chat_status: StatusCode,
    pub chat_body: Value,
    pub speech_status: StatusCode,
    pub speech_body: Vec<u8>,
    pub requests: Mutex<Vec<RecordedRequest>>,
}

impl MockState {
    pub fn replying(reply: &str, audio: Vec<u8>) -> Self {
        Self {
            chat_status: StatusCode::OK,
            chat_body: json!({
                "id": "chatcmpl-test",
                "object": "chat.completion",
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": reply},
                    "finish_reason": "stop"
                }]
            }),
            speech_status: StatusCode::OK,
            speech_body: audio,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, path: &'static str, headers: &HeaderMap, body: Value) {
        let authorization = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.requests.lock().unwrap().push(RecordedRequest {
            path,
            authorization,
            body,
        });
    }
}

async fn chat_completions(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record("/chat/completions", &headers, body);
    if state.chat_status.is_success() {
        (state.chat_status, Json(state.chat_body.clone())).into_response()
    } else {
        (state.chat_status, state.chat_body.to_string()).into_response()
    }
}

async fn audio_speech(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record("/audio/speech", &headers, body);
    (state.speech_status, state.speech_body.clone()).into_response()
}

/// Serve `state` on an ephemeral port; returns the base URL to configure.
pub async fn spawn_mock(state: MockState) -> (String, Arc<MockState>) {
    let state = Arc::new(state);
    let app = Router::new()
        .route("/v1/chat/completions", post(chat_completions))
        .route("/v1/audio/speech", post(audio_speech))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/v1"), state)
}

pub fn api_config(base_url: &str) -> ApiConfig {
    ApiConfig::new(base_url, TEST_KEY, Duration::from_secs(5))
}

/// A short 16-bit mono WAV file.
pub fn wav_bytes(sample_rate: u32, frames: usize) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for i in 0..frames {
            writer.write_sample(((i % 32) as i16 - 16) * 512).unwrap();
        }
        writer.finalize().unwrap();
    }
    cursor.into_inner()
}
