mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{api_config, spawn_mock, MockState, TEST_KEY};
use data_narrator::config::SpeechConfig;
use data_narrator::speech::SpeechSynthesizer;
use data_narrator::Error;

#[tokio::test]
async fn returns_base64_of_service_bytes() {
    let (base_url, state) = spawn_mock(MockState::replying("", vec![0x00, 0x01])).await;
    let synthesizer = SpeechSynthesizer::new(&api_config(&base_url), &SpeechConfig::default()).unwrap();

    let blob = synthesizer.synthesize("Churn is driven by age.").await.unwrap();

    assert_eq!(blob.as_str(), "AAE=");
    assert_eq!(blob.decode().unwrap(), vec![0x00, 0x01]);

    let requests = state.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/audio/speech");
    assert_eq!(requests[0].authorization.as_deref(), Some(format!("Bearer {TEST_KEY}").as_str()));
    assert_eq!(
        requests[0].body,
        json!({
            "model": "tts-1",
            "voice": "alloy",
            "input": "Churn is driven by age.",
            "response_format": "wav"
        })
    );
}

#[tokio::test]
async fn service_failure_is_remote_service_error() {
    let mut mock = MockState::replying("", b"quota exceeded".to_vec());
    mock.speech_status = StatusCode::TOO_MANY_REQUESTS;
    let (base_url, _state) = spawn_mock(mock).await;
    let synthesizer = SpeechSynthesizer::new(&api_config(&base_url), &SpeechConfig::default()).unwrap();

    let err = synthesizer.synthesize("hello").await.unwrap_err();

    assert!(matches!(
        err,
        Error::RemoteService { status: 429, ref body, .. } if body == "quota exceeded"
    ));
}

#[tokio::test]
async fn unreachable_service_is_http_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let base_url = format!("http://{addr}/v1");
    let synthesizer = SpeechSynthesizer::new(&api_config(&base_url), &SpeechConfig::default()).unwrap();

    let err = synthesizer.synthesize("hello").await.unwrap_err();
    assert!(matches!(err, Error::Http(_)));
}
