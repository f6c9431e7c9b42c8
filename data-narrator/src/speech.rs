//! Text-to-speech client.
//!
//! Posts text to `{base_url}/audio/speech` and returns the audio bytes as a
//! base64 [`AudioBlob`].

use std::time::Instant;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{ApiConfig, SpeechConfig};
use crate::error::{Error, Result};

/// Encoded audio as base64 text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioBlob(String);

impl AudioBlob {
    pub fn encode(bytes: &[u8]) -> Self {
        Self(STANDARD.encode(bytes))
    }

    pub fn from_base64(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn decode(&self) -> Result<Vec<u8>> {
        STANDARD
            .decode(&self.0)
            .map_err(|e| Error::Decode(format!("invalid base64 payload: {e}")))
    }
}

#[derive(Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    voice: &'a str,
    input: &'a str,
    response_format: &'a str,
}

pub struct SpeechSynthesizer {
    client: Client,
    api: ApiConfig,
    config: SpeechConfig,
}

impl SpeechSynthesizer {
    pub fn new(api: &ApiConfig, config: &SpeechConfig) -> Result<Self> {
        let client = Client::builder().timeout(api.timeout).build()?;

        Ok(Self {
            client,
            api: api.clone(),
            config: config.clone(),
        })
    }

    pub async fn synthesize(&self, text: &str) -> Result<AudioBlob> {
        let t_start = Instant::now();
        let url = format!("{}/audio/speech", self.api.base_url);
        let body = SpeechRequest {
            model: &self.config.model,
            voice: &self.config.voice,
            input: text,
            response_format: &self.config.response_format,
        };
        debug!(
            "Synthesizing {} chars with {}/{}",
            text.chars().count(),
            self.config.model,
            self.config.voice
        );

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::RemoteService {
                service: "speech synthesis",
                status: status.as_u16(),
                body,
            });
        }

        let audio = resp.bytes().await?;
        let latency_ms = t_start.elapsed().as_secs_f64() * 1000.0;
        info!("Synthesized {} bytes of audio ({latency_ms:.0}ms)", audio.len());

        Ok(AudioBlob::encode(&audio))
    }
}
