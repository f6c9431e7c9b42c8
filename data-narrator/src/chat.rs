//! Chat completion client.
//!
//! Sends the whole conversation to `{base_url}/chat/completions` in a single
//! request and returns a copy of it with the model's reply appended.

use std::time::Instant;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{ApiConfig, ChatConfig};
use crate::conversation::{Conversation, Message};
use crate::error::{Error, Result};

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

pub struct ChatClient {
    client: Client,
    api: ApiConfig,
    config: ChatConfig,
}

impl ChatClient {
    pub fn new(api: &ApiConfig, config: &ChatConfig) -> Result<Self> {
        let client = Client::builder().timeout(api.timeout).build()?;

        Ok(Self {
            client,
            api: api.clone(),
            config: config.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Send `conversation` and return it with one assistant message appended.
    pub async fn send(&self, conversation: &Conversation) -> Result<Conversation> {
        if conversation.reply().is_some() {
            return Err(Error::ConversationClosed);
        }

        let t_start = Instant::now();
        let url = format!("{}/chat/completions", self.api.base_url);
        let body = ChatRequest {
            model: &self.config.model,
            messages: conversation.messages(),
            max_tokens: self.config.max_tokens,
        };
        debug!(
            "Sending {} messages to model '{}'",
            conversation.len(),
            self.config.model
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
                service: "chat completion",
                status: status.as_u16(),
                body,
            });
        }

        let data: ChatResponse = resp.json().await?;
        let reply = data
            .choices
            .into_iter()
            .next()
            .ok_or(Error::EmptyCompletion)?
            .message
            .content
            .filter(|c| !c.trim().is_empty())
            .ok_or(Error::EmptyCompletion)?;

        let latency_ms = t_start.elapsed().as_secs_f64() * 1000.0;
        info!("Chat reply: {} chars ({latency_ms:.0}ms)", reply.chars().count());

        let mut answered = conversation.clone();
        answered.push(Message::assistant(reply));
        Ok(answered)
    }
}
