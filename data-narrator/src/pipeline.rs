//! End-to-end run: dataset → conversation → chat reply → speech → playback.
//!
//! Every step waits for the previous one; the first error ends the run.

use std::path::PathBuf;
use std::time::Instant;

use tracing::info;

use crate::audio::{AudioOutput, AudioPlayer};
use crate::chat::ChatClient;
use crate::config::{ApiConfig, Config, DatasetConfig, PromptConfig};
use crate::conversation;
use crate::dataset;
use crate::error::{Error, Result};
use crate::speech::SpeechSynthesizer;

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub chunks: usize,
    pub messages_sent: usize,
    pub reply: String,
    pub audio_path: PathBuf,
}

pub struct Pipeline<O> {
    dataset: DatasetConfig,
    prompts: PromptConfig,
    chat: ChatClient,
    speech: SpeechSynthesizer,
    player: AudioPlayer<O>,
}

impl<O: AudioOutput> Pipeline<O> {
    pub fn new(config: &Config, api: &ApiConfig, output: O) -> Result<Self> {
        Ok(Self {
            dataset: config.dataset.clone(),
            prompts: config.prompts.clone(),
            chat: ChatClient::new(api, &config.chat)?,
            speech: SpeechSynthesizer::new(api, &config.speech)?,
            player: AudioPlayer::new(&config.playback.output_path, output),
        })
    }

    pub fn player(&self) -> &AudioPlayer<O> {
        &self.player
    }

    pub async fn run(&mut self) -> Result<RunSummary> {
        let t_start = Instant::now();

        let chunks = dataset::load(
            &self.dataset.path,
            self.dataset.row_limit,
            self.dataset.chunk_length,
        )?;

        let conversation = conversation::build(
            &chunks,
            &self.prompts.task_description,
            &self.prompts.context,
        );
        let messages_sent = conversation.len();

        let answered = self.chat.send(&conversation).await?;
        let reply = answered
            .reply()
            .ok_or(Error::EmptyCompletion)?
            .to_string();

        println!("Response from {}: {reply}", self.chat.model());

        let blob = self.speech.synthesize(&reply).await?;

        info!("Playing audio...");
        self.player.play(&blob)?;

        info!(
            "Run complete in {:.1}s",
            t_start.elapsed().as_secs_f64()
        );

        Ok(RunSummary {
            chunks: chunks.len(),
            messages_sent,
            reply,
            audio_path: self.player.output_path().to_path_buf(),
        })
    }
}
