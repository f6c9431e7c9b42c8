//! Configuration management for data-narrator.
//!
//! Loads config from a YAML file in standard locations; every section falls
//! back to documented defaults. The API key is resolved from the environment
//! once, at startup, into an [`ApiConfig`] shared by both remote clients.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::error::{Error, Result};

const TASK_DESCRIPTION: &str = "The objective is to analyze factors contributing to customer churn using a dataset of customers. \
Key attributes include credit score, geographical location, gender, age, tenure, account balance, estimated \
salary, number of products, credit card status, and active member status. \
The aim is to determine how these attributes influence the churn status indicated by the 'exited' column.";

const CONTEXT: &str = "Complete this task and summarize your findings in around 5 concise sentences. \
Do the best with the data given. Use your knowledge to process the data the best you can.";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub path: PathBuf,
    /// Number of data rows sent to the model (header excluded).
    pub row_limit: usize,
    /// Maximum characters per user turn.
    pub chunk_length: usize,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("Churn.csv"),
            row_limit: 100,
            chunk_length: 50,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
    /// Name of the environment variable holding the bearer key.
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".into(),
            api_key_env: "OPENAI_API_KEY".into(),
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub model: String,
    pub max_tokens: u32,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4".into(),
            max_tokens: 400,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    pub model: String,
    pub voice: String,
    pub response_format: String,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            model: "tts-1".into(),
            voice: "alloy".into(),
            response_format: "wav".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Overwritten on every run.
    pub output_path: PathBuf,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("output.wav"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    pub task_description: String,
    pub context: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            task_description: TASK_DESCRIPTION.into(),
            context: CONTEXT.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dataset: DatasetConfig,
    pub api: ApiSettings,
    pub chat: ChatConfig,
    pub speech: SpeechConfig,
    pub playback: PlaybackConfig,
    pub prompts: PromptConfig,
}

impl Config {
    /// Load configuration from YAML file.
    ///
    /// Searches standard locations if no path is provided:
    /// 1. ./config.yaml
    /// 2. ~/.config/data-narrator/config.yaml
    /// 3. /etc/data-narrator/config.yaml
    pub fn load(path: Option<&Path>) -> Self {
        let resolved = path.map(PathBuf::from).or_else(|| {
            let candidates = [
                std::env::current_dir().ok().map(|d| d.join("config.yaml")),
                dirs::home_dir().map(|h| h.join(".config/data-narrator/config.yaml")),
                Some(PathBuf::from("/etc/data-narrator/config.yaml")),
            ];
            candidates.into_iter().flatten().find(|p| p.exists())
        });

        let Some(config_path) = resolved else {
            info!("No config file found, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match Self::from_yaml(&contents) {
                Ok(config) => {
                    info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {e}, using defaults", config_path.display());
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {e}, using defaults", config_path.display());
                Self::default()
            }
        }
    }

    pub fn from_yaml(contents: &str) -> std::result::Result<Self, serde_yml::Error> {
        serde_yml::from_str(contents)
    }
}

/// Connection settings for the remote API, with the key already resolved.
#[derive(Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            timeout,
        }
    }

    /// Read the API key named by `settings.api_key_env` from the environment.
    pub fn from_env(settings: &ApiSettings) -> Result<Self> {
        let api_key = std::env::var(&settings.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::MissingCredential(settings.api_key_env.clone()))?;

        Ok(Self::new(
            settings.base_url.as_str(),
            api_key,
            Duration::from_secs(settings.timeout_secs),
        ))
    }
}
