//! Error type shared by every stage of the pipeline.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to access {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse dataset: {0}")]
    Parse(#[from] csv::Error),

    #[error("Failed to parse dataset {}: no header row", .0.display())]
    EmptyDataset(PathBuf),

    #[error("{service} request failed with status {status}: {body}")]
    RemoteService {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("Chat completion returned no choices")]
    EmptyCompletion,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to decode audio: {0}")]
    Decode(String),

    #[error("Audio device error: {0}")]
    Device(String),

    #[error("Missing credential: environment variable {0} is not set")]
    MissingCredential(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Conversation already has an assistant reply")]
    ConversationClosed,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            source,
        }
    }
}
