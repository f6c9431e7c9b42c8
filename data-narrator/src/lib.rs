//! data-narrator: send a CSV dataset to a chat model for analysis and read the
//! answer aloud.

pub mod audio;
pub mod chat;
pub mod config;
pub mod conversation;
pub mod dataset;
pub mod error;
pub mod pipeline;
pub mod speech;

pub use error::{Error, Result};
