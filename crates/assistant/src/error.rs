use std::time::Duration;
use thiserror::Error;

pub type Result<T, E = AssistantError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("language model is not configured (missing API key)")]
    NotConfigured,
    #[error("language model request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("language model returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("language model returned no reply")]
    EmptyReply,
    #[error("language model error: {0}")]
    Model(String),
    #[error("speech synthesis failed: {0}")]
    Speech(String),
    #[error("speech synthesis timed out after {0:?}")]
    SpeechTimeout(Duration),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
