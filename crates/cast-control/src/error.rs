use std::time::Duration;
use thiserror::Error;

pub type Result<T, E = ControlError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ControlError {
    #[error("failed to start {program}: {message}")]
    Spawn { program: String, message: String },
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    #[error("cast failed: {0}")]
    CastFailed(String),
}
