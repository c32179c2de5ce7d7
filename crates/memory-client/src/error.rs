use thiserror::Error;

pub type Result<T, E = MemoryError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("memory request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("memory service returned {status}: {body}")]
    Status { status: u16, body: String },
}
