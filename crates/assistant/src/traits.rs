use crate::{ChatMessage, Result};
use async_trait::async_trait;
use std::path::Path;

/// Chat-completion backend
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Generate the assistant reply for an ordered message list.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;

    /// False when the backend lacks credentials and every call would fail.
    fn is_configured(&self) -> bool {
        true
    }

    fn name(&self) -> &str;
}

/// Text-to-speech backend producing an audio file
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Render `text` to `out_path`, overwriting it.
    async fn synthesize(&self, text: &str, out_path: &Path) -> Result<()>;

    fn voice(&self) -> &str;
}
