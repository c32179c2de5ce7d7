//! Scripted backends for tests and offline runs.

use crate::{AssistantError, ChatMessage, LanguageModel, Result, SpeechSynthesizer};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::path::Path;

enum Script {
    Reply(String),
    Fail(String),
}

/// Replies from a queue; the last entry repeats once the queue is drained.
pub struct MockModel {
    script: Mutex<VecDeque<Script>>,
    configured: bool,
    requests: Mutex<Vec<Vec<ChatMessage>>>,
}

impl MockModel {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self::from_script(vec![Script::Reply(reply.into())])
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::from_script(vec![Script::Fail(message.into())])
    }

    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_script(replies.into_iter().map(|r| Script::Reply(r.into())).collect())
    }

    /// Behaves like a backend with no API key.
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::from_script(Vec::new())
        }
    }

    fn from_script(script: Vec<Script>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            configured: true,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every message list passed to `complete`, in call order.
    pub fn requests(&self) -> Vec<Vec<ChatMessage>> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl LanguageModel for MockModel {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        if !self.configured {
            return Err(AssistantError::NotConfigured);
        }
        self.requests.lock().push(messages.to_vec());
        let mut script = self.script.lock();
        let step = if script.len() > 1 {
            script.pop_front()
        } else {
            script.front().map(|s| match s {
                Script::Reply(r) => Script::Reply(r.clone()),
                Script::Fail(m) => Script::Fail(m.clone()),
            })
        };
        match step {
            Some(Script::Reply(reply)) => Ok(reply),
            Some(Script::Fail(message)) => Err(AssistantError::Model(message)),
            None => Err(AssistantError::EmptyReply),
        }
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Writes a small placeholder file instead of real audio.
#[derive(Default)]
pub struct MockSpeech {
    spoken: Mutex<Vec<String>>,
}

impl MockSpeech {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().clone()
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSpeech {
    async fn synthesize(&self, text: &str, out_path: &Path) -> Result<()> {
        tokio::fs::write(out_path, b"ID3mock").await?;
        self.spoken.lock().push(text.to_string());
        Ok(())
    }

    fn voice(&self) -> &str {
        "mock"
    }
}
