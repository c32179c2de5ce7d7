use memory_gate::{RecallReason, StoreReason};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One message in an OpenAI-style chat completion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A completed user/assistant exchange
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationTurn {
    pub user: String,
    pub assistant: String,
    #[serde(with = "time::serde::rfc3339")]
    pub at: OffsetDateTime,
}

impl ConversationTurn {
    pub fn new(user: impl Into<String>, assistant: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            assistant: assistant.into(),
            at: OffsetDateTime::now_utc(),
        }
    }
}

/// Result of [`crate::Assistant::chat`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatOutcome {
    pub reply: String,
    /// Memories folded into the instruction
    pub memory_count: usize,
    pub memory_stored: bool,
    pub store_reason: StoreReason,
    pub recall_reason: RecallReason,
    /// The model failed and `reply` is the fixed apology
    pub degraded: bool,
}
