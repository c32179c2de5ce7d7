//! Memory gate for the voice assistant
//!
//! Decides, per utterance, whether it should be written to long-term memory,
//! whether existing memories should be recalled for it, and what part of an
//! explicit "remember this" phrase is worth storing.

mod gate;
mod kind;
mod patterns;

pub use gate::{GateError, MemoryGate, RecallReason, StoreReason};
pub use kind::{classify_memory_kind, MemoryKind};

use serde::{Deserialize, Serialize};

/// Configuration for the memory gate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryGateConfig {
    /// Trimmed utterances shorter than this are never stored
    pub min_store_chars: usize,
    /// Trimmed utterances longer than this are recalled for by default
    pub min_recall_chars: usize,
    /// Anchored phrases that mark an utterance for storage
    pub store_triggers: Vec<String>,
    /// Phrases that explicitly ask about past conversations
    pub recall_triggers: Vec<String>,
    /// Small talk and commands that are never stored or recalled for
    pub skip_patterns: Vec<String>,
}

impl Default for MemoryGateConfig {
    fn default() -> Self {
        let owned = |list: &[&str]| list.iter().map(|p| p.to_string()).collect();
        Self {
            min_store_chars: 10,
            min_recall_chars: 15,
            store_triggers: owned(patterns::STORE_TRIGGERS),
            recall_triggers: owned(patterns::RECALL_TRIGGERS),
            skip_patterns: owned(patterns::SKIP_PATTERNS),
        }
    }
}

/// Should `text` be stored as a memory?
pub fn should_store(text: &str) -> (bool, StoreReason) {
    MemoryGate::shared().should_store(text)
}

/// Should memories be recalled to answer `text`?
pub fn should_recall(text: &str) -> (bool, RecallReason) {
    MemoryGate::shared().should_recall(text)
}

/// The part of `text` following its store trigger.
pub fn extract_store_content(text: &str) -> String {
    MemoryGate::shared().extract_store_content(text)
}
