//! Conversation pipeline: classify, recall, generate, remember.

use crate::{
    system_instruction, AssistantError, ChatMessage, ChatOutcome, ConversationHistory,
    ConversationTurn, LanguageModel, Result, SpeechSynthesizer, APOLOGY,
};
use memory_client::{render_memory_context, MemoryBackend, NewMemory, DEFAULT_CONTEXT_BUDGET};
use memory_gate::{classify_memory_kind, MemoryGate};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Memories recalled per utterance
pub const RECALL_LIMIT: usize = 5;

/// Synthesized replies kept on disk; the latest is cast, the one before may still be fetched.
pub const RETAINED_REPLIES: usize = 2;

const MEMORY_TAGS: [&str; 2] = ["google-home", "voice-assistant"];

pub struct Assistant {
    model: Arc<dyn LanguageModel>,
    speech: Arc<dyn SpeechSynthesizer>,
    memory: Arc<dyn MemoryBackend>,
    gate: &'static MemoryGate,
    history: Mutex<ConversationHistory>,
}

impl Assistant {
    pub fn new(
        model: Arc<dyn LanguageModel>,
        speech: Arc<dyn SpeechSynthesizer>,
        memory: Arc<dyn MemoryBackend>,
        max_history: usize,
    ) -> Self {
        Self {
            model,
            speech,
            memory,
            gate: MemoryGate::shared(),
            history: Mutex::new(ConversationHistory::new(max_history)),
        }
    }

    pub fn model(&self) -> &dyn LanguageModel {
        self.model.as_ref()
    }

    pub fn speech(&self) -> &dyn SpeechSynthesizer {
        self.speech.as_ref()
    }

    pub fn memory(&self) -> &dyn MemoryBackend {
        self.memory.as_ref()
    }

    pub fn history(&self) -> ConversationHistory {
        self.history.lock().clone()
    }

    pub fn clear_history(&self) {
        self.history.lock().clear();
    }

    /// Answer one utterance.
    ///
    /// Only a missing model configuration is returned as an error. Model failures
    /// yield the apology with `degraded` set; memory failures are logged and
    /// treated as "nothing recalled" / "nothing stored".
    pub async fn chat(&self, text: &str, use_memory: bool) -> Result<ChatOutcome> {
        if !self.model.is_configured() {
            return Err(AssistantError::NotConfigured);
        }
        let text = text.trim();
        let (store, store_reason) = self.gate.should_store(text);
        let (recall, recall_reason) = self.gate.should_recall(text);
        let memory_on = use_memory && self.memory.is_enabled();
        debug!(
            "gate: store={store} ({}) recall={recall} ({})",
            store_reason.as_str(),
            recall_reason.as_str()
        );

        let mut memory_count = 0;
        let mut context = String::new();
        if recall && memory_on {
            match self.memory.recall(text, RECALL_LIMIT).await {
                Ok(snippets) => {
                    memory_count = snippets.len();
                    context = render_memory_context(&snippets, DEFAULT_CONTEXT_BUDGET);
                }
                Err(e) => warn!("memory recall failed: {e}"),
            }
        }

        let mut messages = vec![ChatMessage::system(system_instruction(&context))];
        messages.extend(self.history.lock().to_messages());
        messages.push(ChatMessage::user(text));

        let reply = match self.model.complete(&messages).await {
            Ok(reply) => reply,
            Err(AssistantError::NotConfigured) => return Err(AssistantError::NotConfigured),
            Err(e) => {
                warn!("language model failed: {e}");
                return Ok(ChatOutcome {
                    reply: APOLOGY.to_string(),
                    memory_count,
                    memory_stored: false,
                    store_reason,
                    recall_reason,
                    degraded: true,
                });
            }
        };

        self.history.lock().push(ConversationTurn::new(text, reply.clone()));

        let mut memory_stored = false;
        if store && memory_on {
            memory_stored = self.remember(text).await;
        }

        info!(
            "chat answered (memories: {memory_count}, stored: {memory_stored})"
        );
        Ok(ChatOutcome {
            reply,
            memory_count,
            memory_stored,
            store_reason,
            recall_reason,
            degraded: false,
        })
    }

    async fn remember(&self, text: &str) -> bool {
        let content = self.gate.extract_store_content(text);
        if content.is_empty() {
            return false;
        }
        let kind = classify_memory_kind(&content);
        let record = NewMemory {
            content,
            kind: kind.as_str().to_string(),
            source_type: "conversation".to_string(),
            tags: MEMORY_TAGS.iter().map(|t| t.to_string()).collect(),
        };
        match self.memory.remember(record).await {
            Ok(()) => true,
            Err(e) => {
                warn!("memory store failed: {e}");
                false
            }
        }
    }

    /// Synthesize `reply` into a fresh uuid-named mp3 under `dir`.
    ///
    /// Only the newest [`RETAINED_REPLIES`] mp3 files are kept in `dir`.
    pub async fn speak(&self, reply: &str, dir: &Path) -> Result<PathBuf> {
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(format!("{}.mp3", Uuid::new_v4()));
        self.speech.synthesize(reply, &path).await?;
        if let Err(e) = prune_replies(dir, &path, RETAINED_REPLIES).await {
            warn!("failed to prune {}: {e}", dir.display());
        }
        Ok(path)
    }
}

/// Remove older mp3 files from `dir` so that at most `keep` remain, `current` included.
async fn prune_replies(dir: &Path, current: &Path, keep: usize) -> std::io::Result<()> {
    let mut older = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path == current || path.extension().and_then(|e| e.to_str()) != Some("mp3") {
            continue;
        }
        let modified = entry.metadata().await?.modified()?;
        older.push((modified, path));
    }
    older.sort_by(|a, b| b.0.cmp(&a.0));
    for (_, path) in older.into_iter().skip(keep.saturating_sub(1)) {
        debug!("removing old reply {}", path.display());
        tokio::fs::remove_file(&path).await?;
    }
    Ok(())
}
