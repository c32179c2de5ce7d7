//! assistant: spoken-reply orchestration for the cast panel
//!
//! Ties a [`LanguageModel`], a [`SpeechSynthesizer`], a bounded
//! [`ConversationHistory`] and the memory gate together behind [`Assistant`].

mod types;
pub use types::{ChatMessage, ChatOutcome, ConversationTurn, Role};

mod error;
pub use error::{AssistantError, Result};

mod traits;
pub use traits::{LanguageModel, SpeechSynthesizer};

mod llm_http;
pub use llm_http::{OpenAiCompatConfig, OpenAiCompatModel};

mod tts;
pub use tts::{EdgeTtsConfig, EdgeTtsSynth, DEFAULT_VOICE};

mod history;
pub use history::{ConversationHistory, DEFAULT_MAX_HISTORY};

mod persona;
pub use persona::{system_instruction, APOLOGY, PERSONA};

mod orchestrator;
pub use orchestrator::{Assistant, RECALL_LIMIT, RETAINED_REPLIES};

#[cfg(feature = "mock")]
mod mock;
#[cfg(feature = "mock")]
pub use mock::{MockModel, MockSpeech};
