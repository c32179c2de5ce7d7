//! Store / recall decisions over a single utterance

use crate::MemoryGateConfig;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GateError {
    #[error("invalid pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Why an utterance was or was not stored. Evaluated in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreReason {
    Skip,
    TooShort,
    Explicit,
    NoTrigger,
}

impl StoreReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreReason::Skip => "skip",
            StoreReason::TooShort => "too_short",
            StoreReason::Explicit => "explicit",
            StoreReason::NoTrigger => "no_trigger",
        }
    }
}

/// Why memories were or were not recalled. Evaluated in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecallReason {
    ExplicitRecall,
    Skip,
    Default,
    TooShort,
}

impl RecallReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecallReason::ExplicitRecall => "explicit_recall",
            RecallReason::Skip => "skip",
            RecallReason::Default => "default",
            RecallReason::TooShort => "too_short",
        }
    }
}

/// Compiled pattern tables
pub struct MemoryGate {
    config: MemoryGateConfig,
    store: Vec<Regex>,
    recall: Vec<Regex>,
    skip: Vec<Regex>,
}

fn compile(patterns: &[String]) -> Result<Vec<Regex>, GateError> {
    patterns
        .iter()
        .map(|p| {
            RegexBuilder::new(p)
                .case_insensitive(true)
                .build()
                .map_err(|source| GateError::Pattern {
                    pattern: p.clone(),
                    source,
                })
        })
        .collect()
}

impl MemoryGate {
    /// Create a gate from configuration
    pub fn new(config: MemoryGateConfig) -> Result<Self, GateError> {
        let store = compile(&config.store_triggers)?;
        let recall = compile(&config.recall_triggers)?;
        let skip = compile(&config.skip_patterns)?;
        Ok(Self {
            config,
            store,
            recall,
            skip,
        })
    }

    /// Process-wide gate with the default tables.
    ///
    /// The default tables are covered by tests; should they ever fail to compile the
    /// gate degrades to one without patterns, which never stores.
    pub fn shared() -> &'static MemoryGate {
        static GATE: OnceLock<MemoryGate> = OnceLock::new();
        GATE.get_or_init(|| {
            MemoryGate::new(MemoryGateConfig::default()).unwrap_or_else(|e| {
                tracing::error!("default memory gate patterns rejected: {e}");
                MemoryGate {
                    config: MemoryGateConfig::default(),
                    store: Vec::new(),
                    recall: Vec::new(),
                    skip: Vec::new(),
                }
            })
        })
    }

    pub fn config(&self) -> &MemoryGateConfig {
        &self.config
    }

    fn is_skip(&self, text: &str) -> bool {
        self.skip.iter().any(|re| re.is_match(text))
    }

    /// Skip patterns win over the length check, which wins over explicit triggers.
    pub fn should_store(&self, text: &str) -> (bool, StoreReason) {
        let text = text.trim();
        if self.is_skip(text) {
            return (false, StoreReason::Skip);
        }
        if text.chars().count() < self.config.min_store_chars {
            return (false, StoreReason::TooShort);
        }
        if self.store.iter().any(|re| re.is_match(text)) {
            return (true, StoreReason::Explicit);
        }
        (false, StoreReason::NoTrigger)
    }

    /// Explicit recall wins over skip patterns; longer text recalls by default.
    pub fn should_recall(&self, text: &str) -> (bool, RecallReason) {
        let text = text.trim();
        if self.recall.iter().any(|re| re.is_match(text)) {
            return (true, RecallReason::ExplicitRecall);
        }
        if self.is_skip(text) {
            return (false, RecallReason::Skip);
        }
        if text.chars().count() > self.config.min_recall_chars {
            return (true, RecallReason::Default);
        }
        (false, RecallReason::TooShort)
    }

    /// Text after the first matching store trigger, trimmed, in the user's casing.
    /// Returns `text` unchanged when no trigger matches.
    pub fn extract_store_content(&self, text: &str) -> String {
        let trimmed = text.trim();
        for re in &self.store {
            if let Some(m) = re.find(trimmed) {
                return trimmed[m.end()..].trim().to_string();
            }
        }
        text.to_string()
    }
}
