use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct MemoryConfig {
    /// Service root, e.g. `https://memory.example.org`
    pub base_url: String,
    pub api_key: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl MemoryConfig {
    /// Both parts must be present and non-empty for memory to be enabled.
    pub fn from_parts(base_url: Option<String>, api_key: Option<String>) -> Option<Self> {
        let base_url = base_url.filter(|u| !u.trim().is_empty())?;
        let api_key = api_key.filter(|k| !k.trim().is_empty())?;
        Some(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout: Duration::from_secs(5),
        })
    }
}

/// A memory returned by recall or context queries. Extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemorySnippet {
    pub content: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl MemorySnippet {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind: None,
            tags: Vec::new(),
            score: None,
        }
    }
}

/// Body of `POST /api/remember`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMemory {
    pub content: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub source_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStats {
    #[serde(default)]
    pub total_memories: u64,
}

#[derive(Serialize)]
pub(crate) struct RecallRequest<'a> {
    pub query: &'a str,
    pub limit: usize,
}

#[derive(Serialize)]
pub(crate) struct ContextRequest<'a> {
    pub context: &'a str,
    pub max_results: usize,
    pub auto_ingest: bool,
}

#[derive(Deserialize)]
pub(crate) struct MemoriesResponse {
    #[serde(default)]
    pub memories: Vec<MemorySnippet>,
}
