use crate::{MemorySnippet, MemoryStats, NewMemory, Result};
use async_trait::async_trait;

/// Long-term memory store
#[async_trait]
pub trait MemoryBackend: Send + Sync {
    /// False for the disabled backend; callers skip memory work entirely.
    fn is_enabled(&self) -> bool;

    /// Up to `limit` memories ranked by semantic similarity to `query`.
    async fn recall(&self, query: &str, limit: usize) -> Result<Vec<MemorySnippet>>;

    async fn remember(&self, memory: NewMemory) -> Result<()>;

    /// Memories relevant to a block of context; `auto_ingest` lets the service
    /// store the context itself.
    async fn context(
        &self,
        context: &str,
        max_results: usize,
        auto_ingest: bool,
    ) -> Result<Vec<MemorySnippet>>;

    async fn stats(&self) -> Result<MemoryStats>;
}
