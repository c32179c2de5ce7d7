use crate::{MemoryBackend, MemorySnippet, MemoryStats, NewMemory, Result};
use async_trait::async_trait;

/// Backend used when no memory service is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledMemory;

#[async_trait]
impl MemoryBackend for DisabledMemory {
    fn is_enabled(&self) -> bool {
        false
    }

    async fn recall(&self, _query: &str, _limit: usize) -> Result<Vec<MemorySnippet>> {
        Ok(Vec::new())
    }

    async fn remember(&self, _memory: NewMemory) -> Result<()> {
        Ok(())
    }

    async fn context(
        &self,
        _context: &str,
        _max_results: usize,
        _auto_ingest: bool,
    ) -> Result<Vec<MemorySnippet>> {
        Ok(Vec::new())
    }

    async fn stats(&self) -> Result<MemoryStats> {
        Ok(MemoryStats::default())
    }
}
