//! memory-client: long-term memory for the assistant
//!
//! The memory store is an external HTTP service; this crate only produces and
//! consumes records through its API. Without a URL and key the [`DisabledMemory`]
//! backend is used and every call is a silent no-op.

mod types;
pub use types::{MemoryConfig, MemorySnippet, MemoryStats, NewMemory};

mod error;
pub use error::{MemoryError, Result};

mod traits;
pub use traits::MemoryBackend;

mod http;
pub use http::HttpMemoryClient;

mod disabled;
pub use disabled::DisabledMemory;

mod render;
pub use render::{render_memory_context, DEFAULT_CONTEXT_BUDGET};

use std::sync::Arc;

/// Build the backend for an optional configuration.
pub fn create_backend(config: Option<MemoryConfig>) -> Result<Arc<dyn MemoryBackend>> {
    match config {
        Some(config) => {
            tracing::info!("Memory backend enabled at {}", config.base_url);
            Ok(Arc::new(HttpMemoryClient::new(config)?))
        }
        None => {
            tracing::info!("Memory backend not configured; memory features disabled");
            Ok(Arc::new(DisabledMemory))
        }
    }
}
