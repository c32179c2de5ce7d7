use crate::{PlaybackInfo, SourceKind, SourceState};
use tracing::info;

/// Remembers which logical source we last started on the device.
#[derive(Debug, Default)]
pub struct SourceTracker {
    state: SourceState,
}

impl SourceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new source. Setting `SourceKind::None` is the same as [`clear`](Self::clear).
    pub fn set(&mut self, kind: SourceKind, name: impl Into<String>) {
        if kind == SourceKind::None {
            self.clear();
            return;
        }
        let name = name.into();
        info!(?kind, %name, "source changed");
        self.state = SourceState {
            kind,
            name: Some(name),
        };
    }

    pub fn clear(&mut self) {
        self.state = SourceState::default();
    }

    pub fn current(&self) -> SourceState {
        self.state.clone()
    }

    /// Patch the tracked name into `info` where the device only knows a stream filename.
    pub fn apply_to(&self, info: &mut PlaybackInfo) {
        if self.state.kind != SourceKind::Radio {
            return;
        }
        let Some(name) = self.state.name.as_deref() else {
            return;
        };
        let title = info.title.to_lowercase();
        if title.contains("mp3") || title.contains("stream") {
            info.title = name.to_string();
            info.artist = "Radio".to_string();
            info.app = "Radio".to_string();
        }
    }
}
