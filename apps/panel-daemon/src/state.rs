use crate::config::Args;
use crate::metrics::PanelMetrics;
use anyhow::{Context, Result};
use assistant::{Assistant, EdgeTtsSynth, LanguageModel, OpenAiCompatModel};
use cast_control::{BackgroundCaster, CattController, DeviceController};
use parking_lot::Mutex;
use playback_state::{load_catalog_file, Catalogs, SourceTracker};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Everything the handlers share. Mutable pieces sit behind their own locks.
pub struct AppContext {
    pub controller: Arc<dyn DeviceController>,
    pub caster: BackgroundCaster,
    /// Timeout for video casts, which resolve the stream before returning.
    pub cast_timeout: Duration,
    pub tracker: Mutex<SourceTracker>,
    pub catalogs: Catalogs,
    pub assistant: Assistant,
    /// Serializes conversations so history stays in order.
    pub chat_lock: tokio::sync::Mutex<()>,
    pub audio_dir: PathBuf,
    pub metrics: PanelMetrics,
}

pub type SharedContext = Arc<AppContext>;

impl AppContext {
    pub fn new(
        controller: Arc<dyn DeviceController>,
        caster: BackgroundCaster,
        cast_timeout: Duration,
        catalogs: Catalogs,
        assistant: Assistant,
        audio_dir: PathBuf,
    ) -> Result<Self> {
        let metrics = PanelMetrics::new().context("failed to register metrics")?;
        Ok(Self {
            controller,
            caster,
            cast_timeout,
            tracker: Mutex::new(SourceTracker::new()),
            catalogs,
            assistant,
            chat_lock: tokio::sync::Mutex::new(()),
            audio_dir,
            metrics,
        })
    }

    pub async fn from_args(args: &Args) -> Result<Self> {
        let controller_config = args.controller_config();
        let caster = BackgroundCaster::new(&controller_config);
        let cast_timeout = controller_config.cast_timeout;
        let controller = Arc::new(CattController::new(controller_config));

        let catalogs = match &args.catalog {
            Some(path) => load_catalog_file(path)?,
            None => Catalogs::default(),
        };
        info!(
            "Catalogs: {} stations, {} favorites",
            catalogs.radio.len(),
            catalogs.youtube.len()
        );

        let model = OpenAiCompatModel::new(args.llm_config())
            .context("failed to build language model client")?;
        if !model.is_configured() {
            warn!("LLM_API_KEY not set; assistant chat will be unavailable");
        }
        let speech = EdgeTtsSynth::new(args.tts_config());
        let memory = memory_client::create_backend(args.memory_config())
            .context("failed to build memory client")?;
        let assistant = Assistant::new(Arc::new(model), Arc::new(speech), memory, args.max_history);

        tokio::fs::create_dir_all(&args.audio_dir)
            .await
            .with_context(|| format!("failed to create {}", args.audio_dir.display()))?;

        Self::new(
            controller,
            caster,
            cast_timeout,
            catalogs,
            assistant,
            args.audio_dir.clone(),
        )
    }
}
