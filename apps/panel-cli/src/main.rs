use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

use cast_control::{CattController, ControllerConfig, DeviceController};
use memory_client::{render_memory_context, HttpMemoryClient, MemoryBackend, MemoryConfig};
use memory_gate::{classify_memory_kind, MemoryKind, RecallReason, StoreReason};
use playback_state::{load_catalog_file, parse_status, Catalog, Catalogs, PlaybackInfo, NOTHING_PLAYING};

#[derive(Parser, Debug)]
#[command(
    name = "panel",
    version,
    about = "Cast panel operator CLI",
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Query the device and print its parsed status as JSON
    Info {
        #[arg(long, env = "CAST_DEVICE", default_value = "Familienzimmer")]
        device: String,
        #[arg(long, env = "CATT_BIN", default_value = "catt")]
        catt: String,
    },
    /// Parse a saved status dump
    Parse { file: PathBuf },
    /// Show memory gate decisions for an utterance
    Gate { text: String },
    /// List radio stations
    Stations {
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// List video favorites
    Favorites {
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Talk to the memory service
    Memory {
        #[arg(long, env = "MEMORY_API_URL")]
        url: Option<String>,
        #[arg(long, env = "MEMORY_API_KEY", hide_env_values = true)]
        key: Option<String>,
        #[command(subcommand)]
        action: MemoryAction,
    },
}

#[derive(Subcommand, Debug)]
enum MemoryAction {
    Stats,
    Recall {
        query: String,
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
    Context {
        text: String,
        #[arg(long, default_value_t = 5)]
        max_results: usize,
        /// Let the service store the text as well
        #[arg(long, action = ArgAction::SetTrue)]
        auto_ingest: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Info { device, catt } => device_info(device, catt).await,
        Commands::Parse { file } => print_json(&parse_file(&file)?),
        Commands::Gate { text } => print_json(&gate_report(&text)),
        Commands::Stations { catalog } => print_names(&load_catalogs(catalog.as_deref())?.radio),
        Commands::Favorites { catalog } => {
            print_names(&load_catalogs(catalog.as_deref())?.youtube)
        }
        Commands::Memory { url, key, action } => memory(url, key, action).await,
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn device_info(device: String, catt: String) -> Result<()> {
    let controller = CattController::new(ControllerConfig {
        program: catt,
        device,
        ..ControllerConfig::default()
    });
    info!("Querying {}", controller.device());
    let out = controller.info().await;
    if out.timed_out {
        bail!("{} did not answer within {:?}", controller.device(), controller.default_timeout());
    }
    let status = if !out.success() && out.stderr.contains(NOTHING_PLAYING) {
        PlaybackInfo::default()
    } else {
        if !out.success() {
            tracing::warn!("info failed: {}", out.message(""));
        }
        parse_status(&out.stdout)
    };
    print_json(&status)
}

fn parse_file(path: &Path) -> Result<PlaybackInfo> {
    let dump = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(parse_status(&dump))
}

#[derive(Debug, Serialize)]
struct Decision<R> {
    decision: bool,
    reason: R,
}

#[derive(Debug, Serialize)]
struct GateReport {
    store: Decision<StoreReason>,
    recall: Decision<RecallReason>,
    /// What would be stored, when storing
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<MemoryKind>,
}

fn gate_report(text: &str) -> GateReport {
    let (store, store_reason) = memory_gate::should_store(text);
    let (recall, recall_reason) = memory_gate::should_recall(text);
    let content = store.then(|| memory_gate::extract_store_content(text));
    let kind = content.as_deref().map(classify_memory_kind);
    GateReport {
        store: Decision {
            decision: store,
            reason: store_reason,
        },
        recall: Decision {
            decision: recall,
            reason: recall_reason,
        },
        content,
        kind,
    }
}

fn load_catalogs(path: Option<&Path>) -> Result<Catalogs> {
    match path {
        Some(path) => load_catalog_file(path),
        None => Ok(Catalogs::default()),
    }
}

fn print_names(catalog: &Catalog) -> Result<()> {
    for name in catalog.names() {
        println!("{name}");
    }
    Ok(())
}

async fn memory(url: Option<String>, key: Option<String>, action: MemoryAction) -> Result<()> {
    let Some(config) = MemoryConfig::from_parts(url, key) else {
        bail!("memory service not configured (set MEMORY_API_URL and MEMORY_API_KEY)");
    };
    let client = HttpMemoryClient::new(config)?;
    match action {
        MemoryAction::Stats => print_json(&client.stats().await?),
        MemoryAction::Recall { query, limit } => print_json(&client.recall(&query, limit).await?),
        MemoryAction::Context {
            text,
            max_results,
            auto_ingest,
        } => {
            let memories = client.context(&text, max_results, auto_ingest).await?;
            println!("{}", render_memory_context(&memories, memory_client::DEFAULT_CONTEXT_BUDGET));
            Ok(())
        }
    }
}

fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}
