use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

mod config;
mod metrics;
mod routes;
mod state;

use config::Args;
use state::AppContext;

#[tokio::main]
async fn main() -> Result<()> {
    setup_tracing();

    let args = Args::parse();

    info!("panel-daemon starting");
    info!("Device: {}", args.device);

    let ctx = Arc::new(AppContext::from_args(&args).await?);
    let app = routes::router(ctx.clone());

    let listener = TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;
    info!("Listening on http://{}", listener.local_addr()?);

    let server = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("HTTP server error: {e}");
        }
    });

    tokio::select! {
        _ = tokio::signal::ctrl_c() => info!("Shutting down"),
        _ = server => error!("HTTP server exited"),
    }
    ctx.caster.cancel();
    Ok(())
}

fn setup_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
