//! Ideacheck Daemon - Business idea validation service
//!
//! Serves `POST /validate-idea`, combining a Gemini analysis with SerpApi
//! related searches into a fixed-shape validation report.

use anyhow::Result;
use clap::Parser;
use ideacheckd::config::Config;
use ideacheckd::credentials::{CredentialSource, GEMINI_KEY_VAR, SERP_KEY_VAR};
use ideacheckd::server::{self, AppState};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ideacheckd")]
#[command(about = "Ideacheck - business idea validation daemon", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults to /etc/ideacheck/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Listen address, overrides server.listen
    #[arg(long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    info!("Ideacheck Daemon v{} starting", env!("CARGO_PKG_VERSION"));

    let mut config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load(),
    };
    if let Some(listen) = cli.listen {
        config.server.listen = listen;
    }

    let credentials = CredentialSource::Environment;
    if credentials.resolve().is_none() {
        warn!(
            "{} or {} is not set; validation requests will fail until both are provided",
            GEMINI_KEY_VAR, SERP_KEY_VAR
        );
    }

    let state = AppState::new(config, credentials)?;
    server::run(state).await
}
