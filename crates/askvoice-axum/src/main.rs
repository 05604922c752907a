//! `askvoice` server binary.

use std::path::PathBuf;

use anyhow::Context;
use askvoice_axum::{ServerConfig, start_server};
use askvoice_core::AppConfig;
use askvoice_core::config::load_env_file;
use clap::Parser;
use tracing::error;

/// Voice question-answering server.
#[derive(Debug, Parser)]
#[command(name = "askvoice", version, about)]
struct Cli {
    /// Interface to bind (overrides ASKVOICE_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides ASKVOICE_PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory with the chat page served at `/` (overrides ASKVOICE_STATIC_DIR)
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Restrict CORS to these origins (repeatable)
    #[arg(long = "allow-origin")]
    allow_origins: Vec<String>,
}

/// Initialize tracing. `RUST_LOG` takes priority over the `info` default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    load_env_file();

    let cli = Cli::parse();

    let app_config = AppConfig::from_env()
        .inspect_err(|e| error!("Configuration error: {e}"))
        .context("Refusing to start")?;

    let mut config = ServerConfig::from_app_config(app_config);
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(dir) = cli.static_dir {
        config = config.with_static_dir(dir);
    }
    if !cli.allow_origins.is_empty() {
        config = config.with_allowed_origins(cli.allow_origins);
    }

    start_server(config).await
}
