//! teamdex - browse the creature and item catalogs, keep favorites and
//! build a team from the command line.

mod commands;
mod config;

use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use teamdex_core::api::HttpCatalogClient;
use teamdex_core::Teamdex;
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::Command;
use config::Config;

/// Log file prefix; the appender adds a date suffix
const LOG_FILE_PREFIX: &str = "teamdex.log";

/// Initialize the tracing subscriber for logging.
///
/// Use RUST_LOG to control the level (e.g., RUST_LOG=teamdex_core=debug).
/// Output goes to stderr and to a daily log file under `log_dir`. The
/// returned guard flushes the file writer when dropped.
fn init_tracing(log_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .with(filter)
        .init();

    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = Command::parse(&args)?;
    if command == Command::Help {
        println!("{}", commands::USAGE);
        return Ok(());
    }

    let config = Config::load()?;
    let _guard = init_tracing(&config.log_dir()?)?;
    info!(api = %config.api_base_url, "teamdex starting");

    let client = HttpCatalogClient::new(config.api_base_url.clone(), config.request_timeout())
        .context("Failed to build HTTP client")?;
    let store_dir = config.store_dir()?;
    debug!(dir = %store_dir.display(), "Opening local store");
    let dex = Teamdex::open(&store_dir, client, config.page_limit)
        .await
        .with_context(|| format!("Failed to open local store at {}", store_dir.display()))?;

    let result = commands::run(command, &dex).await;
    dex.close();
    result
}
