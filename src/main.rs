use anyhow::{Context, Result};
use clap::Parser;
use job_swipe::app_log;
use job_swipe::cli::{handle_command, Cli};
use job_swipe::ConfigManager;
use std::fs::OpenOptions;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_LOG_FILE: &str = "/tmp/jobswipe.log";
const DEFAULT_LOG_FILTER: &str = "job_swipe=info,jobswipe=info,rocket::server=off";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging first
    let log_path = std::env::var("JOBSWIPE_LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true) // Clear file on startup
        .open(&log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path))?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .with_writer(file)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)))
        .init();

    let config = ConfigManager::load()?;

    app_log!(
        info,
        "Environment: {} (port {})",
        config.environment_name,
        config.environment.port
    );

    handle_command(cli, config).await
}
