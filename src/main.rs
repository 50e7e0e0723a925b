//! catalog-admin entry point.
//!
//! Reads commands from stdin and renders the catalog to stdout.
//! Diagnostics go to stderr.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use catalog_admin::api::HttpProductApi;
use catalog_admin::app::{SessionOptions, run_session};
use catalog_admin::config::{AdminConfig, LogFormat};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = AdminConfig::from_env().context("loading configuration")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match config.log_format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Text => subscriber.init(),
    }

    tracing::info!(api_url = %config.api_url, "starting catalog-admin");

    // Build API client
    let api = HttpProductApi::new(config.api_url.clone(), config.request_timeout)
        .context("building HTTP client")?;

    // Run the session
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    run_session(
        Arc::new(api),
        SessionOptions::from(&config),
        stdin,
        tokio::io::stdout(),
    )
    .await
    .context("terminal I/O failed")?;

    Ok(())
}
