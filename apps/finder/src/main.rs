mod api_client;
mod cli;
mod config;
mod errors;
mod models;
mod presentation;
mod search;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api_client::ApiClient;
use crate::cli::Cli;
use crate::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(base_url) = cli.base_url.as_deref() {
        config = config.with_base_url(base_url);
    }

    // Logs go to stderr; stdout carries the tables.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting Resume Finder v{}", env!("CARGO_PKG_VERSION"));

    let client = ApiClient::new(&config.base_url, config.request_timeout)
        .context("Failed to build HTTP client")?;
    info!(
        "Backend: {} (timeout {}s)",
        client.base_url(),
        config.request_timeout.as_secs()
    );

    cli::run(cli, Arc::new(client)).await
}
