//! gridpick server entry point.
//!
//! This is the main binary that boots the MCP server on stdio transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use anyhow::{Context, Result};
use gridpick_client::Finder;
use gridpick_core::{AppConfig, Reaper, ResultCache};
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

mod handler;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;

    tracing::info!(
        provider = %config.provider_url,
        session_ttl_secs = config.session_ttl_secs,
        sweep_interval_secs = config.sweep_interval_secs,
        "Starting gridpick server on stdio transport"
    );

    let cache = ResultCache::with_ttl(config.session_ttl());
    let reaper = Reaper::spawn(cache.clone(), config.sweep_interval());
    let finder = Finder::from_config(&config, cache).context("failed to build search clients")?;

    let handler = handler::GridPickServer::new(finder);
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;
    reaper.shutdown().await;

    Ok(())
}
