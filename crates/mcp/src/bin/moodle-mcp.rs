// Standalone MCP server binary

use anyhow::Result;
use clap::Parser;
use moodle_mcp::config::{Cli, LogFormat};
use moodle_mcp::{build_server, transport};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "moodle_mcp=info,moodle_sdk=info,moodle_mcp_core=info";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_format = cli.log_format;

    // stdout carries the protocol; logs go to stderr
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    match log_format {
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
    }

    let config = cli.into_config()?;
    tracing::info!(
        url = %config.client.base_url,
        default_course_id = ?config.resolver.default_course_id,
        max_concurrency = config.max_concurrency,
        "Moodle MCP server starting..."
    );

    let server = Arc::new(build_server(&config)?);
    tracing::info!("Registered {} tools", server.registry().len());

    tokio::select! {
        result = transport::serve_stdio(server) => {
            result?;
            tracing::info!("Input closed, shutting down");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupt received, shutting down");
        }
    }

    Ok(())
}
