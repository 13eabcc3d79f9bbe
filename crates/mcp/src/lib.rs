// MCP (Model Context Protocol) server exposing a Moodle site as tools.
// JSON-RPC 2.0 over stdio; every tool call is backed by the Moodle web service.

pub mod config;
pub mod protocol;
pub mod server;
pub mod tools;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{Cli, LogFormat, ServerConfig};
pub use server::McpServer;

use moodle_mcp_core::{CourseResolver, MoodleApi, SubmissionsReporter};
use moodle_sdk::MoodleClient;
use std::sync::Arc;
use tools::{moodle_tools, ToolContext};

/// Wire the Moodle client, resolver and reporter into a ready server.
pub fn build_server(config: &ServerConfig) -> anyhow::Result<McpServer> {
    let client = MoodleClient::from_config(config.client.clone())?;
    let api: Arc<dyn MoodleApi> = Arc::new(client);

    let ctx = ToolContext {
        resolver: Arc::new(CourseResolver::new(api.clone(), config.resolver.clone())),
        reporter: Arc::new(
            SubmissionsReporter::new(api.clone()).with_max_in_flight(config.max_concurrency),
        ),
        api,
    };

    Ok(McpServer::new(moodle_tools(ctx)))
}
