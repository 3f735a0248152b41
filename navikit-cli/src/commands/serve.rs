//! Serve command - run the MCP stdio server.

use anyhow::Result;

use crate::config::Config;
use crate::mcp::McpServer;

/// Runs the MCP server until stdin closes.
pub async fn run(config: &Config) -> Result<()> {
    let server = McpServer::new(config)?;
    server.run().await
}
