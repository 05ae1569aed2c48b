//! MCP server for documentation search.
//!
//! This module provides the MCP protocol server that exposes in-page search
//! to AI assistants through the Model Context Protocol.

pub mod handlers;

pub use handlers::DocSearchMcpServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the server with stdio transport until the client disconnects.
pub async fn run_server(server: DocSearchMcpServer) -> Result<()> {
    let service = server.serve(stdio()).await?;
    service.waiting().await?;

    Ok(())
}
