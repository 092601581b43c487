//! MCP server for the hospital registry.
//!
//! Exposes hospital registration to MCP clients over stdio.

pub mod handlers;

pub use handlers::HospitalRegistryServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the hospital registry server with stdio transport.
///
/// Returns once the client disconnects, or with an error if the server
/// fails to start.
pub async fn run_server(server: HospitalRegistryServer) -> Result<()> {
    let service = server.serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}
