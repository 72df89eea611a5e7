//! MCP Streamable HTTP service creation
//!
//! This module provides functions to create the MCP service
//! that can be integrated with an Axum router.

use std::sync::Arc;

use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::db::Database;

use super::server::McpServer;

/// Create MCP Streamable HTTP service
///
/// This function creates a StreamableHttpService that can be nested into an Axum router.
///
/// # Arguments
/// * `db` - Database instance implementing the Database trait
/// * `allowed_hosts` - Accepted `Host` header values (DNS rebinding guard);
///   empty accepts any host
/// * `cancellation_token` - Token for graceful shutdown
///
/// # Example
/// ```no_run
/// use axum::Router;
/// use tokio_util::sync::CancellationToken;
/// # use x_mcp_server::db::{Database, SqliteDatabase};
/// # use x_mcp_server::mcp::create_mcp_service;
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// # let db = SqliteDatabase::in_memory().await?;
///
/// let ct = CancellationToken::new();
/// let allowed_hosts = vec!["localhost".to_string()];
/// let mcp_service = create_mcp_service(db, allowed_hosts, ct);
///
/// let app: Router = Router::new().nest_service("/mcp", mcp_service);
/// # Ok(())
/// # }
/// ```
pub fn create_mcp_service<D: Database + 'static>(
    db: impl Into<Arc<D>>,
    allowed_hosts: Vec<String>,
    cancellation_token: CancellationToken,
) -> StreamableHttpService<McpServer<D>, LocalSessionManager> {
    let db = db.into();

    let tool_names: Vec<String> = McpServer::<D>::new(Arc::clone(&db))
        .tools()
        .into_iter()
        .map(|tool| tool.name.to_string())
        .collect();
    info!(tools = ?tool_names, "Registered MCP tools");

    // Service factory: creates new McpServer instance per session
    // Note: Returns io::Error to match rmcp's expected signature
    let service_factory = move || -> Result<McpServer<D>, std::io::Error> {
        Ok(McpServer::<D>::new(Arc::clone(&db)))
    };

    // Default keep-alive (15s) and retry behavior, with session management
    let mut config = StreamableHttpServerConfig::default();
    config.stateful_mode = true;
    config.cancellation_token = cancellation_token;
    config.allowed_hosts = allowed_hosts;

    StreamableHttpService::new(
        service_factory,
        LocalSessionManager::default().into(),
        config,
    )
}
