//! Route configuration.

use axum::{Router, middleware, routing::get};
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::db::Database;
use crate::filter::log_exchange;
use crate::mcp::create_mcp_service;

/// Create the router: `/mcp` for the MCP transport and `/health`.
///
/// Every request passes through the body-logging filter, inside the
/// `TraceLayer` span. `allowed_hosts` limits the `Host` headers `/mcp`
/// accepts; empty accepts any.
pub fn create_router<D: Database + 'static>(
    db: D,
    allowed_hosts: Vec<String>,
    cancellation_token: CancellationToken,
) -> Router {
    let mcp_service = create_mcp_service(db, allowed_hosts, cancellation_token);

    Router::new()
        .route("/health", get(handlers::health))
        .nest_service("/mcp", mcp_service)
        .layer(middleware::from_fn(log_exchange))
        .layer(TraceLayer::new_for_http())
}
