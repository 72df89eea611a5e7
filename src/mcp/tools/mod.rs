//! MCP tool implementations
//!
//! Tool handlers are organized by entity type; the server registers each
//! handler method under its public tool name.

mod users;


use rmcp::ErrorData as McpError;

use crate::db::DbError;

pub use users::UserTools;

/// Map a database error to the MCP error a client sees.
pub(crate) fn map_db_error(e: DbError) -> McpError {
    let data = Some(serde_json::json!({"error": e.to_string()}));
    match e {
        DbError::NotFound { .. } => McpError::resource_not_found("not_found", data),
        _ => McpError::internal_error("database_error", data),
    }
}
