//! MCP server implementation
//!
//! The server is the static tool registry: each `#[tool]` method below maps a
//! public tool name to the handler that serves it.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::router::tool::ToolRouter,
    model::{CallToolResult, ServerCapabilities, ServerInfo, Tool},
    tool, tool_handler, tool_router,
};

use crate::db::Database;

use super::tools::UserTools;

/// Main MCP server coordinator
///
/// Generic over `D: Database` for zero-cost abstraction (no dynamic dispatch).
/// Tool calls are delegated to per-entity tool structs.
pub struct McpServer<D: Database> {
    user_tools: UserTools<D>,
    tool_router: ToolRouter<Self>,
}

// Manual Clone impl - D itself need not be Clone
impl<D: Database> Clone for McpServer<D> {
    fn clone(&self) -> Self {
        Self {
            user_tools: self.user_tools.clone(),
            tool_router: self.tool_router.clone(),
        }
    }
}

#[tool_router]
impl<D: Database + 'static> McpServer<D> {
    /// Create a new MCP server sharing the given database
    pub fn new(db: impl Into<Arc<D>>) -> Self {
        Self {
            user_tools: UserTools::new(db.into()),
            tool_router: Self::tool_router(),
        }
    }

    /// Descriptors of every registered tool.
    pub fn tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    #[tool(name = "getUserList", description = "Get user list")]
    pub async fn get_user_list(&self) -> Result<CallToolResult, McpError> {
        self.user_tools.get_user_list().await
    }
}

#[tool_handler]
impl<D: Database + 'static> ServerHandler for McpServer<D> {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo::default();
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info.server_info.name = env!("CARGO_PKG_NAME").to_string();
        info.server_info.version = env!("CARGO_PKG_VERSION").to_string();
        info.instructions = Some("X MCP Server - Query users stored in the backend".to_string());
        info
    }
}
