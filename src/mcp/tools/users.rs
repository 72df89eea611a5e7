//! User tool implementations.

use std::sync::Arc;

use rmcp::{ErrorData as McpError, model::*};
use tracing::debug;

use super::map_db_error;
use crate::db::{Database, UserRepository};
use crate::json;

/// User tools
///
/// Generic over `D: Database` for zero-cost abstraction.
pub struct UserTools<D: Database> {
    db: Arc<D>,
}

// Manual Clone impl - only the Arc is cloned, D itself need not be Clone
impl<D: Database> Clone for UserTools<D> {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
        }
    }
}

impl<D: Database> UserTools<D> {
    /// Create new UserTools with database
    pub fn new(db: Arc<D>) -> Self {
        Self { db }
    }

    /// Return every user, encoded with the codec's date formats.
    ///
    /// The list is exactly what the repository returns: no filtering,
    /// reordering or field rewriting.
    pub async fn get_user_list(&self) -> Result<CallToolResult, McpError> {
        let users = self.db.users().list().await.map_err(map_db_error)?;
        debug!(count = users.len(), "getUserList");

        let text = json::to_json_str(&users).ok_or_else(|| {
            McpError::internal_error(
                "serialization_error",
                Some(serde_json::json!({"error": "failed to encode user list"})),
            )
        })?;

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}
