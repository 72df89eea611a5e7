//! Database error types.
//!
//! Storage-backend agnostic errors for data access, using thiserror for the
//! derive and miette for diagnostic output.

use miette::Diagnostic;
use thiserror::Error;

/// Database operation errors.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    #[error("Entity not found: {entity_type} with id '{id}'")]
    #[diagnostic(code(x_mcp::db::not_found))]
    NotFound { entity_type: String, id: String },

    #[error("Entity already exists: {entity_type} with id '{id}'")]
    #[diagnostic(code(x_mcp::db::already_exists))]
    AlreadyExists { entity_type: String, id: String },

    #[error("Invalid data: {message}")]
    #[diagnostic(code(x_mcp::db::invalid_data))]
    InvalidData {
        message: String,
        #[help]
        help: String,
    },

    #[error("Database error: {message}")]
    #[diagnostic(code(x_mcp::db::database_error))]
    Database { message: String },

    #[error("Migration error: {message}")]
    #[diagnostic(code(x_mcp::db::migration_error))]
    Migration { message: String },

    #[error("Connection error: {message}")]
    #[diagnostic(
        code(x_mcp::db::connection_error),
        help("Check that the database path is writable, or pass --db")
    )]
    Connection { message: String },
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        DbError::Database {
            message: e.to_string(),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
