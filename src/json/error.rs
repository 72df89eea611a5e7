//! JSON codec error types.

use miette::Diagnostic;
use thiserror::Error;

/// Failures of the JSON codec.
#[derive(Error, Diagnostic, Debug)]
pub enum JsonError {
    #[error("Failed to serialize value: {0}")]
    #[diagnostic(code(x_mcp::json::serialize))]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to parse JSON: {0}")]
    #[diagnostic(
        code(x_mcp::json::parse),
        help("Input must be JSON text; single-quoted strings are accepted")
    )]
    Parse(#[source] serde_json::Error),

    #[error("Failed to convert value: {0}")]
    #[diagnostic(code(x_mcp::json::convert))]
    Convert(#[source] serde_json::Error),
}

/// Result type for codec operations.
pub type JsonResult<T> = Result<T, JsonError>;
