//! MCP backend exposing the user list as a tool.
//!
//! - `db`: user model and SQLite-backed data access
//! - `json`: JSON codec with fixed date/time formats
//! - `filter`: request/response body logging middleware
//! - `mcp`: tool registry and Streamable HTTP service
//! - `api`: router, tracing and server loop

pub mod api;
pub mod db;
pub mod filter;
pub mod json;
pub mod mcp;
pub mod paths;
