//! Model Context Protocol (MCP) server implementation
//!
//! This module provides an MCP server using the Streamable HTTP transport.
//!
//! # Architecture
//!
//! - **server**: Tool registry and `ServerHandler`
//! - **tools**: Tool structs per entity (UserTools)
//! - **service**: Streamable HTTP service for nesting into an Axum router
//!
//! Everything is generic over `D: Database`, with no dynamic dispatch.

pub mod server;
mod service;
pub mod tools;


pub use server::McpServer;
pub use service::create_mcp_service;
