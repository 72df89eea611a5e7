use std::net::SocketAddr;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ApiError {
    #[error("Failed to bind {addr}: {source}")]
    #[diagnostic(
        code(x_mcp::api::bind),
        help("Is another process already listening on this port? Try --port")
    )]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    #[diagnostic(code(x_mcp::api::serve))]
    Serve(#[from] std::io::Error),
}
