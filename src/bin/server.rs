//! x-mcp-server binary.
//!
//! This binary creates the concrete database implementation and passes it
//! to the server. The API layer remains agnostic of the storage backend.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;
use miette::Diagnostic;
use thiserror::Error;
use x_mcp_server::api::{self, ApiError, Config};
use x_mcp_server::db::{Database, DbError, SqliteDatabase};

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("Database error: {0}")]
    #[diagnostic(code(x_mcp::binary::database))]
    Database(#[from] DbError),

    #[error("Failed to create data directory: {0}")]
    #[diagnostic(code(x_mcp::binary::io))]
    Io(#[from] std::io::Error),

    #[error("Server error: {0}")]
    #[diagnostic(code(x_mcp::binary::api))]
    Api(#[from] ApiError),
}

#[derive(Parser)]
#[command(name = "x-mcp-server")]
#[command(author, version, about = "MCP server exposing user tools", long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Database file path (defaults to $X_MCP_DB_PATH, then ~/.local/share/x-mcp-server/users.db)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Host header value accepted by /mcp, repeatable ("*" accepts any host).
    /// Defaults to $X_MCP_ALLOWED_HOSTS, then localhost, 127.0.0.1 and ::1
    #[arg(long = "allowed-host", value_name = "HOST")]
    allowed_hosts: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), BinaryError> {
    let cli = Cli::parse();

    let mut config = Config::new().with_host(cli.host).with_port(cli.port);
    if let Some(db_path) = cli.db {
        config = config.with_db_path(db_path);
    }
    if !cli.allowed_hosts.is_empty() {
        config = config.with_allowed_hosts(&cli.allowed_hosts);
    }

    println!("Opening database at {:?}", config.db_path);

    // Ensure parent directory exists
    if let Some(parent) = config.db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db = SqliteDatabase::open(&config.db_path).await?;

    // Run migrations before starting the server
    db.migrate().await?;
    println!("Database migrations complete");

    api::run(config, db).await?;

    Ok(())
}
