//! HTTP surface: router assembly, tracing setup and the server loop.

mod error;
mod handlers;
pub mod routes;


use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::db::Database;
use crate::paths::get_db_path;

pub use error::ApiError;

/// Environment variable overriding the database path.
pub const DB_PATH_ENV: &str = "X_MCP_DB_PATH";

/// Environment variable overriding the accepted `Host` headers (comma-separated).
pub const ALLOWED_HOSTS_ENV: &str = "X_MCP_ALLOWED_HOSTS";

/// `Host` values the MCP endpoint accepts unless configured otherwise.
pub const DEFAULT_ALLOWED_HOSTS: [&str; 3] = ["localhost", "127.0.0.1", "::1"];

/// Allowed-host entry that disables `Host` header checking.
pub const ANY_HOST: &str = "*";

/// API server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// SQLite database file
    pub db_path: PathBuf,
    /// `Host` header values accepted by `/mcp`, with or without a port.
    /// Empty accepts any host.
    pub allowed_hosts: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
            db_path: get_db_path(),
            allowed_hosts: DEFAULT_ALLOWED_HOSTS.iter().map(|h| h.to_string()).collect(),
        }
    }
}

impl Config {
    /// Defaults, with the database path taken from `X_MCP_DB_PATH` and the
    /// allowed hosts from `X_MCP_ALLOWED_HOSTS` when set.
    pub fn new() -> Self {
        let mut config = Self::default();
        if let Ok(path) = env::var(DB_PATH_ENV)
            && !path.is_empty()
        {
            config.db_path = PathBuf::from(path);
        }
        if let Ok(hosts) = env::var(ALLOWED_HOSTS_ENV)
            && !hosts.trim().is_empty()
        {
            config = config.with_allowed_hosts(hosts.split(','));
        }
        config
    }

    pub fn with_host(mut self, host: IpAddr) -> Self {
        self.host = host;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Override the database path (takes precedence over the env var).
    pub fn with_db_path(mut self, db_path: PathBuf) -> Self {
        self.db_path = db_path;
        self
    }

    /// Replace the accepted `Host` values. Blank entries are skipped and a
    /// `*` entry accepts any host.
    pub fn with_allowed_hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let hosts: Vec<String> = hosts
            .into_iter()
            .map(|h| h.as_ref().trim().to_string())
            .filter(|h| !h.is_empty())
            .collect();
        self.allowed_hosts = if hosts.iter().any(|h| h == ANY_HOST) {
            Vec::new()
        } else {
            hosts
        };
        self
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Initialize tracing subscriber with env filter
pub fn init_tracing() {
    // try_init: a subscriber may already be installed (tests, embedding)
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "x_mcp_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Resolve once Ctrl-C arrives, then cancel the MCP sessions.
async fn shutdown_signal(cancellation_token: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
    cancellation_token.cancel();
}

/// Run the server with the given configuration and database.
///
/// The database should already be migrated.
pub async fn run<D: Database + 'static>(config: Config, db: D) -> Result<(), ApiError> {
    init_tracing();

    let cancellation_token = CancellationToken::new();
    let app = routes::create_router(db, config.allowed_hosts.clone(), cancellation_token.clone());

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ApiError::Bind { addr, source })?;
    info!("MCP server listening on http://{}/mcp", addr);
    if config.allowed_hosts.is_empty() {
        warn!("Host header checking is disabled for /mcp");
    } else {
        info!(allowed_hosts = ?config.allowed_hosts, "Accepted Host headers for /mcp");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancellation_token))
        .await?;

    info!("Server stopped");
    Ok(())
}
