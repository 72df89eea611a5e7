//! SQLite connection pool and migration management.

use std::path::Path;
use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::debug;

use super::user::SqliteUserRepository;
use crate::db::{Database, DbError, DbResult};

// Embed migrations from data/sql/sqlite/ at compile time
static MIGRATOR: Migrator = sqlx::migrate!("./data/sql/sqlite");

/// SQLite database implementation.
///
/// Provides access to repositories via associated types, avoiding dynamic dispatch.
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Open (or create) a database at the given path.
    pub async fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let path = path.as_ref();
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: format!("{}: {}", path.display(), e),
            })?;

        debug!(path = %path.display(), "Opened SQLite database");
        Ok(Self { pool })
    }

    /// Create an in-memory database (useful for testing).
    ///
    /// Every connection to `:memory:` is a separate database, so the pool is
    /// pinned to a single connection that never expires.
    pub async fn in_memory() -> DbResult<Self> {
        let options =
            SqliteConnectOptions::from_str("sqlite::memory:").map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    /// Access the underlying pool for direct queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl Database for SqliteDatabase {
    type Users<'a> = SqliteUserRepository<'a>;

    async fn migrate(&self) -> DbResult<()> {
        MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|e| DbError::Migration {
                message: e.to_string(),
            })
    }

    fn users(&self) -> Self::Users<'_> {
        SqliteUserRepository { pool: &self.pool }
    }
}
