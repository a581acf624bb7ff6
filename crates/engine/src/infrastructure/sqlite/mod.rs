//! SQLite database implementations.

use std::str::FromStr;
use std::sync::Arc;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::infrastructure::config::StoreConfig;
use crate::infrastructure::ports::RepoError;

mod helpers;
mod schema;

mod npc_repo;
mod settlement_repo;

pub use npc_repo::SqliteNpcRepo;
pub use schema::ensure_schema;
pub use settlement_repo::SqliteSettlementRepo;

/// Open a connection pool for `config`.
///
/// Foreign keys are enforced on every connection. In-memory databases are
/// private to a connection, so they get exactly one that is never recycled.
pub async fn connect(config: &StoreConfig) -> Result<SqlitePool, RepoError> {
    let options = SqliteConnectOptions::from_str(&config.database_url)
        .map_err(|e| RepoError::database("connect", e))?
        .create_if_missing(config.create_if_missing)
        .foreign_keys(true);

    let pool = if is_memory_url(&config.database_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
    } else {
        SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await
    }
    .map_err(|e| RepoError::database("connect", e))?;

    tracing::info!(url = %config.database_url, "Connected to SQLite");
    Ok(pool)
}

fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Create all SQLite repositories from a connection pool.
pub struct SqliteRepositories {
    pub npc: Arc<SqliteNpcRepo>,
    pub settlement: Arc<SqliteSettlementRepo>,
}

impl SqliteRepositories {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            npc: Arc::new(SqliteNpcRepo::new(pool.clone())),
            settlement: Arc::new(SqliteSettlementRepo::new(pool)),
        }
    }
}

/// Fresh in-memory database with the schema applied.
#[cfg(test)]
pub(crate) async fn memory_pool() -> SqlitePool {
    let pool = connect(&StoreConfig::in_memory())
        .await
        .expect("open in-memory database");
    ensure_schema(&pool).await.expect("apply schema");
    pool
}
