use std::time::Duration;

use anyhow::Context;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

use crate::config::DatabaseConfig;

/// Open the shared connection pool the store runs its statements on.
pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<SqlitePool> {
    let db = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(&config.url)
        .await
        .context("connect to database")?;
    tracing::debug!(max_connections = config.max_connections, "database pool ready");
    Ok(db)
}
