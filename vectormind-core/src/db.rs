use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::config::DatabaseConfig;
use crate::error::VectorMindError;

/// Migrations embedded at compile time from `vectormind-core/migrations/`.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

pub async fn create_pool(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);

    // Each in-memory connection is its own database, so keep exactly one alive.
    if config.url.contains(":memory:") {
        return SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await;
    }

    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), VectorMindError> {
    MIGRATOR.run(pool).await?;
    tracing::info!("migrations applied successfully");
    Ok(())
}

/// Create the pool and bring the schema up to date.
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, VectorMindError> {
    let pool = create_pool(config).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

pub async fn health_check(pool: &SqlitePool) -> Result<String, sqlx::Error> {
    let row: (String,) = sqlx::query_as("SELECT sqlite_version()").fetch_one(pool).await?;
    Ok(row.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_config() -> DatabaseConfig {
        DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 5,
        }
    }

    #[tokio::test]
    async fn test_health_check_reports_sqlite_version() {
        let pool = connect(&memory_config()).await.expect("connect");
        let version = health_check(&pool).await.expect("health check");
        assert!(version.starts_with('3'), "unexpected version {version}");
    }

    #[tokio::test]
    async fn test_migrations_create_workflows_table() {
        let pool = connect(&memory_config()).await.expect("connect");
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'workflows'",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let pool = connect(&memory_config()).await.expect("connect");
        run_migrations(&pool).await.expect("second run should be a no-op");
    }
}
