//! Async database connection pool implementation.
//!
//! Uses bb8 connection pool manager with diesel_async for PostgreSQL connections.

use std::time::Duration;

use diesel::{Connection, PgConnection};
use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::Pool;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::config::DatabaseConfig;
use crate::error::AppError;

/// Embedded database migrations, compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Async connection pool type alias.
///
/// bb8::Pool internally uses Arc, so Clone is cheap (just reference count increment).
/// Structures holding AsyncDbPool can derive Clone without additional Arc wrapping.
pub type AsyncDbPool = Pool<AsyncPgConnection>;

/// Creates an async database connection pool from configuration.
///
/// # Errors
///
/// - `AppError::ConnectionPool` - If connection pool creation fails
///
/// # Example
///
/// ```ignore
/// let pool = establish_async_connection_pool(&settings.database).await?;
/// let mut conn = pool.get().await?;
/// ```
pub async fn establish_async_connection_pool(
    config: &DatabaseConfig,
) -> Result<AsyncDbPool, AppError> {
    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.url.clone());
    let pool = Pool::builder()
        .max_size(config.max_connections)
        .min_idle(Some(config.min_connections))
        .connection_timeout(Duration::from_secs(config.connection_timeout))
        .build(manager)
        .await
        .map_err(|e| AppError::ConnectionPool {
            source: anyhow::Error::from(e),
        })?;
    Ok(pool)
}

/// Runs all pending embedded migrations against the configured database.
///
/// diesel_migrations is synchronous, so this establishes a dedicated blocking
/// connection on a spawn_blocking thread rather than borrowing from the async
/// pool.
pub async fn run_pending_migrations(config: &DatabaseConfig) -> Result<usize, AppError> {
    let database_url = config.url.clone();
    tokio::task::spawn_blocking(move || {
        let mut conn = PgConnection::establish(&database_url).map_err(|e| AppError::Database {
            operation: "connect for migrations".to_string(),
            source: anyhow::Error::from(e),
        })?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| AppError::Database {
                operation: "run pending migrations".to_string(),
                source: anyhow::anyhow!(e.to_string()),
            })?;
        Ok::<usize, AppError>(applied.len())
    })
    .await
    .map_err(|e| AppError::Internal {
        source: anyhow::anyhow!("migration task panicked: {e}"),
    })?
}
