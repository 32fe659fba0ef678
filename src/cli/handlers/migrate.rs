//! Migrate command handler: apply, preview and roll back migrations.

use diesel::{Connection, PgConnection};
use diesel_migrations::MigrationHarness;

use crate::config::Settings;
use crate::db::MIGRATIONS;
use crate::error::{AppError, AppResult};

pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    pub async fn execute(&self, dry_run: bool, rollback: Option<u32>) -> AppResult<()> {
        self.config.database.validate()?;

        if dry_run {
            return self.show_pending().await;
        }
        match rollback {
            Some(steps) => self.rollback(steps).await,
            None => self.apply_pending().await,
        }
    }

    async fn show_pending(&self) -> AppResult<()> {
        let pending = self
            .with_connection("check pending migrations", |conn| {
                let pending = conn
                    .pending_migrations(MIGRATIONS)
                    .map_err(|e| anyhow::anyhow!(e.to_string()))?;
                Ok(pending.iter().map(|m| m.name().to_string()).collect::<Vec<_>>())
            })
            .await?;

        if pending.is_empty() {
            println!("No pending migrations - database is up to date");
        } else {
            println!("Found {} pending migration(s):", pending.len());
            for name in &pending {
                println!("  - {name}");
            }
            println!("\nRun without --dry-run to apply them");
        }
        Ok(())
    }

    async fn apply_pending(&self) -> AppResult<()> {
        println!("Running database migrations...");
        let applied = self
            .with_connection("run pending migrations", |conn| {
                let applied = conn
                    .run_pending_migrations(MIGRATIONS)
                    .map_err(|e| anyhow::anyhow!(e.to_string()))?;
                Ok(applied.iter().map(|m| m.to_string()).collect::<Vec<_>>())
            })
            .await?;

        if applied.is_empty() {
            println!("No migrations to apply - database is already up to date");
        } else {
            println!("Applied {} migration(s):", applied.len());
            for name in &applied {
                println!("  - {name}");
            }
        }
        Ok(())
    }

    async fn rollback(&self, steps: u32) -> AppResult<()> {
        if steps == 0 {
            return Err(AppError::Validation {
                field: "rollback_steps".to_string(),
                reason: "Number of rollback steps must be greater than 0".to_string(),
            });
        }

        println!("Rolling back {steps} migration(s)...");
        let reverted = self
            .with_connection("revert migrations", move |conn| {
                let applied = conn
                    .applied_migrations()
                    .map_err(|e| anyhow::anyhow!(e.to_string()))?;
                if applied.len() < steps as usize {
                    return Err(AppError::Validation {
                        field: "rollback_steps".to_string(),
                        reason: format!(
                            "Cannot rollback {steps} migrations - only {} applied",
                            applied.len()
                        ),
                    });
                }
                let mut reverted = 0;
                for _ in 0..steps {
                    conn.revert_last_migration(MIGRATIONS)
                        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
                    reverted += 1;
                }
                Ok(reverted)
            })
            .await?;

        println!("Rolled back {reverted} migration(s)");
        Ok(())
    }

    /// Runs a closure on a dedicated blocking connection. diesel's
    /// migration harness is synchronous, so the pool is bypassed.
    async fn with_connection<T, F>(&self, operation: &'static str, f: F) -> AppResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> Result<T, AppError> + Send + 'static,
    {
        let database_url = self.config.database.url.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn =
                PgConnection::establish(&database_url).map_err(|e| AppError::Database {
                    operation: operation.to_string(),
                    source: anyhow::Error::from(e),
                })?;
            f(&mut conn)
        })
        .await
        .map_err(|e| AppError::Internal {
            source: anyhow::Error::from(e),
        })?
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}
