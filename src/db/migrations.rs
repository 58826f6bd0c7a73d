//! Embedded schema migrations.
//!
//! diesel's migration harness is synchronous, so each operation opens its own
//! `PgConnection` on a blocking thread.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::error::{AppError, AppResult};

/// Migrations under `migrations/`, compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

type HarnessResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Names of migrations not yet applied.
pub async fn pending_migrations(database_url: &str) -> AppResult<Vec<String>> {
    with_connection(database_url, "check pending migrations", |conn| {
        Ok(conn
            .pending_migrations(MIGRATIONS)?
            .iter()
            .map(|migration| migration.name().to_string())
            .collect())
    })
    .await
}

/// Applies every pending migration and returns the applied versions.
pub async fn run_pending_migrations(database_url: &str) -> AppResult<Vec<String>> {
    let applied = with_connection(database_url, "run pending migrations", |conn| {
        Ok(conn
            .run_pending_migrations(MIGRATIONS)?
            .iter()
            .map(|version| version.to_string())
            .collect::<Vec<_>>())
    })
    .await?;

    tracing::info!(applied = applied.len(), "migrations applied");
    Ok(applied)
}

/// Reverts the last `steps` migrations and returns the reverted versions.
///
/// # Errors
/// `Validation` when `steps` is 0 or exceeds the applied migrations
pub async fn revert_migrations(database_url: &str, steps: u32) -> AppResult<Vec<String>> {
    if steps == 0 {
        return Err(AppError::Validation {
            field: "rollback_steps".to_string(),
            reason: "Number of rollback steps must be greater than 0".to_string(),
        });
    }

    let applied = with_connection(database_url, "list applied migrations", |conn| {
        Ok(conn.applied_migrations()?.len())
    })
    .await?;
    if applied < steps as usize {
        return Err(AppError::Validation {
            field: "rollback_steps".to_string(),
            reason: format!(
                "Cannot rollback {} migrations - only {} applied migrations available",
                steps, applied
            ),
        });
    }

    with_connection(database_url, "revert migrations", move |conn| {
        (0..steps)
            .map(|_| {
                conn.revert_last_migration(MIGRATIONS)
                    .map(|version| version.to_string())
            })
            .collect()
    })
    .await
}

async fn with_connection<T, F>(database_url: &str, operation: &'static str, f: F) -> AppResult<T>
where
    T: Send + 'static,
    F: FnOnce(&mut PgConnection) -> HarnessResult<T> + Send + 'static,
{
    let database_url = database_url.to_string();
    tokio::task::spawn_blocking(move || {
        let mut conn = PgConnection::establish(&database_url).map_err(|e| AppError::Database {
            operation: format!("establish connection to {}", operation),
            source: anyhow::anyhow!("Connection error: {}", e),
        })?;

        f(&mut conn).map_err(|e| AppError::Database {
            operation: operation.to_string(),
            source: anyhow::anyhow!("Migration error: {}", e),
        })
    })
    .await
    .map_err(|e| AppError::Internal {
        source: anyhow::Error::from(e),
    })?
}
