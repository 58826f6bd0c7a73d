//! Migrate command handler
//!
//! Handles database migration operations including dry-run and rollback.

use crate::config::DatabaseConfig;
use crate::db;
use crate::error::AppResult;

/// Handler for the migrate command
pub struct MigrateCommandHandler {
    database: DatabaseConfig,
}

impl MigrateCommandHandler {
    pub fn new(database: DatabaseConfig) -> Self {
        Self { database }
    }

    /// Applies pending migrations, lists them (`dry_run`) or reverts the last
    /// `rollback` of them.
    ///
    /// # Errors
    /// - Configuration validation errors
    /// - `Validation` for an out-of-range rollback
    /// - Database connection and migration errors
    pub async fn execute(&self, dry_run: bool, rollback: Option<u32>) -> AppResult<String> {
        self.database.validate()?;

        if dry_run {
            let pending = db::pending_migrations(&self.database.url).await?;
            return Ok(if pending.is_empty() {
                "No pending migrations - database is up to date".to_string()
            } else {
                listing(&format!("{} pending migration(s):", pending.len()), &pending)
            });
        }

        if let Some(steps) = rollback {
            let reverted = db::revert_migrations(&self.database.url, steps).await?;
            return Ok(listing(
                &format!("Rolled back {} migration(s):", reverted.len()),
                &reverted,
            ));
        }

        let applied = db::run_pending_migrations(&self.database.url).await?;
        Ok(if applied.is_empty() {
            "No migrations to apply - database is already up to date".to_string()
        } else {
            listing(&format!("Applied {} migration(s):", applied.len()), &applied)
        })
    }
}

fn listing(header: &str, names: &[String]) -> String {
    std::iter::once(header.to_string())
        .chain(names.iter().map(|name| format!("  - {}", name)))
        .collect::<Vec<_>>()
        .join("\n")
}
