//! Command executor for dispatching CLI commands

use std::sync::Arc;

use super::handlers::{
    MigrateCommandHandler, SearchCommandHandler, SeedCommandHandler, StatsCommandHandler,
};
use super::parser::{Cli, Commands};
use crate::config::Settings;
use crate::db::{establish_async_connection_pool, run_pending_migrations};
use crate::error::AppResult;
use crate::repositories::{MemberRepository, MemberStore};
use crate::services::MemberSearchService;

/// Executes the parsed command with merged settings and prints its output.
///
/// # Errors
/// Returns errors from command handlers, migrations or pool creation
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    let output = match &cli.command {
        Commands::Migrate { dry_run, rollback } => {
            MigrateCommandHandler::new(settings.database)
                .execute(*dry_run, *rollback)
                .await?
        }
        Commands::Seed => SeedCommandHandler::new(connect(&settings).await?).execute().await?,
        Commands::Search(args) => {
            let service = MemberSearchService::new(connect(&settings).await?);
            SearchCommandHandler::new(service, settings.search)
                .execute(args)
                .await?
        }
        Commands::Stats => {
            let service = MemberSearchService::new(connect(&settings).await?);
            StatsCommandHandler::new(service).execute().await?
        }
    };

    println!("{}", output);
    Ok(())
}

/// Opens the pooled PostgreSQL store, migrating first when
/// `database.auto_migrate` is set.
async fn connect(settings: &Settings) -> AppResult<Arc<dyn MemberStore>> {
    if settings.database.auto_migrate {
        run_pending_migrations(&settings.database.url).await?;
    }
    let pool = establish_async_connection_pool(&settings.database).await?;
    Ok(Arc::new(MemberRepository::new(pool)))
}
