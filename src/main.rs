use clap::Parser;

use member_search::cli::{Cli, execute_command, init_logger_from_settings, load_and_merge_config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = load_and_merge_config(&cli)?;
    let _log_handle = init_logger_from_settings(&settings)?;
    tracing::debug!(
        version = member_search::pkg_version(),
        command = ?cli.command,
        "starting"
    );

    if let Err(e) = execute_command(&cli, settings).await {
        tracing::error!(error = ?e, "command failed");
        return Err(e.into());
    }

    Ok(())
}
