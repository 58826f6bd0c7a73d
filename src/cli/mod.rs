//! CLI module for member-search
//!
//! - Argument parsing with clap
//! - Configuration merging (CLI args + config files)
//! - Command handlers for migrate, seed, search and stats

pub mod config_merger;
pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use config_merger::ConfigurationMerger;
pub use executor::execute_command;
pub use parser::{Cli, Commands, CountMode, Environment, SearchArgs};

use crate::config::{ConfigError, Settings};
use crate::logger::{LogLevelHandle, LoggerError, init_logger};

/// Loads configuration, applies CLI overrides and validates the result.
///
/// # Errors
/// Returns error if loading, merging or validation fails
pub fn load_and_merge_config(cli: &Cli) -> Result<Settings, ConfigError> {
    ConfigurationMerger::from_cli(cli)?.merge_cli_args(cli)
}

/// Installs the global logger described by `settings.logger`.
pub fn init_logger_from_settings(settings: &Settings) -> Result<LogLevelHandle, LoggerError> {
    init_logger(&settings.logger)
}
