//! Configuration merger for CLI arguments and config files
//!
//! Command-line flags take precedence over file and environment values.

use super::parser::Cli;
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Settings};

/// Applies CLI overrides on top of file-based configuration
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Loads the base configuration selected by `--config` and `--env`.
    ///
    /// The result is not validated yet; [`merge_cli_args`](Self::merge_cli_args)
    /// validates after the overrides are applied.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut loader = ConfigLoader::new()?;
        if let Some(path) = &cli.config {
            loader = loader.with_config_file(path);
        }
        if let Some(env) = cli.env {
            loader = loader.with_environment(env.into());
        }

        Ok(Self::new(loader.load_unvalidated()?))
    }

    /// Returns the base configuration with CLI overrides applied and validated.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn valid_base_config() -> Settings {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/members".to_string();
        config
    }

    #[test]
    fn test_merge_without_flags_keeps_level() {
        let merger = ConfigurationMerger::new(valid_base_config());
        let cli = Cli::try_parse_from(["member-search", "stats"]).unwrap();

        let merged = merger.merge_cli_args(&cli).unwrap();

        assert_eq!(&merged, merger.config());
    }

    #[test]
    fn test_merge_verbose_flag() {
        let merger = ConfigurationMerger::new(valid_base_config());
        let cli = Cli::try_parse_from(["member-search", "--verbose", "seed"]).unwrap();

        assert_eq!(merger.merge_cli_args(&cli).unwrap().logger.level, "debug");
    }

    #[test]
    fn test_merge_quiet_flag() {
        let merger = ConfigurationMerger::new(valid_base_config());
        let cli = Cli::try_parse_from(["member-search", "search", "--quiet"]).unwrap();

        assert_eq!(merger.merge_cli_args(&cli).unwrap().logger.level, "error");
    }

    #[test]
    fn test_merge_validates_result() {
        let merger = ConfigurationMerger::new(Settings::default());
        let cli = Cli::try_parse_from(["member-search", "stats"]).unwrap();

        assert!(matches!(
            merger.merge_cli_args(&cli),
            Err(ConfigError::ValidationError { .. })
        ));
    }
}
