//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::query::{CountStrategy, MemberSearchCondition};

/// Search members and teams stored in PostgreSQL
#[derive(Parser, Debug)]
#[command(name = "member-search")]
#[command(about = "Search members and teams stored in PostgreSQL")]
#[command(long_about = "
member-search runs dynamic member/team searches against PostgreSQL and prints
the results as JSON.

EXAMPLES:
    # Create the schema
    member-search migrate

    # Insert the two-team fixture
    member-search seed

    # Members aged 20 to 30
    member-search search --age-goe 20 --age-loe 30

    # Second page of teamB, exact count
    member-search search --team-name teamB --page 1 --size 10 --count simple

    # Age statistics
    member-search --env production stats
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    ///
    /// Load only this TOML file instead of the layered `config/` directory.
    /// Environment variables still override its values.
    #[arg(short, long, value_name = "FILE", global = true, value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects which `config/{environment}.toml` is layered over the defaults.
    #[arg(short, long, value_enum, global = true)]
    pub env: Option<Environment>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Database migration operations
    ///
    /// Examples:
    ///   member-search migrate                # Apply all pending migrations
    ///   member-search migrate --dry-run      # Show pending migrations
    ///   member-search migrate --rollback 1   # Revert the last migration
    Migrate {
        /// Show pending migrations without applying them
        #[arg(long, conflicts_with = "rollback")]
        dry_run: bool,

        /// Number of migrations to roll back (1-100)
        #[arg(long, value_name = "STEPS", conflicts_with = "dry_run", value_parser = super::validation::validate_rollback_steps)]
        rollback: Option<u32>,
    },

    /// Insert two teams with two members each
    Seed,

    /// Search members; prints JSON
    Search(SearchArgs),

    /// Age summary and per-team average age; prints JSON
    Stats,
}

/// Search filters and paging
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchArgs {
    /// Exact username
    #[arg(long)]
    pub username: Option<String>,

    /// Exact team name
    #[arg(long)]
    pub team_name: Option<String>,

    /// Minimum age, inclusive
    #[arg(long, value_name = "AGE", value_parser = super::validation::validate_age)]
    pub age_goe: Option<i32>,

    /// Maximum age, inclusive
    #[arg(long, value_name = "AGE", value_parser = super::validation::validate_age)]
    pub age_loe: Option<i32>,

    /// Zero-based page index
    #[arg(long, allow_negative_numbers = true)]
    pub page: Option<i64>,

    /// Page size; defaults to search.default_page_size
    #[arg(long, allow_negative_numbers = true)]
    pub size: Option<i64>,

    /// How to obtain the total count; `none` returns every match unpaged
    #[arg(long, value_enum)]
    pub count: Option<CountMode>,
}

impl SearchArgs {
    pub fn condition(&self) -> MemberSearchCondition {
        let mut condition = MemberSearchCondition::new();
        if let Some(username) = &self.username {
            condition = condition.with_username(username.as_str());
        }
        if let Some(team_name) = &self.team_name {
            condition = condition.with_team_name(team_name.as_str());
        }
        if let Some(age) = self.age_goe {
            condition = condition.with_age_goe(age);
        }
        if let Some(age) = self.age_loe {
            condition = condition.with_age_loe(age);
        }
        condition
    }
}

/// Count mode for the search command
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountMode {
    /// No paging, no count
    None,
    /// Always run the count query
    Simple,
    /// Skip the count query when the first page is short
    Complex,
}

impl CountMode {
    /// The paged strategy, or `None` for an unpaged search.
    pub fn strategy(self) -> Option<CountStrategy> {
        match self {
            CountMode::None => None,
            CountMode::Simple => Some(CountStrategy::Simple),
            CountMode::Complex => Some(CountStrategy::Complex),
        }
    }
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "production", alias = "prod")]
    Production,
    #[value(name = "test")]
    Test,
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Production => crate::config::Environment::Production,
            Environment::Test => crate::config::Environment::Test,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_version_flag() {
        let err = Cli::try_parse_from(["member-search", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["member-search"]).is_err());
    }

    #[test]
    fn test_migrate_command() {
        let cli = Cli::try_parse_from(["member-search", "migrate", "--rollback", "2"]).unwrap();
        match cli.command {
            Commands::Migrate { dry_run, rollback } => {
                assert!(!dry_run);
                assert_eq!(rollback, Some(2));
            }
            other => panic!("Expected Migrate command, got {:?}", other),
        }
    }

    #[test]
    fn test_migrate_flags_conflict() {
        let err = Cli::try_parse_from(["member-search", "migrate", "--dry-run", "--rollback", "1"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_search_command() {
        let cli = Cli::try_parse_from([
            "member-search",
            "search",
            "--team-name",
            "teamB",
            "--age-goe",
            "35",
            "--page",
            "1",
            "--size",
            "10",
            "--count",
            "simple",
        ])
        .unwrap();

        let Commands::Search(args) = cli.command else {
            panic!("Expected Search command");
        };
        assert_eq!(args.page, Some(1));
        assert_eq!(args.size, Some(10));
        assert_eq!(args.count, Some(CountMode::Simple));
        assert_eq!(
            args.condition(),
            MemberSearchCondition::new().with_team_name("teamB").with_age_goe(35)
        );
    }

    #[test]
    fn test_search_accepts_negative_page() {
        let cli = Cli::try_parse_from(["member-search", "search", "--page", "-1"]).unwrap();

        let Commands::Search(args) = cli.command else {
            panic!("Expected Search command");
        };
        assert_eq!(args.page, Some(-1));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["member-search", "stats", "--env", "prod", "--verbose"])
            .unwrap();

        assert!(matches!(cli.command, Commands::Stats));
        assert_eq!(cli.env, Some(Environment::Production));
        assert!(cli.verbose);
    }

    #[test]
    fn test_conflicting_verbose_quiet() {
        let err = Cli::try_parse_from(["member-search", "--verbose", "--quiet", "seed"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }
}
