//! Command handlers
//!
//! Each handler runs one subcommand and returns the text to print.

pub mod migrate;
pub mod search;
pub mod seed;
pub mod stats;

pub use migrate::MigrateCommandHandler;
pub use search::SearchCommandHandler;
pub use seed::SeedCommandHandler;
pub use stats::StatsCommandHandler;
