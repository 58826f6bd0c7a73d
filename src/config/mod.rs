//! Configuration management for member-search
//!
//! Layered loading with support for:
//! - TOML configuration files
//! - Environment variable overrides
//! - Per-environment files (development, test, production)
//!
//! # Configuration Priority (lowest to highest)
//! 1. `default.toml` - Base default configuration
//! 2. `{environment}.toml` - Environment-specific configuration
//! 3. `local.toml` - Local overrides (not committed to version control)
//! 4. `MEMBER_SEARCH_*` environment variables

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{ApplicationConfig, DatabaseConfig, SearchConfig, Settings};
