//! Configuration error types

use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `default.toml` or the `--config` file is missing
    #[error("member-search configuration missing: {0}")]
    FileNotFound(String),

    /// The merged sources do not deserialize into [`Settings`](super::Settings)
    #[error("member-search configuration unreadable: {0}")]
    ParseError(String),

    /// A loaded value is out of range
    #[error("Invalid setting '{field}': {message}")]
    ValidationError {
        /// Dotted key, e.g. `search.max_page_size`
        field: String,
        /// What is wrong with the value
        message: String,
    },

    /// `MEMBER_SEARCH_APP_ENV` names an unknown environment
    #[error("MEMBER_SEARCH_APP_ENV: {0}")]
    EnvVarError(String),

    /// Source merge failure reported by the config crate
    #[error(transparent)]
    Other(#[from] config::ConfigError),
}

impl ConfigError {
    /// Create a new validation error
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        ConfigError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new file not found error
    pub fn file_not_found<S: Into<String>>(path: S) -> Self {
        ConfigError::FileNotFound(path.into())
    }
}
