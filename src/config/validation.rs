//! Configuration validation logic
//!
//! Range and format checks for every configuration section, reported as
//! `ConfigError::ValidationError` naming the offending key.

use crate::config::error::ConfigError;
use crate::config::settings::{DatabaseConfig, SearchConfig, Settings};
use crate::logger::LoggerConfig;

const VALID_DATABASE_SCHEMES: &[&str] = &["postgres://", "postgresql://"];

impl DatabaseConfig {
    /// Validate database configuration
    ///
    /// # Validation Rules
    /// - URL must be a non-empty PostgreSQL URL
    /// - Max and min connections must be greater than 0
    /// - Min connections must not exceed max connections
    /// - Connection timeout must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::validation(
                "database.url",
                "Database URL is required. Set database.url or MEMBER_SEARCH_DATABASE__URL.",
            ));
        }

        if !VALID_DATABASE_SCHEMES
            .iter()
            .any(|scheme| self.url.starts_with(scheme))
        {
            return Err(ConfigError::validation(
                "database.url",
                "Invalid database URL format. Expected postgres://[user:password@]host[:port]/database",
            ));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::validation(
                "database.max_connections",
                "Max connections must be greater than 0.",
            ));
        }

        if self.min_connections == 0 {
            return Err(ConfigError::validation(
                "database.min_connections",
                "Min connections must be greater than 0.",
            ));
        }

        if self.min_connections > self.max_connections {
            return Err(ConfigError::ValidationError {
                field: "database.min_connections".to_string(),
                message: format!(
                    "Min connections ({}) cannot exceed max connections ({}).",
                    self.min_connections, self.max_connections
                ),
            });
        }

        if self.connection_timeout == 0 {
            return Err(ConfigError::validation(
                "database.connection_timeout",
                "Connection timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl SearchConfig {
    /// Validate search configuration
    ///
    /// # Validation Rules
    /// - Max page size must be greater than 0
    /// - Default page size must be between 1 and the max page size
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_page_size <= 0 {
            return Err(ConfigError::validation(
                "search.max_page_size",
                "Max page size must be greater than 0.",
            ));
        }

        if self.default_page_size <= 0 || self.default_page_size > self.max_page_size {
            return Err(ConfigError::ValidationError {
                field: "search.default_page_size".to_string(),
                message: format!(
                    "Default page size ({}) must be between 1 and max page size ({}).",
                    self.default_page_size, self.max_page_size
                ),
            });
        }

        Ok(())
    }
}

fn validate_logger(logger: &LoggerConfig) -> Result<(), ConfigError> {
    logger
        .validate()
        .map_err(|e| ConfigError::validation("logger".to_string(), e.to_string()))
}

impl Settings {
    /// Validate all configuration sections
    ///
    /// Returns the first validation error encountered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.database.validate()?;
        validate_logger(&self.logger)?;
        self.search.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_settings() -> Settings {
        let mut settings = Settings::default();
        settings.database.url = "postgres://localhost/members".to_string();
        settings
    }

    fn failing_field(settings: &Settings) -> String {
        match settings.validate() {
            Err(ConfigError::ValidationError { field, .. }) => field,
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_settings_valid() {
        assert!(valid_settings().validate().is_ok());
    }

    #[test]
    fn test_database_url_required() {
        assert_eq!(failing_field(&Settings::default()), "database.url");
    }

    #[test]
    fn test_database_url_scheme() {
        let mut settings = valid_settings();
        settings.database.url = "mysql://localhost/members".to_string();
        assert_eq!(failing_field(&settings), "database.url");

        settings.database.url = "postgresql://user:secret@db:5432/members".to_string();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_database_pool_bounds() {
        let mut settings = valid_settings();
        settings.database.max_connections = 0;
        assert_eq!(failing_field(&settings), "database.max_connections");

        let mut settings = valid_settings();
        settings.database.min_connections = 20;
        assert_eq!(failing_field(&settings), "database.min_connections");

        let mut settings = valid_settings();
        settings.database.connection_timeout = 0;
        assert_eq!(failing_field(&settings), "database.connection_timeout");
    }

    #[test]
    fn test_search_page_sizes() {
        let mut settings = valid_settings();
        settings.search.max_page_size = 0;
        assert_eq!(failing_field(&settings), "search.max_page_size");

        let mut settings = valid_settings();
        settings.search.default_page_size = 500;
        assert_eq!(failing_field(&settings), "search.default_page_size");

        let mut settings = valid_settings();
        settings.search.default_page_size = 0;
        assert_eq!(failing_field(&settings), "search.default_page_size");
    }

    #[test]
    fn test_invalid_logger() {
        let mut settings = valid_settings();
        settings.logger.level = "chatty".to_string();
        assert_eq!(failing_field(&settings), "logger");
    }
}
