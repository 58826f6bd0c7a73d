use crate::error::DatabaseErrorConverter;
use thiserror::Error;

/// Application-wide error type.
///
/// Page-request problems are detected locally before any query runs. Every
/// other variant originates in the persistence layer or in configuration and
/// is handed to the caller unchanged.
#[derive(Error, Debug)]
pub enum AppError {
    /// Page request with a negative offset or limit
    #[error("Invalid page request: {field} {reason}")]
    InvalidPageRequest { field: String, reason: String },

    /// Resource not found error with entity, field, and value information
    #[error("Resource not found: {entity} with {field}={value}")]
    NotFound {
        entity: String,
        field: String,
        value: String,
    },

    /// Duplicate entry error for unique constraint violations
    #[error("Duplicate entry: {entity}.{field} = '{value}' already exists")]
    Duplicate {
        entity: String,
        field: String,
        value: String,
    },

    /// Constraint or argument validation error with field-specific details
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Query execution error with operation context
    #[error("Database operation failed: {operation}")]
    Database {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Connection pool error
    #[error("Connection pool error")]
    ConnectionPool {
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    pub fn invalid_page_request(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::InvalidPageRequest {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Wraps a pool checkout failure.
    pub fn connection_pool<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        AppError::ConnectionPool {
            source: anyhow::Error::from(error),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(error: diesel::result::Error) -> Self {
        DatabaseErrorConverter::convert_diesel_error(error, "database operation")
    }
}

impl From<crate::config::error::ConfigError> for AppError {
    fn from(error: crate::config::error::ConfigError) -> Self {
        let key = match &error {
            crate::config::error::ConfigError::ValidationError { field, .. } => field.clone(),
            _ => "settings".to_string(),
        };
        AppError::Configuration {
            key,
            source: anyhow::Error::from(error),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
