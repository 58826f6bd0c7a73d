use crate::error::{AppError, ConstraintKind, ConstraintParser, ConstraintViolation};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Utility for converting database errors to structured AppError variants.
///
/// Constraint violations become `Duplicate` or `Validation`; everything else
/// is reported as `Database` with the failing operation attached.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error to an appropriate AppError variant.
    ///
    /// # Arguments
    /// * `error` - The Diesel error to convert
    /// * `operation` - Description of the database operation that failed
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info, operation)
            }
            DieselError::NotFound => AppError::NotFound {
                entity: "resource".to_string(),
                field: "id".to_string(),
                value: "unknown".to_string(),
            },
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        info: Box<dyn diesel::result::DatabaseErrorInformation + Send + Sync>,
        operation: &str,
    ) -> AppError {
        let message = info.message();
        let constraint_kind = match kind {
            DatabaseErrorKind::UniqueViolation => Some(ConstraintKind::Unique),
            DatabaseErrorKind::ForeignKeyViolation => Some(ConstraintKind::ForeignKey),
            DatabaseErrorKind::NotNullViolation => Some(ConstraintKind::NotNull),
            DatabaseErrorKind::CheckViolation => Some(ConstraintKind::Check),
            _ => None,
        };

        let violation = constraint_kind
            .and_then(|kind| ConstraintParser::parse(kind, message, info.constraint_name()));

        match violation {
            Some(violation) => Self::from_violation(violation),
            None => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::msg(format!("Database error: {}", message)),
            },
        }
    }

    fn from_violation(violation: ConstraintViolation) -> AppError {
        let ConstraintViolation {
            kind,
            entity,
            field,
            value,
        } = violation;

        match kind {
            ConstraintKind::Unique => AppError::Duplicate {
                entity,
                field,
                value: value.unwrap_or_else(|| "duplicate_value".to_string()),
            },
            ConstraintKind::ForeignKey => AppError::Validation {
                reason: format!(
                    "Invalid reference from {} with value '{}'",
                    entity,
                    value.as_deref().unwrap_or("unknown")
                ),
                field,
            },
            ConstraintKind::NotNull => AppError::Validation {
                field,
                reason: format!("Field is required for {}", entity),
            },
            ConstraintKind::Check => AppError::Validation {
                field,
                reason: format!("Check constraint failed for {} field", entity),
            },
        }
    }
}
