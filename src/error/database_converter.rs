use crate::error::{AppError, ConstraintParser};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Converts Diesel errors into structured `AppError` variants.
///
/// Constraint violations are parsed so callers get `Duplicate` or
/// `Validation` with the offending entity and field instead of a raw
/// database message.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error, tagging unclassified failures with the
    /// operation that was running.
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
        let constraint_name = info.constraint_name();

        match kind {
            DatabaseErrorKind::UniqueViolation => {
                if let Some((entity, field, value)) =
                    ConstraintParser::parse_unique_violation(message, constraint_name)
                {
                    AppError::Duplicate {
                        entity,
                        field,
                        value,
                    }
                } else {
                    AppError::Database {
                        operation: operation.to_string(),
                        source: anyhow::Error::msg(format!(
                            "Unique constraint violation: {}",
                            message
                        )),
                    }
                }
            }
            DatabaseErrorKind::NotNullViolation => {
                if let Some((entity, field)) =
                    ConstraintParser::parse_not_null_violation(message, constraint_name)
                {
                    AppError::Validation {
                        field,
                        reason: format!("Field is required for {}", entity),
                    }
                } else {
                    AppError::Database {
                        operation: operation.to_string(),
                        source: anyhow::Error::msg(format!(
                            "Not null constraint violation: {}",
                            message
                        )),
                    }
                }
            }
            DatabaseErrorKind::ForeignKeyViolation => {
                if let Some((entity, field, referenced_value)) =
                    ConstraintParser::parse_foreign_key_violation(message, constraint_name)
                {
                    AppError::Validation {
                        field,
                        reason: format!(
                            "Invalid reference to {} with value '{}'",
                            entity, referenced_value
                        ),
                    }
                } else {
                    AppError::Database {
                        operation: operation.to_string(),
                        source: anyhow::Error::msg(format!(
                            "Foreign key constraint violation: {}",
                            message
                        )),
                    }
                }
            }
            DatabaseErrorKind::CheckViolation => {
                if let Some((entity, field)) =
                    ConstraintParser::parse_check_violation(message, constraint_name)
                {
                    AppError::Validation {
                        field,
                        reason: format!("Check constraint failed for {} field", entity),
                    }
                } else {
                    AppError::Database {
                        operation: operation.to_string(),
                        source: anyhow::Error::msg(format!(
                            "Check constraint violation: {}",
                            message
                        )),
                    }
                }
            }
            _ => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::msg(format!("Database error: {}", message)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    struct MockDatabaseErrorInfo {
        message: String,
        constraint_name: Option<String>,
    }

    impl diesel::result::DatabaseErrorInformation for MockDatabaseErrorInfo {
        fn message(&self) -> &str {
            &self.message
        }

        fn details(&self) -> Option<&str> {
            None
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            None
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            self.constraint_name.as_deref()
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    #[test]
    fn convert_not_found_error() {
        let error = DieselError::NotFound;
        let result = DatabaseErrorConverter::convert_diesel_error(error, "find profile");

        match result {
            AppError::NotFound {
                entity,
                field,
                value,
            } => {
                assert_eq!(entity, "resource");
                assert_eq!(field, "id");
                assert_eq!(value, "unknown");
            }
            _ => panic!("Expected NotFound error"),
        }
    }

    #[test]
    fn convert_duplicate_job_url() {
        let info = MockDatabaseErrorInfo {
            message: "duplicate key value violates unique constraint \"job_applications_url_key\"\nDETAIL: Key (url)=(https://example.com/jobs/42) already exists.".to_string(),
            constraint_name: Some("job_applications_url_key".to_string()),
        };

        let error = DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, Box::new(info));
        let result = DatabaseErrorConverter::convert_diesel_error(error, "insert job");

        match result {
            AppError::Duplicate {
                entity,
                field,
                value,
            } => {
                assert_eq!(entity, "job_applications");
                assert_eq!(field, "url");
                assert_eq!(value, "https://example.com/jobs/42");
            }
            _ => panic!("Expected Duplicate error, got: {:?}", result),
        }
    }

    #[test]
    fn convert_not_null_violation() {
        let info = MockDatabaseErrorInfo {
            message: "null value in column \"keywords\" violates not-null constraint".to_string(),
            constraint_name: None,
        };

        let error = DieselError::DatabaseError(DatabaseErrorKind::NotNullViolation, Box::new(info));
        let result = DatabaseErrorConverter::convert_diesel_error(error, "insert criteria");

        match result {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "keywords");
                assert!(reason.contains("required"));
            }
            _ => panic!("Expected Validation error, got: {:?}", result),
        }
    }

    #[test]
    fn convert_foreign_key_violation() {
        let info = MockDatabaseErrorInfo {
            message: "insert or update on table \"cover_letters\" violates foreign key constraint \"cover_letters_job_application_id_fkey\"\nDETAIL: Key (job_application_id)=(999) is not present in table \"job_applications\".".to_string(),
            constraint_name: Some("cover_letters_job_application_id_fkey".to_string()),
        };

        let error =
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, Box::new(info));
        let result = DatabaseErrorConverter::convert_diesel_error(error, "insert cover letter");

        match result {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "job_application_id");
                assert!(reason.contains("Invalid reference"));
                assert!(reason.contains("999"));
            }
            _ => panic!("Expected Validation error, got: {:?}", result),
        }
    }

    #[test]
    fn convert_check_violation_on_match_score() {
        let info = MockDatabaseErrorInfo {
            message: "new row for relation \"job_applications\" violates check constraint \"job_applications_match_score_check\"".to_string(),
            constraint_name: Some("job_applications_match_score_check".to_string()),
        };

        let error = DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, Box::new(info));
        let result = DatabaseErrorConverter::convert_diesel_error(error, "update job");

        match result {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "match_score");
                assert!(reason.contains("Check constraint failed"));
            }
            _ => panic!("Expected Validation error, got: {:?}", result),
        }
    }
}
