//! Shared classification of Diesel failures.
//!
//! Repositories translate [`DieselFailure`] into their own port error enums,
//! so constraint violations become domain-specific conflicts instead of
//! generic query errors.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

/// Coarse outcome of a failed Diesel operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DieselFailure {
    UniqueViolation { constraint: Option<String> },
    ForeignKeyViolation { constraint: Option<String> },
    Connection(&'static str),
    Query(&'static str),
}

impl DieselFailure {
    /// Human-readable message for connection and query failures.
    pub(crate) fn message(&self) -> String {
        match self {
            Self::UniqueViolation { constraint } => {
                format!("unique constraint violated: {}", constraint.as_deref().unwrap_or("?"))
            }
            Self::ForeignKeyViolation { constraint } => {
                format!(
                    "foreign key constraint violated: {}",
                    constraint.as_deref().unwrap_or("?")
                )
            }
            Self::Connection(message) | Self::Query(message) => (*message).to_owned(),
        }
    }
}

/// Classify a Diesel error, logging the raw cause at debug level.
pub(crate) fn classify_diesel_error(error: DieselError, operation: &str) -> DieselFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), %operation, "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            %operation,
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            DieselFailure::UniqueViolation {
                constraint: info.constraint_name().map(str::to_owned),
            }
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            DieselFailure::ForeignKeyViolation {
                constraint: info.constraint_name().map(str::to_owned),
            }
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DieselFailure::Connection("database connection error")
        }
        DieselError::NotFound => DieselFailure::Query("record not found"),
        DieselError::QueryBuilderError(_) => DieselFailure::Query("database query error"),
        _ => DieselFailure::Query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug)]
    struct Info {
        constraint: Option<&'static str>,
    }

    impl diesel::result::DatabaseErrorInformation for Info {
        fn message(&self) -> &str {
            "constraint violated"
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
            self.constraint
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn db_error(kind: DatabaseErrorKind, constraint: Option<&'static str>) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(Info { constraint }))
    }

    #[rstest]
    #[case(
        db_error(DatabaseErrorKind::UniqueViolation, Some("domains_name_key")),
        DieselFailure::UniqueViolation { constraint: Some("domains_name_key".to_owned()) }
    )]
    #[case(
        db_error(DatabaseErrorKind::ForeignKeyViolation, Some("pages_domain_id_fkey")),
        DieselFailure::ForeignKeyViolation { constraint: Some("pages_domain_id_fkey".to_owned()) }
    )]
    #[case(
        db_error(DatabaseErrorKind::ClosedConnection, None),
        DieselFailure::Connection("database connection error")
    )]
    #[case(DieselError::NotFound, DieselFailure::Query("record not found"))]
    #[case(DieselError::RollbackTransaction, DieselFailure::Query("database error"))]
    fn classifies_errors(#[case] error: DieselError, #[case] expected: DieselFailure) {
        assert_eq!(classify_diesel_error(error, "test"), expected);
    }
}
