//! Shared Diesel error mapping for the repositories in this module.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Outcome categories shared by every repository port error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StoreFailure {
    Connection(String),
    Query(String),
    UniqueViolation,
}

/// Extract a readable message from a pool error.
pub(crate) fn map_pool_error(error: PoolError) -> StoreFailure {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            StoreFailure::Connection(message)
        }
    }
}

/// Classify a Diesel error, emitting debug context.
///
/// Unique violations are surfaced separately so callers can report the
/// conflicting key; all other database errors carry generic messages.
pub(crate) fn map_diesel_error(error: DieselError) -> StoreFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => StoreFailure::Query("record not found".to_owned()),
        DieselError::QueryBuilderError(_) => StoreFailure::Query("database query error".to_owned()),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            StoreFailure::UniqueViolation
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            StoreFailure::Connection("database connection error".to_owned())
        }
        _ => StoreFailure::Query("database error".to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct Info(&'static str);

    impl diesel::result::DatabaseErrorInformation for Info {
        fn message(&self) -> &str {
            self.0
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
            None
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(Info("boom")))
    }

    #[rstest]
    #[case(database_error(DatabaseErrorKind::UniqueViolation), StoreFailure::UniqueViolation)]
    #[case(
        database_error(DatabaseErrorKind::ClosedConnection),
        StoreFailure::Connection("database connection error".to_owned())
    )]
    #[case(
        database_error(DatabaseErrorKind::ForeignKeyViolation),
        StoreFailure::Query("database error".to_owned())
    )]
    #[case(DieselError::NotFound, StoreFailure::Query("record not found".to_owned()))]
    fn diesel_errors_are_classified(#[case] error: DieselError, #[case] expected: StoreFailure) {
        assert_eq!(map_diesel_error(error), expected);
    }

    #[rstest]
    fn pool_errors_become_connection_failures() {
        assert_eq!(
            map_pool_error(PoolError::checkout("timed out")),
            StoreFailure::Connection("timed out".to_owned())
        );
    }
}
