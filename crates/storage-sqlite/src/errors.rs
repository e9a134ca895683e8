//! Storage-specific error types for SQLite operations.
//!
//! Diesel and r2d2 errors are wrapped here and converted to the
//! database-agnostic error types defined in `dompet_core`.

use diesel::result::Error as DieselError;
use dompet_core::errors::{DatabaseError, Error};
use thiserror::Error;

/// Storage-specific errors that wrap Diesel and r2d2 types.
///
/// These never leave the crate; they are converted to `dompet_core::Error`
/// at the repository boundary.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(#[from] diesel::ConnectionError),

    #[error("Connection pool error: {0}")]
    PoolError(#[from] r2d2::Error),

    #[error("Query execution failed: {0}")]
    QueryFailed(#[from] DieselError),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Writer unavailable: {0}")]
    WriterUnavailable(String),

    #[error("Transaction abandoned by caller")]
    Abandoned,

    /// A domain error raised inside a write job. Carried through untouched so
    /// callers still see e.g. `InsufficientBalance` after the rollback.
    #[error(transparent)]
    Core(Error),
}

impl From<Error> for StorageError {
    fn from(err: Error) -> Self {
        StorageError::Core(err)
    }
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConnectionFailed(e) => {
                Error::Database(DatabaseError::ConnectionFailed(e.to_string()))
            }
            StorageError::PoolError(e) => {
                Error::Database(DatabaseError::PoolCreationFailed(e.to_string()))
            }
            StorageError::QueryFailed(DieselError::NotFound) => {
                Error::Database(DatabaseError::NotFound("Record not found".to_string()))
            }
            StorageError::QueryFailed(DieselError::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                info,
            )) => Error::Database(DatabaseError::UniqueViolation(info.message().to_string())),
            StorageError::QueryFailed(DieselError::DatabaseError(
                diesel::result::DatabaseErrorKind::ForeignKeyViolation,
                info,
            )) => Error::Database(DatabaseError::ForeignKeyViolation(
                info.message().to_string(),
            )),
            StorageError::QueryFailed(e) => {
                Error::Database(DatabaseError::QueryFailed(e.to_string()))
            }
            StorageError::MigrationFailed(e) => Error::Database(DatabaseError::MigrationFailed(e)),
            StorageError::SerializationError(e) => Error::Database(DatabaseError::Internal(e)),
            StorageError::WriterUnavailable(e) => {
                Error::Database(DatabaseError::TransactionFailed(e))
            }
            StorageError::Abandoned => Error::Database(DatabaseError::TransactionFailed(
                "caller went away before commit; rolled back".to_string(),
            )),
            StorageError::Core(e) => e,
        }
    }
}

/// Extension trait for converting Diesel and r2d2 results to core results.
///
/// Provides `.into_core()` on `Result<T, diesel::result::Error>` and
/// `Result<T, r2d2::Error>`, routing through `StorageError`.
pub trait IntoCore<T> {
    fn into_core(self) -> dompet_core::Result<T>;
}

impl<T> IntoCore<T> for std::result::Result<T, DieselError> {
    fn into_core(self) -> dompet_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}

impl<T> IntoCore<T> for std::result::Result<T, r2d2::Error> {
    fn into_core(self) -> dompet_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}

/// Maps "no row" to a not-found error naming the entity, everything else as usual.
pub(crate) fn not_found_as(entity: &str, id: &str) -> impl FnOnce(DieselError) -> Error {
    let message = format!("{} {}", entity, id);
    move |err| match err {
        DieselError::NotFound => Error::not_found(message),
        other => StorageError::from(other).into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_core_errors_survive_round_trip() {
        let original = Error::InsufficientBalance {
            wallet_id: "w1".to_string(),
            available: dec!(10),
            required: dec!(25),
        };
        let back: Error = StorageError::from(original).into();
        assert!(back.is_insufficient_balance());
    }

    #[test]
    fn test_not_found_maps_to_core_not_found() {
        let err: Error = StorageError::QueryFailed(DieselError::NotFound).into();
        assert!(err.is_not_found());

        let named = not_found_as("wallet", "w9")(DieselError::NotFound);
        assert!(named.is_not_found());
        assert!(named.to_string().contains("wallet w9"));
    }
}
