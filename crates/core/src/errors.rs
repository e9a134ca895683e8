//! Core error types for the dompet ledger.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer.

use chrono::ParseError as ChronoParseError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the ledger.
///
/// Database-specific errors are wrapped in string form to keep this type
/// database-agnostic.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The wallet has been soft-deleted and can no longer move money.
    #[error("Wallet '{0}' is inactive")]
    InactiveWallet(String),

    #[error("Insufficient balance in wallet '{wallet_id}': available {available}, required {required}")]
    InsufficientBalance {
        wallet_id: String,
        available: Decimal,
        required: Decimal,
    },

    #[error("Cannot transfer to the same wallet")]
    SameWalletTransfer,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors (Diesel, SQLite, etc.) into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint was violated (e.g., duplicate key).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A foreign key constraint was violated.
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// A database transaction failed to commit or was aborted.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Failed to parse date/time: {0}")]
    DateTimeParse(#[from] ChronoParseError),
}

impl Error {
    /// Shorthand for an `InvalidInput` validation error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Error::Validation(ValidationError::InvalidInput(message.into()))
    }

    /// Shorthand for a `NotFound` database error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Error::Database(DatabaseError::NotFound(message.into()))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Database(DatabaseError::NotFound(_)))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    pub fn is_insufficient_balance(&self) -> bool {
        matches!(self, Error::InsufficientBalance { .. })
    }
}

impl DatabaseError {
    fn with_context(self, context: &str) -> Self {
        let wrap = |msg: String| format!("{}: {}", context, msg);
        match self {
            DatabaseError::ConnectionFailed(m) => DatabaseError::ConnectionFailed(wrap(m)),
            DatabaseError::PoolCreationFailed(m) => DatabaseError::PoolCreationFailed(wrap(m)),
            DatabaseError::QueryFailed(m) => DatabaseError::QueryFailed(wrap(m)),
            DatabaseError::NotFound(m) => DatabaseError::NotFound(wrap(m)),
            DatabaseError::UniqueViolation(m) => DatabaseError::UniqueViolation(wrap(m)),
            DatabaseError::ForeignKeyViolation(m) => DatabaseError::ForeignKeyViolation(wrap(m)),
            DatabaseError::TransactionFailed(m) => DatabaseError::TransactionFailed(wrap(m)),
            DatabaseError::MigrationFailed(m) => DatabaseError::MigrationFailed(wrap(m)),
            DatabaseError::Internal(m) => DatabaseError::Internal(wrap(m)),
        }
    }
}

/// Adds context to storage failures without changing their kind.
///
/// Only `Error::Database` values are rewritten; domain errors such as
/// `InsufficientBalance` pass through untouched so callers can still match on them.
pub trait ResultExt<T> {
    fn context(self, context: &str) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: &str) -> Result<T> {
        self.map_err(|err| match err {
            Error::Database(db) => Error::Database(db.with_context(context)),
            other => other,
        })
    }
}

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}
