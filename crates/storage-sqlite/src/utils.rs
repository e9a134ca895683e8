//! Column codecs shared by the repositories.
//!
//! Money is stored as TEXT so no precision is lost on the way through SQLite,
//! and tags as a JSON array in a TEXT column.

use rust_decimal::Decimal;
use std::str::FromStr;

use dompet_core::errors::{Error, Result};

use crate::errors::StorageError;

pub(crate) fn parse_decimal(value: &str, column: &str) -> Result<Decimal> {
    Decimal::from_str(value).map_err(|e| {
        StorageError::SerializationError(format!(
            "invalid decimal '{}' in column {}: {}",
            value, column, e
        ))
        .into()
    })
}

/// Parses a stored enum label, reporting corrupt rows as storage errors rather
/// than as user validation failures.
pub(crate) fn parse_label<T>(value: &str, column: &str) -> Result<T>
where
    T: FromStr<Err = Error>,
{
    T::from_str(value).map_err(|e| {
        StorageError::SerializationError(format!("column {}: {}", column, e)).into()
    })
}

pub(crate) fn encode_tags(tags: &[String]) -> Result<String> {
    serde_json::to_string(tags)
        .map_err(|e| StorageError::SerializationError(format!("tags: {}", e)).into())
}

pub(crate) fn decode_tags(value: &str) -> Result<Vec<String>> {
    if value.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(value)
        .map_err(|e| StorageError::SerializationError(format!("tags '{}': {}", value, e)).into())
}
