//! Small field checks shared by the entity validators.

use rust_decimal::Decimal;

use crate::constants::MAX_NAME_LENGTH;
use crate::errors::{Error, Result, ValidationError};

/// Checks a trimmed display name: required and at most `MAX_NAME_LENGTH` characters.
pub fn validate_name(field: &str, value: &str) -> Result<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            field.to_string(),
        )));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(Error::invalid_input(format!(
            "{} must be at most {} characters",
            field, MAX_NAME_LENGTH
        )));
    }
    Ok(())
}

pub fn validate_required_id(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            field.to_string(),
        )));
    }
    Ok(())
}

pub fn validate_positive(field: &str, value: Decimal) -> Result<()> {
    if value <= Decimal::ZERO {
        return Err(Error::invalid_input(format!(
            "{} must be greater than zero",
            field
        )));
    }
    Ok(())
}

pub fn validate_non_negative(field: &str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO {
        return Err(Error::invalid_input(format!("{} cannot be negative", field)));
    }
    Ok(())
}

/// Trims an optional text field, collapsing blank values to `None`.
pub fn trim_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_name_limits() {
        assert!(validate_name("name", "  Wallet  ").is_ok());
        assert!(validate_name("name", "   ").is_err());
        assert!(validate_name("name", &"a".repeat(100)).is_ok());
        assert!(validate_name("name", &"a".repeat(101)).is_err());
    }

    #[test]
    fn test_amount_checks() {
        assert!(validate_positive("amount", dec!(0.01)).is_ok());
        assert!(validate_positive("amount", Decimal::ZERO).is_err());
        assert!(validate_non_negative("fee", Decimal::ZERO).is_ok());
        assert!(validate_non_negative("fee", dec!(-1)).is_err());
    }

    #[test]
    fn test_trim_optional() {
        assert_eq!(trim_optional(Some("  x ".to_string())), Some("x".to_string()));
        assert_eq!(trim_optional(Some("   ".to_string())), None);
        assert_eq!(trim_optional(None), None);
    }
}
