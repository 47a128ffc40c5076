//! Validation error types and field helpers

use rust_decimal::Decimal;

/// Largest value a `NUMERIC(10,2)` column can hold.
fn max_amount() -> Decimal {
    Decimal::new(9_999_999_999, 2)
}

/// Validation error for domain models
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// Field exceeds maximum length
    #[error("{field} exceeds maximum length of {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// String doesn't match required format
    #[error("{field}: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    /// Invalid enum variant
    #[error("invalid {field} value: '{value}'")]
    InvalidVariant { field: &'static str, value: String },

    /// Numeric value must be greater than zero
    #[error("{field} must be greater than 0")]
    NotPositive { field: &'static str },

    /// Two fields are inconsistent with each other
    #[error("{field}: {reason}")]
    Inconsistent {
        field: &'static str,
        reason: &'static str,
    },
}

/// Trim a required text field and enforce its column width.
pub fn required_text(field: &'static str, value: &str, max: usize) -> Result<String, ValidationError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    if trimmed.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }

    Ok(trimmed.to_owned())
}

/// Trim an optional text field. Blank input becomes `None`.
pub fn optional_text(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) if s.chars().count() > max => Err(ValidationError::TooLong { field, max }),
        Some(s) => Ok(Some(s.to_owned())),
    }
}

/// Money amount: strictly positive, at most two decimal places, fits `NUMERIC(10,2)`.
pub fn positive_amount(field: &'static str, value: Decimal) -> Result<Decimal, ValidationError> {
    if value <= Decimal::ZERO {
        return Err(ValidationError::NotPositive { field });
    }

    if value.normalize().scale() > 2 {
        return Err(ValidationError::InvalidFormat {
            field,
            reason: "at most two decimal places are allowed",
        });
    }

    if value > max_amount() {
        return Err(ValidationError::InvalidFormat {
            field,
            reason: "exceeds 99999999.99",
        });
    }

    Ok(value)
}
