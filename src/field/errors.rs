//! Field error types
//!
//! Two channels, never mixed:
//! - `ConfigError`: an option map that is illegal for the declared type (construction)
//! - `ValidationError`: bad input data, collected and returned by `check`
//!
//! Validation error codes:
//! - REQUIRED, TYPE
//! - STRING_TOO_SHORT, STRING_TOO_LONG
//! - STRING_HAS_UPPER_CASE, STRING_DONT_HAVE_UPPER_CASE
//! - STRING_HAS_LOWER_CASE, STRING_DONT_HAVE_LOWER_CASE
//! - NUMBER_TOO_SMALL, NUMBER_TOO_LARGE

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

use super::types::TypeFamily;

/// Result type for field construction
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Construction-time configuration errors.
///
/// These indicate a schema-definition mistake, not bad user input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error(
        "Option {option} not allowed for {family} types, list of allowed values is: {}",
        .allowed.join(", ")
    )]
    IllegalOption {
        option: String,
        family: TypeFamily,
        allowed: Vec<&'static str>,
    },

    #[error("Option {option} must be {expected}, got {found}")]
    InvalidOptionValue {
        option: String,
        expected: &'static str,
        found: Value,
    },
}

impl ConfigError {
    /// Returns the option key that caused the error
    pub fn option(&self) -> &str {
        match self {
            ConfigError::IllegalOption { option, .. } => option,
            ConfigError::InvalidOptionValue { option, .. } => option,
        }
    }
}

/// Validation error kinds, serialized as their wire codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Value missing on a non-optional field
    Required,
    /// Value has the wrong shape for the declared type
    Type,
    StringTooShort,
    StringTooLong,
    StringHasUpperCase,
    StringDontHaveUpperCase,
    StringHasLowerCase,
    StringDontHaveLowerCase,
    NumberTooSmall,
    NumberTooLarge,
}

impl ErrorKind {
    /// Returns the wire code
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Required => "REQUIRED",
            ErrorKind::Type => "TYPE",
            ErrorKind::StringTooShort => "STRING_TOO_SHORT",
            ErrorKind::StringTooLong => "STRING_TOO_LONG",
            ErrorKind::StringHasUpperCase => "STRING_HAS_UPPER_CASE",
            ErrorKind::StringDontHaveUpperCase => "STRING_DONT_HAVE_UPPER_CASE",
            ErrorKind::StringHasLowerCase => "STRING_HAS_LOWER_CASE",
            ErrorKind::StringDontHaveLowerCase => "STRING_DONT_HAVE_LOWER_CASE",
            ErrorKind::NumberTooSmall => "NUMBER_TOO_SMALL",
            ErrorKind::NumberTooLarge => "NUMBER_TOO_LARGE",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A single validation failure for one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Field name (never the renamed output key)
    pub field: String,
    /// Error kind
    pub error: ErrorKind,
    /// Offending raw value, `null` when absent or falsy
    pub value: Value,
}

impl ValidationError {
    /// Creates an error carrying the offending value.
    ///
    /// Falsy values (`false`, `0`, `""`) are recorded as `null`.
    pub fn new(field: impl Into<String>, error: ErrorKind, value: &Value) -> Self {
        let value = if super::output::is_present(value) {
            value.clone()
        } else {
            Value::Null
        };

        Self {
            field: field.into(),
            error,
            value,
        }
    }

    /// Creates a REQUIRED error, which never carries a value
    pub fn required(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            error: ErrorKind::Required,
            value: Value::Null,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field '{}': {}", self.field, self.error)?;
        if !self.value.is_null() {
            write!(f, " (value: {})", self.value)?;
        }
        Ok(())
    }
}
