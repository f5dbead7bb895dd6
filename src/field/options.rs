//! Field options and the construction-time options gate
//!
//! Option keys are checked against the declared type's legal key set before
//! anything else happens. The first illegal key aborts construction.
//! Values of the keys the checkers read are then parsed into typed form;
//! keys reserved for unchecked types are kept raw.

use serde_json::{Map, Value};

use super::errors::{ConfigError, ConfigResult};
use super::types::{DeclaredType, TypeFamily};

/// Output key policy derived from `newPropertyName`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Rename {
    /// Key is the field's own name
    #[default]
    Keep,
    /// Key is the given name
    To(String),
    /// No key is produced, even for a valid value
    Suppress,
}

/// Target of `convertToDateFormat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// Epoch milliseconds, as an integer
    Milliseconds,
    /// `YYYY-MM-DD`
    Date,
    /// `YYYY-MM-DD HH:mm:ss`
    DateTime,
}

impl DateFormat {
    /// Parses an option value; unknown formats are not conversions.
    pub fn from_option(value: &str) -> Option<Self> {
        match value {
            "milliseconds" => Some(DateFormat::Milliseconds),
            "YYYY-MM-DD" => Some(DateFormat::Date),
            "YYYY-MM-DD HH:mm:ss" => Some(DateFormat::DateTime),
            _ => None,
        }
    }

    /// Returns the chrono format string for textual targets
    pub fn pattern(&self) -> Option<&'static str> {
        match self {
            DateFormat::Milliseconds => None,
            DateFormat::Date => Some("%Y-%m-%d"),
            DateFormat::DateTime => Some("%Y-%m-%d %H:%M:%S"),
        }
    }
}

/// Constraints read by the string checker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StringConstraints {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub has_upper_case: Option<bool>,
    pub has_lower_case: Option<bool>,
}

/// Constraints read by the number checker
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NumberConstraints {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Validated options for one field.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldOptions {
    raw: Map<String, Value>,
    rename: Rename,
    string: StringConstraints,
    number: NumberConstraints,
    date_format: Option<DateFormat>,
}

impl FieldOptions {
    /// Runs the options gate for `declared_type` and parses the option values.
    ///
    /// # Errors
    ///
    /// - `ConfigError::IllegalOption` for the first key not legal for the type family
    /// - `ConfigError::InvalidOptionValue` when a checked option has the wrong shape
    pub fn parse(declared_type: DeclaredType, raw: Map<String, Value>) -> ConfigResult<Self> {
        let family = declared_type.family();
        check_keys(family, &raw)?;

        let mut options = FieldOptions::default();

        for (key, value) in &raw {
            match (family, key.as_str()) {
                (_, "newPropertyName") => options.rename = parse_rename(value)?,
                (TypeFamily::String, "minLength") => {
                    options.string.min_length = parse_length(key, value)?
                }
                (TypeFamily::String, "maxLength") => {
                    options.string.max_length = parse_length(key, value)?
                }
                (TypeFamily::String, "hasUpperCase") => {
                    options.string.has_upper_case = parse_bool(key, value)?
                }
                (TypeFamily::String, "hasLowerCase") => {
                    options.string.has_lower_case = parse_bool(key, value)?
                }
                (TypeFamily::Number, "min") => options.number.min = parse_number(key, value)?,
                (TypeFamily::Number, "max") => options.number.max = parse_number(key, value)?,
                (TypeFamily::Date, "convertToDateFormat") => {
                    options.date_format = parse_date_format(key, value)?
                }
                // Reserved for unchecked types (round, convertToNumber, allowedExtensions, ...)
                _ => {}
            }
        }

        options.raw = raw;
        Ok(options)
    }

    /// Returns the options exactly as supplied
    pub fn raw(&self) -> &Map<String, Value> {
        &self.raw
    }

    /// Returns true when no options were supplied
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn rename(&self) -> &Rename {
        &self.rename
    }

    pub fn string(&self) -> &StringConstraints {
        &self.string
    }

    pub fn number(&self) -> &NumberConstraints {
        &self.number
    }

    pub fn date_format(&self) -> Option<DateFormat> {
        self.date_format
    }
}

/// Fails on the first key not legal for `family`.
fn check_keys(family: TypeFamily, raw: &Map<String, Value>) -> ConfigResult<()> {
    let Some(allowed) = family.allowed_options() else {
        return Ok(());
    };

    match raw.keys().find(|key| !allowed.contains(&key.as_str())) {
        Some(key) => Err(ConfigError::IllegalOption {
            option: key.clone(),
            family,
            allowed: allowed.to_vec(),
        }),
        None => Ok(()),
    }
}

fn invalid(key: &str, expected: &'static str, found: &Value) -> ConfigError {
    ConfigError::InvalidOptionValue {
        option: key.to_string(),
        expected,
        found: found.clone(),
    }
}

fn parse_rename(value: &Value) -> ConfigResult<Rename> {
    match value {
        Value::Null => Ok(Rename::Suppress),
        Value::String(name) => Ok(Rename::To(name.clone())),
        other => Err(invalid("newPropertyName", "a string or null", other)),
    }
}

fn parse_length(key: &str, value: &Value) -> ConfigResult<Option<usize>> {
    if value.is_null() {
        return Ok(None);
    }

    if let Some(n) = value.as_u64() {
        return usize::try_from(n)
            .map(Some)
            .map_err(|_| invalid(key, "a non-negative integer", value));
    }

    // 5.0 is accepted as 5
    match value.as_f64() {
        Some(f) if f >= 0.0 && f.fract() == 0.0 && f <= usize::MAX as f64 => {
            Ok(Some(f as usize))
        }
        _ => Err(invalid(key, "a non-negative integer", value)),
    }
}

fn parse_bool(key: &str, value: &Value) -> ConfigResult<Option<bool>> {
    match value {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some(*b)),
        other => Err(invalid(key, "a boolean", other)),
    }
}

fn parse_number(key: &str, value: &Value) -> ConfigResult<Option<f64>> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| invalid(key, "a number", value)),
        other => Err(invalid(key, "a number", other)),
    }
}

fn parse_date_format(key: &str, value: &Value) -> ConfigResult<Option<DateFormat>> {
    match value {
        Value::Null => Ok(None),
        Value::String(format) => Ok(DateFormat::from_option(format)),
        other => Err(invalid(key, "a string", other)),
    }
}
