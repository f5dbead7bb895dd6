//! The field: one raw value bound to a declared type
//!
//! A `Field` is built once per validation attempt. Construction runs the
//! options gate; `check` is a single deterministic pass:
//! - missing + required: one REQUIRED error, empty fragment
//! - missing + optional: empty fragment, no errors
//! - present: type checker (element-wise for arrays), then output shaping

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use super::array::ArrayAdapter;
use super::checker::{Checked, Checker, DateChecker, NumberChecker, StringChecker, StubChecker};
use super::config::CheckConfig;
use super::errors::{ConfigResult, ValidationError};
use super::options::FieldOptions;
use super::output;
use super::types::DeclaredType;

/// Result of checking one field.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CheckResult {
    /// At most one key: the field name or its rename
    pub fragment: Map<String, Value>,
    /// Errors in emission order
    pub errors: Vec<ValidationError>,
}

impl CheckResult {
    /// Returns true when no errors were reported
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Splits into (fragment, errors)
    pub fn into_parts(self) -> (Map<String, Value>, Vec<ValidationError>) {
        (self.fragment, self.errors)
    }
}

/// An immutable field ready to be checked.
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    value: Option<Value>,
    declared_type: DeclaredType,
    optional: bool,
    options: FieldOptions,
    config: CheckConfig,
}

impl Field {
    /// Creates a field with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any option key is illegal for `declared_type`
    /// or a checked option has the wrong shape.
    pub fn new(
        name: impl Into<String>,
        value: Option<Value>,
        declared_type: DeclaredType,
        optional: bool,
        options: Option<Map<String, Value>>,
    ) -> ConfigResult<Self> {
        Self::with_config(
            name,
            value,
            declared_type,
            optional,
            options,
            CheckConfig::default(),
        )
    }

    /// Creates a field with an explicit configuration.
    pub fn with_config(
        name: impl Into<String>,
        value: Option<Value>,
        declared_type: DeclaredType,
        optional: bool,
        options: Option<Map<String, Value>>,
        config: CheckConfig,
    ) -> ConfigResult<Self> {
        let options = FieldOptions::parse(declared_type, options.unwrap_or_default())?;

        Ok(Self {
            name: name.into(),
            value,
            declared_type,
            optional,
            options,
            config,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn declared_type(&self) -> DeclaredType {
        self.declared_type
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn options(&self) -> &FieldOptions {
        &self.options
    }

    /// Checks the value and shapes the output fragment.
    ///
    /// Never fails: data errors are collected in the result.
    pub fn check(&self) -> CheckResult {
        let raw = match &self.value {
            Some(value) if !value.is_null() => value,
            _ if self.optional => return CheckResult::default(),
            _ => {
                return CheckResult {
                    fragment: Map::new(),
                    errors: vec![ValidationError::required(&self.name)],
                }
            }
        };

        debug!(field = %self.name, declared_type = %self.declared_type, "checking field");

        let Checked { value, errors } = self.dispatch(raw);

        CheckResult {
            fragment: output::shape(&self.name, self.options.rename(), value),
            errors,
        }
    }

    fn dispatch(&self, raw: &Value) -> Checked {
        let name = self.name.as_str();
        let sep = self.config.array_separator;
        let string = StringChecker::new(self.options.string());
        let number = NumberChecker::new(self.options.number());
        let date = DateChecker::new(self.options.date_format(), self.config.default_offset);

        match self.declared_type {
            DeclaredType::String => string.check(name, raw),
            DeclaredType::StringArray => ArrayAdapter::new(string, sep).check(name, raw),
            DeclaredType::Number => number.check(name, raw),
            DeclaredType::NumberArray => ArrayAdapter::new(number, sep).check(name, raw),
            DeclaredType::Date => date.check(name, raw),
            DeclaredType::DateArray => ArrayAdapter::new(date, sep).check(name, raw),
            DeclaredType::Boolean
            | DeclaredType::File
            | DeclaredType::Json
            | DeclaredType::AllowedValue => StubChecker.check(name, raw),
            DeclaredType::BooleanArray
            | DeclaredType::FileArray
            | DeclaredType::AllowedValueArray => {
                ArrayAdapter::new(StubChecker, sep).check(name, raw)
            }
        }
    }
}

/// A reusable field description, bound to one value per validation attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field name
    pub name: String,
    /// Declared type
    #[serde(rename = "type")]
    pub declared_type: DeclaredType,
    /// Whether a missing value is accepted
    #[serde(default)]
    pub optional: bool,
    /// Type-specific options
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Map<String, Value>>,
}

impl FieldDef {
    /// Create a required field definition without options
    pub fn required(name: impl Into<String>, declared_type: DeclaredType) -> Self {
        Self {
            name: name.into(),
            declared_type,
            optional: false,
            options: None,
        }
    }

    /// Create an optional field definition without options
    pub fn optional(name: impl Into<String>, declared_type: DeclaredType) -> Self {
        Self {
            optional: true,
            ..Self::required(name, declared_type)
        }
    }

    /// Set the options
    pub fn with_options(mut self, options: Map<String, Value>) -> Self {
        self.options = Some(options);
        self
    }

    /// Binds a raw value, running the options gate.
    pub fn bind(&self, value: Option<Value>) -> ConfigResult<Field> {
        self.bind_with_config(value, CheckConfig::default())
    }

    /// Binds a raw value with an explicit configuration.
    pub fn bind_with_config(
        &self,
        value: Option<Value>,
        config: CheckConfig,
    ) -> ConfigResult<Field> {
        Field::with_config(
            self.name.clone(),
            value,
            self.declared_type,
            self.optional,
            self.options.clone(),
            config,
        )
    }
}
