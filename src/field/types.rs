//! Declared type definitions
//!
//! Supported declared types:
//! - string / stringArray: UTF-8 text with length and case constraints
//! - number / numberArray: numeric values with range constraints
//! - date / dateArray: parseable dates with optional reformatting
//! - boolean, file, json, allowedValue (and array variants): recognized, not checked

use serde::{Deserialize, Serialize};
use std::fmt;

/// The logical kind assigned to a field.
///
/// Legacy tags (`num`, `stringArr`, `JSON`, ...) are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeclaredType {
    String,
    #[serde(alias = "stringArr")]
    StringArray,
    #[serde(alias = "num")]
    Number,
    #[serde(alias = "numArr")]
    NumberArray,
    #[serde(alias = "bool")]
    Boolean,
    #[serde(alias = "boolArr")]
    BooleanArray,
    File,
    #[serde(alias = "fileArr")]
    FileArray,
    Date,
    #[serde(alias = "dateArr")]
    DateArray,
    #[serde(alias = "JSON")]
    Json,
    #[serde(alias = "allowedValues")]
    AllowedValue,
    #[serde(alias = "allowedValuesArr")]
    AllowedValueArray,
}

impl DeclaredType {
    /// Returns the type family used for option legality
    pub fn family(&self) -> TypeFamily {
        match self {
            DeclaredType::String | DeclaredType::StringArray => TypeFamily::String,
            DeclaredType::Number | DeclaredType::NumberArray => TypeFamily::Number,
            DeclaredType::Boolean | DeclaredType::BooleanArray => TypeFamily::Boolean,
            DeclaredType::File | DeclaredType::FileArray => TypeFamily::File,
            DeclaredType::Date | DeclaredType::DateArray => TypeFamily::Date,
            DeclaredType::Json => TypeFamily::Json,
            DeclaredType::AllowedValue | DeclaredType::AllowedValueArray => {
                TypeFamily::AllowedValue
            }
        }
    }

    /// Returns true for the `*Array` variants
    pub fn is_array(&self) -> bool {
        self.element_type().is_some()
    }

    /// Returns the scalar type checked per element, for array variants only
    pub fn element_type(&self) -> Option<DeclaredType> {
        match self {
            DeclaredType::StringArray => Some(DeclaredType::String),
            DeclaredType::NumberArray => Some(DeclaredType::Number),
            DeclaredType::BooleanArray => Some(DeclaredType::Boolean),
            DeclaredType::FileArray => Some(DeclaredType::File),
            DeclaredType::DateArray => Some(DeclaredType::Date),
            DeclaredType::AllowedValueArray => Some(DeclaredType::AllowedValue),
            DeclaredType::String
            | DeclaredType::Number
            | DeclaredType::Boolean
            | DeclaredType::File
            | DeclaredType::Date
            | DeclaredType::Json
            | DeclaredType::AllowedValue => None,
        }
    }

    /// Returns the canonical tag
    pub fn type_name(&self) -> &'static str {
        match self {
            DeclaredType::String => "string",
            DeclaredType::StringArray => "stringArray",
            DeclaredType::Number => "number",
            DeclaredType::NumberArray => "numberArray",
            DeclaredType::Boolean => "boolean",
            DeclaredType::BooleanArray => "booleanArray",
            DeclaredType::File => "file",
            DeclaredType::FileArray => "fileArray",
            DeclaredType::Date => "date",
            DeclaredType::DateArray => "dateArray",
            DeclaredType::Json => "json",
            DeclaredType::AllowedValue => "allowedValue",
            DeclaredType::AllowedValueArray => "allowedValueArray",
        }
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Scalar and array variants of a declared type share one family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeFamily {
    String,
    Number,
    Boolean,
    File,
    Date,
    Json,
    AllowedValue,
}

const STRING_OPTIONS: &[&str] = &[
    "newPropertyName",
    "minLength",
    "maxLength",
    "hasUpperCase",
    "hasLowerCase",
];
const NUMBER_OPTIONS: &[&str] = &["newPropertyName", "min", "max", "round"];
const BOOLEAN_OPTIONS: &[&str] = &["newPropertyName", "convertToNumber"];
const FILE_OPTIONS: &[&str] = &[
    "newPropertyName",
    "allowedExtensions",
    "minimumSize",
    "maximumSize",
];
const DATE_OPTIONS: &[&str] = &["newPropertyName", "convertToDateFormat"];
const JSON_OPTIONS: &[&str] = &["newPropertyName", "allowedProps"];

impl TypeFamily {
    /// Returns the legal option keys, or `None` when the family has no options check
    pub fn allowed_options(&self) -> Option<&'static [&'static str]> {
        match self {
            TypeFamily::String => Some(STRING_OPTIONS),
            TypeFamily::Number => Some(NUMBER_OPTIONS),
            TypeFamily::Boolean => Some(BOOLEAN_OPTIONS),
            TypeFamily::File => Some(FILE_OPTIONS),
            TypeFamily::Date => Some(DATE_OPTIONS),
            TypeFamily::Json => Some(JSON_OPTIONS),
            TypeFamily::AllowedValue => None,
        }
    }

    /// Returns the family name for diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            TypeFamily::String => "string",
            TypeFamily::Number => "number",
            TypeFamily::Boolean => "bool",
            TypeFamily::File => "file",
            TypeFamily::Date => "date",
            TypeFamily::Json => "JSON",
            TypeFamily::AllowedValue => "allowed value",
        }
    }
}

impl fmt::Display for TypeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
