//! Per-field validation and normalization engine
//!
//! A `Field` binds one raw value to a declared type, an optionality flag,
//! and type-specific options. Checking it yields an output fragment and the
//! validation errors found.
//!
//! # Layers
//!
//! - Options gate: option keys checked against the type family at construction
//! - Type checkers: string, number, date (boolean, file, json, allowed values are stubs)
//! - Array adapter: element-wise checking with partial success
//! - Output shaper: renaming and omission of absent values
//!
//! Construction errors (`ConfigError`) and data errors (`ValidationError`)
//! travel on separate channels and are never mixed.

mod array;
mod checker;
mod config;
mod errors;
mod field;
mod options;
mod output;
mod types;

pub use array::ArrayAdapter;
pub use checker::{
    parse_date, Checked, Checker, DateChecker, NumberChecker, StringChecker, StubChecker,
};
pub use config::CheckConfig;
pub use errors::{ConfigError, ConfigResult, ErrorKind, ValidationError};
pub use field::{CheckResult, Field, FieldDef};
pub use options::{DateFormat, FieldOptions, NumberConstraints, Rename, StringConstraints};
pub use output::is_present;
pub use types::{DeclaredType, TypeFamily};
