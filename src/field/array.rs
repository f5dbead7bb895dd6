//! Element-wise checking for `*Array` declared types
//!
//! Partial-success semantics:
//! - errors from every element are concatenated in element order
//! - elements with a normalized value are kept, in order
//! - failing elements are dropped from the output but still reported

use serde_json::Value;
use std::borrow::Cow;

use super::checker::{Checked, Checker};

/// Wraps a scalar checker and applies it to every element.
#[derive(Debug, Clone, Copy)]
pub struct ArrayAdapter<C> {
    inner: C,
    separator: char,
}

impl<C: Checker> ArrayAdapter<C> {
    pub fn new(inner: C, separator: char) -> Self {
        Self { inner, separator }
    }

    /// Returns the element sequence of a raw value.
    ///
    /// Arrays are used as-is, strings are split on the separator, and any
    /// other value is a single element.
    pub fn elements<'v>(&self, raw: &'v Value) -> Cow<'v, [Value]> {
        match raw {
            Value::Array(items) => Cow::Borrowed(items.as_slice()),
            Value::String(s) => Cow::Owned(
                s.split(self.separator)
                    .map(|part| Value::String(part.to_string()))
                    .collect(),
            ),
            other => Cow::Owned(vec![other.clone()]),
        }
    }
}

impl<C: Checker> Checker for ArrayAdapter<C> {
    fn check(&self, field: &str, raw: &Value) -> Checked {
        let elements = self.elements(raw);
        let mut kept = Vec::with_capacity(elements.len());
        let mut errors = Vec::new();

        for element in elements.iter() {
            let checked = self.inner.check(field, element);
            if let Some(value) = checked.value {
                kept.push(value);
            }
            errors.extend(checked.errors);
        }

        Checked {
            value: Some(Value::Array(kept)),
            errors,
        }
    }
}
