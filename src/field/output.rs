//! Output shaping
//!
//! A normalized value becomes a fragment with at most one key:
//! - the renamed key when `newPropertyName` is a string
//! - no key when `newPropertyName` is null
//! - the field's own name otherwise
//!
//! Only present values are emitted; an absent value never maps to null.

use serde_json::{Map, Value};

use super::options::Rename;

/// Returns whether a normalized value counts as present.
///
/// Scalars follow truthiness: `null`, `false`, `0`, and `""` are absent.
/// Arrays are present when non-empty. Objects are always present.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

/// Builds the output fragment for a field.
pub fn shape(name: &str, rename: &Rename, value: Option<Value>) -> Map<String, Value> {
    let mut fragment = Map::new();

    let Some(value) = value.filter(is_present) else {
        return fragment;
    };

    match rename {
        Rename::Keep => {
            fragment.insert(name.to_string(), value);
        }
        Rename::To(key) => {
            fragment.insert(key.clone(), value);
        }
        Rename::Suppress => {}
    }

    fragment
}
