//! Check configuration
//!
//! Carries the ambient context a check needs beyond the field itself:
//! - the UTC offset used for date strings that carry none
//! - the separator used to split string input for array types

use chrono::{FixedOffset, Offset, Utc};

/// Configuration shared by every field checked with it.
///
/// Read-only once built; the default is UTC with a comma separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckConfig {
    /// Offset applied to date-only and offset-less date strings.
    pub default_offset: FixedOffset,
    /// Separator for string input to array types.
    pub array_separator: char,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            default_offset: Utc.fix(),
            array_separator: ',',
        }
    }
}

impl CheckConfig {
    /// Create config with the given default offset.
    pub fn with_offset(default_offset: FixedOffset) -> Self {
        Self {
            default_offset,
            ..Self::default()
        }
    }

    /// Create config with the given array separator.
    pub fn with_separator(array_separator: char) -> Self {
        Self {
            array_separator,
            ..Self::default()
        }
    }
}
