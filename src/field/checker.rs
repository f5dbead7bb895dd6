//! Scalar type checkers
//!
//! Each checker is a pure function of a raw value and its options. It never
//! fails; bad input is reported as `ValidationError`s next to the normalized
//! value (or its absence).
//!
//! Suppression differs by type:
//! - string: any constraint violation discards the value
//! - number: out-of-range values are reported and still returned
//! - date: no constraints, only parseability

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use serde_json::{Number, Value};
use tracing::{debug, trace};

use super::errors::{ErrorKind, ValidationError};
use super::options::{DateFormat, NumberConstraints, StringConstraints};

/// Outcome of checking one value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Checked {
    /// Normalized value, `None` when absent
    pub value: Option<Value>,
    /// Errors in emission order
    pub errors: Vec<ValidationError>,
}

impl Checked {
    /// No value, no errors
    pub fn absent() -> Self {
        Self::default()
    }

    fn valid(value: Value) -> Self {
        Self {
            value: Some(value),
            errors: Vec::new(),
        }
    }

    fn rejected(field: &str, kind: ErrorKind, raw: &Value) -> Self {
        let mut errors = Vec::with_capacity(1);
        push_error(&mut errors, field, kind, raw);
        Self {
            value: None,
            errors,
        }
    }
}

/// A per-value checker for one declared type.
pub trait Checker {
    /// Checks `raw` on behalf of the field called `field`.
    fn check(&self, field: &str, raw: &Value) -> Checked;
}

fn push_error(errors: &mut Vec<ValidationError>, field: &str, kind: ErrorKind, raw: &Value) {
    trace!(field, error = kind.code(), "validation error");
    errors.push(ValidationError::new(field, kind, raw));
}

// =============================================================================
// String
// =============================================================================

/// Length and case constraints on text.
#[derive(Debug, Clone, Copy)]
pub struct StringChecker<'a> {
    constraints: &'a StringConstraints,
}

impl<'a> StringChecker<'a> {
    pub fn new(constraints: &'a StringConstraints) -> Self {
        Self { constraints }
    }
}

impl Checker for StringChecker<'_> {
    fn check(&self, field: &str, raw: &Value) -> Checked {
        let Some(text) = raw.as_str() else {
            return Checked::rejected(field, ErrorKind::Type, raw);
        };

        let c = self.constraints;
        let length = text.chars().count();
        let mut errors = Vec::new();

        if c.min_length.is_some_and(|min| length < min) {
            push_error(&mut errors, field, ErrorKind::StringTooShort, raw);
        }

        if c.max_length.is_some_and(|max| length > max) {
            push_error(&mut errors, field, ErrorKind::StringTooLong, raw);
        }

        if let Some(wanted) = c.has_upper_case {
            if wanted != text.chars().any(char::is_uppercase) {
                let kind = if wanted {
                    ErrorKind::StringDontHaveUpperCase
                } else {
                    ErrorKind::StringHasUpperCase
                };
                push_error(&mut errors, field, kind, raw);
            }
        }

        if let Some(wanted) = c.has_lower_case {
            if wanted != text.chars().any(char::is_lowercase) {
                let kind = if wanted {
                    ErrorKind::StringDontHaveLowerCase
                } else {
                    ErrorKind::StringHasLowerCase
                };
                push_error(&mut errors, field, kind, raw);
            }
        }

        if errors.is_empty() {
            Checked::valid(raw.clone())
        } else {
            Checked {
                value: None,
                errors,
            }
        }
    }
}

// =============================================================================
// Number
// =============================================================================

/// Range constraints on numbers.
#[derive(Debug, Clone, Copy)]
pub struct NumberChecker<'a> {
    constraints: &'a NumberConstraints,
}

impl<'a> NumberChecker<'a> {
    pub fn new(constraints: &'a NumberConstraints) -> Self {
        Self { constraints }
    }
}

impl Checker for NumberChecker<'_> {
    fn check(&self, field: &str, raw: &Value) -> Checked {
        let Some((number, normalized)) = parse_number(raw) else {
            return Checked::rejected(field, ErrorKind::Type, raw);
        };

        let c = self.constraints;
        let mut errors = Vec::new();

        if c.min.is_some_and(|min| number < min) {
            push_error(&mut errors, field, ErrorKind::NumberTooSmall, raw);
        }

        if c.max.is_some_and(|max| number > max) {
            push_error(&mut errors, field, ErrorKind::NumberTooLarge, raw);
        }

        // Out-of-range values are still returned.
        Checked {
            value: Some(normalized),
            errors,
        }
    }
}

/// Parses a JSON number or numeric string.
///
/// Returns the value as `f64` for comparisons along with its normalized JSON
/// form. Integral values parsed from text become JSON integers.
fn parse_number(raw: &Value) -> Option<(f64, Value)> {
    match raw {
        Value::Number(n) => n.as_f64().map(|f| (f, raw.clone())),
        Value::String(s) => {
            let f: f64 = s.trim().parse().ok()?;
            if !f.is_finite() {
                return None;
            }
            Some((f, number_value(f)?))
        }
        _ => None,
    }
}

fn number_value(f: f64) -> Option<Value> {
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(Value::from(f as i64))
    } else {
        Number::from_f64(f).map(Value::Number)
    }
}

// =============================================================================
// Date
// =============================================================================

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const NAIVE_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

// ISO date-times with a colon-less offset (+0100)
const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Date parsing with optional conversion.
#[derive(Debug, Clone, Copy)]
pub struct DateChecker {
    format: Option<DateFormat>,
    offset: FixedOffset,
}

impl DateChecker {
    /// `offset` applies to inputs without one and to formatted output.
    pub fn new(format: Option<DateFormat>, offset: FixedOffset) -> Self {
        Self { format, offset }
    }
}

impl Checker for DateChecker {
    fn check(&self, field: &str, raw: &Value) -> Checked {
        let Some(parsed) = raw.as_str().and_then(|s| parse_date(s, self.offset)) else {
            return Checked::rejected(field, ErrorKind::Type, raw);
        };

        let normalized = match self.format {
            None => raw.clone(),
            Some(DateFormat::Milliseconds) => Value::from(parsed.timestamp_millis()),
            Some(format) => match format.pattern() {
                Some(pattern) => Value::String(
                    parsed.with_timezone(&self.offset).format(pattern).to_string(),
                ),
                None => raw.clone(),
            },
        };

        Checked::valid(normalized)
    }
}

/// Parses the date shapes accepted on input.
///
/// Inputs without an offset are read in `offset`. Date-only inputs are
/// midnight; partial dates (`YYYY-MM`, `YYYY`) start on the first day.
pub fn parse_date(input: &str, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt);
    }

    if let Some(dt) = OFFSET_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(input, fmt).ok())
    {
        return Some(dt);
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
        return Some(dt);
    }

    let naive = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .or_else(|| {
            NAIVE_DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
                .or_else(|| parse_partial_date(input))
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;

    offset.from_local_datetime(&naive).single()
}

/// `YYYY-MM` and `YYYY`, which chrono will not parse without a day.
fn parse_partial_date(input: &str) -> Option<NaiveDate> {
    let (year, month) = match input.split_once('-') {
        Some((year, month)) if month.len() == 2 && month.bytes().all(|b| b.is_ascii_digit()) => {
            (year, month.parse().ok()?)
        }
        Some(_) => return None,
        None => (input, 1),
    };

    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    NaiveDate::from_ymd_opt(year.parse().ok()?, month, 1)
}

// =============================================================================
// Unchecked types
// =============================================================================

/// Placeholder for declared types without checking logic
/// (boolean, file, json, allowed values).
///
/// Always yields no value and no errors. Real semantics need a product
/// decision before they are added here.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubChecker;

impl Checker for StubChecker {
    fn check(&self, field: &str, _raw: &Value) -> Checked {
        debug!(field, "no checker for declared type, value dropped");
        Checked::absent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Offset, Utc};
    use serde_json::json;

    fn utc() -> FixedOffset {
        Utc.fix()
    }

    fn kinds(checked: &Checked) -> Vec<ErrorKind> {
        checked.errors.iter().map(|e| e.error).collect()
    }

    #[test]
    fn test_string_type_error_stops_early() {
        let constraints = StringConstraints {
            min_length: Some(10),
            ..Default::default()
        };
        let checked = StringChecker::new(&constraints).check("name", &json!(42));
        assert_eq!(kinds(&checked), vec![ErrorKind::Type]);
        assert_eq!(checked.errors[0].value, json!(42));
        assert!(checked.value.is_none());
    }

    #[test]
    fn test_string_errors_accumulate() {
        let constraints = StringConstraints {
            min_length: Some(5),
            has_upper_case: Some(true),
            has_lower_case: Some(false),
            ..Default::default()
        };
        let checked = StringChecker::new(&constraints).check("name", &json!("abc"));
        assert_eq!(
            kinds(&checked),
            vec![
                ErrorKind::StringTooShort,
                ErrorKind::StringDontHaveUpperCase,
                ErrorKind::StringHasLowerCase,
            ]
        );
        assert!(checked.value.is_none());
    }

    #[test]
    fn test_string_too_long() {
        let constraints = StringConstraints {
            max_length: Some(3),
            ..Default::default()
        };
        let checked = StringChecker::new(&constraints).check("code", &json!("abcd"));
        assert_eq!(kinds(&checked), vec![ErrorKind::StringTooLong]);
    }

    #[test]
    fn test_string_length_counts_chars() {
        let constraints = StringConstraints {
            max_length: Some(4),
            ..Default::default()
        };
        let checked = StringChecker::new(&constraints).check("city", &json!("Köln"));
        assert!(checked.errors.is_empty());
        assert_eq!(checked.value, Some(json!("Köln")));
    }

    #[test]
    fn test_string_case_rules() {
        let constraints = StringConstraints {
            has_upper_case: Some(false),
            has_lower_case: Some(true),
            ..Default::default()
        };
        let checker = StringChecker::new(&constraints);

        assert!(checker.check("s", &json!("abc1")).errors.is_empty());
        assert_eq!(
            kinds(&checker.check("s", &json!("Abc"))),
            vec![ErrorKind::StringHasUpperCase]
        );
        assert_eq!(
            kinds(&checker.check("s", &json!("123"))),
            vec![ErrorKind::StringDontHaveLowerCase]
        );
    }

    #[test]
    fn test_digits_are_not_upper_case() {
        let constraints = StringConstraints {
            has_upper_case: Some(true),
            ..Default::default()
        };
        let checked = StringChecker::new(&constraints).check("pin", &json!("1234"));
        assert_eq!(kinds(&checked), vec![ErrorKind::StringDontHaveUpperCase]);
    }

    #[test]
    fn test_number_out_of_range_still_returned() {
        let constraints = NumberConstraints {
            min: Some(10.0),
            max: Some(20.0),
        };
        let checked = NumberChecker::new(&constraints).check("age", &json!(5));
        assert_eq!(kinds(&checked), vec![ErrorKind::NumberTooSmall]);
        assert_eq!(checked.value, Some(json!(5)));

        let checked = NumberChecker::new(&constraints).check("age", &json!(25.5));
        assert_eq!(kinds(&checked), vec![ErrorKind::NumberTooLarge]);
        assert_eq!(checked.value, Some(json!(25.5)));
    }

    #[test]
    fn test_number_zero_bound_is_enforced() {
        let constraints = NumberConstraints {
            min: Some(0.0),
            max: None,
        };
        let checked = NumberChecker::new(&constraints).check("balance", &json!(-3));
        assert_eq!(kinds(&checked), vec![ErrorKind::NumberTooSmall]);
    }

    #[test]
    fn test_number_from_text() {
        let constraints = NumberConstraints::default();
        let checker = NumberChecker::new(&constraints);

        assert_eq!(checker.check("n", &json!("12")).value, Some(json!(12)));
        assert_eq!(checker.check("n", &json!(" 3 ")).value, Some(json!(3)));
        assert_eq!(checker.check("n", &json!("2.5")).value, Some(json!(2.5)));
        assert_eq!(checker.check("n", &json!("1e3")).value, Some(json!(1000)));
    }

    #[test]
    fn test_number_beyond_i64_stays_float() {
        let constraints = NumberConstraints::default();
        let checked = NumberChecker::new(&constraints).check("n", &json!("9223372036854775808"));
        let value = checked.value.unwrap();
        assert!(value.as_i64().is_none());
        assert_eq!(value.as_f64(), Some(9_223_372_036_854_775_808.0));
    }

    #[test]
    fn test_number_type_errors() {
        let constraints = NumberConstraints::default();
        let checker = NumberChecker::new(&constraints);

        for raw in [json!("abc"), json!(""), json!("NaN"), json!("inf"), json!(true), json!([1])] {
            let checked = checker.check("n", &raw);
            assert_eq!(kinds(&checked), vec![ErrorKind::Type], "{raw} accepted");
            assert!(checked.value.is_none());
        }
    }

    #[test]
    fn test_parse_date_shapes() {
        let utc = utc();
        let expected = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();

        for input in [
            "2020-01-01",
            "2020/01/01",
            "2020-01-01T00:00:00",
            "2020-01-01 00:00:00",
            "2020-01-01T00:00:00.000Z",
            "2020-01-01T01:00:00+01:00",
            "Wed, 01 Jan 2020 00:00:00 +0000",
        ] {
            let parsed = parse_date(input, utc).unwrap_or_else(|| panic!("{input} rejected"));
            assert_eq!(parsed, expected, "{input}");
        }
    }

    #[test]
    fn test_parse_partial_dates() {
        let utc = utc();

        let month = parse_date("2020-06", utc).unwrap();
        assert_eq!(month, Utc.with_ymd_and_hms(2020, 6, 1, 0, 0, 0).unwrap());

        let year = parse_date("2020", utc).unwrap();
        assert_eq!(year, Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());

        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let shifted = parse_date("2020-06", plus_two).unwrap();
        assert_eq!(shifted, Utc.with_ymd_and_hms(2020, 5, 31, 22, 0, 0).unwrap());

        assert!(parse_date("2020-13", utc).is_none());
        assert!(parse_date("2020-6", utc).is_none());
        assert!(parse_date("2020-+1", utc).is_none());
        assert!(parse_date("20", utc).is_none());
        assert!(parse_date("abcd", utc).is_none());
    }

    #[test]
    fn test_parse_offset_without_colon() {
        let expected = Utc.with_ymd_and_hms(2020, 6, 15, 9, 0, 0).unwrap();
        for input in ["2020-06-15T10:00:00.000+0100", "2020-06-15T10:00:00+0100"] {
            let parsed = parse_date(input, utc()).unwrap_or_else(|| panic!("{input} rejected"));
            assert_eq!(parsed, expected, "{input}");
        }
    }

    #[test]
    fn test_partial_date_to_milliseconds() {
        let checker = DateChecker::new(Some(DateFormat::Milliseconds), utc());
        let checked = checker.check("born", &json!("2020-06"));
        assert!(checked.errors.is_empty());
        assert_eq!(checked.value, Some(json!(1_590_969_600_000_i64)));
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        let utc = utc();
        assert!(parse_date("", utc).is_none());
        assert!(parse_date("not a date", utc).is_none());
        assert!(parse_date("2020-13-01", utc).is_none());
        assert!(parse_date("2020-02-30", utc).is_none());
    }

    #[test]
    fn test_date_default_offset() {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let parsed = parse_date("2020-01-01", plus_two).unwrap();
        assert_eq!(parsed.timestamp_millis(), 1_577_836_800_000 - 2 * 3_600_000);
    }

    #[test]
    fn test_date_without_format_keeps_raw() {
        let checked = DateChecker::new(None, utc()).check("born", &json!("2020-01-01"));
        assert!(checked.errors.is_empty());
        assert_eq!(checked.value, Some(json!("2020-01-01")));
    }

    #[test]
    fn test_date_to_milliseconds() {
        let checker = DateChecker::new(Some(DateFormat::Milliseconds), utc());
        let checked = checker.check("born", &json!("2020-01-01"));
        assert_eq!(checked.value, Some(json!(1_577_836_800_000_i64)));
    }

    #[test]
    fn test_date_to_patterns() {
        let date = DateChecker::new(Some(DateFormat::Date), utc());
        assert_eq!(
            date.check("at", &json!("2021-06-15T13:45:10Z")).value,
            Some(json!("2021-06-15"))
        );

        let datetime = DateChecker::new(Some(DateFormat::DateTime), utc());
        assert_eq!(
            datetime.check("at", &json!("2021-06-15T15:45:10+02:00")).value,
            Some(json!("2021-06-15 13:45:10"))
        );
    }

    #[test]
    fn test_date_type_error() {
        let checker = DateChecker::new(Some(DateFormat::Milliseconds), utc());
        let checked = checker.check("born", &json!("yesterday-ish"));
        assert_eq!(kinds(&checked), vec![ErrorKind::Type]);
        assert!(checked.value.is_none());

        let checked = checker.check("born", &json!(1_577_836_800_000_i64));
        assert_eq!(kinds(&checked), vec![ErrorKind::Type]);
    }

    #[test]
    fn test_stub_ignores_input() {
        for raw in [json!(true), json!("x"), json!({ "a": 1 }), json!(null)] {
            assert_eq!(StubChecker.check("flag", &raw), Checked::absent());
        }
    }
}
