//! Runtime values entered into a rendered form.
//!
//! # Responsibility
//! - Represent what a respondent typed, picked or toggled for one field.
//! - Provide the string/number/emptiness coercions shared by the
//!   validation and visibility evaluators.
//!
//! # Invariants
//! - Coercions are total: every value has a string form and a numeric
//!   form (possibly `NaN`).
//! - An absent value is modelled as `None` at call sites, never as a
//!   sentinel variant.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Current value of one form control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Toggle state.
    Bool(bool),
    /// Numeric input.
    Number(f64),
    /// Free text, a picked option value, a date string or a file name.
    Text(String),
    /// Checked option values of a checkbox group.
    List(Vec<String>),
}

impl FieldValue {
    /// Convenience constructor for text values.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// String form used for length checks, pattern matching and string
    /// comparisons.
    pub fn to_text(&self) -> String {
        match self {
            Self::Bool(value) => value.to_string(),
            Self::Number(value) => format_number(*value),
            Self::Text(value) => value.clone(),
            Self::List(values) => values.join(","),
        }
    }

    /// Numeric form used by `min`/`max` rules and numeric conditions.
    ///
    /// Non-numeric text yields `NaN`.
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Bool(true) => 1.0,
            Self::Bool(false) => 0.0,
            Self::Number(value) => *value,
            Self::Text(value) => parse_number(value),
            Self::List(values) => match values.as_slice() {
                [] => 0.0,
                [single] => parse_number(single),
                _ => f64::NAN,
            },
        }
    }

    /// Returns whether the value carries no answer.
    ///
    /// Empty text, `false`, `0`, `NaN` and an empty checkbox selection are
    /// all treated as empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Bool(value) => !value,
            Self::Number(value) => *value == 0.0 || value.is_nan(),
            Self::Text(value) => value.is_empty(),
            Self::List(values) => values.is_empty(),
        }
    }

    /// Returns whether this is the number zero, which counts as an answer
    /// even though it is empty.
    pub fn is_zero(&self) -> bool {
        matches!(self, Self::Number(value) if *value == 0.0)
    }

    /// JSON form used in submission payloads; non-finite numbers become
    /// `null`.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Bool(value) => Value::Bool(*value),
            Self::Number(value) => Number::from_f64(*value).map_or(Value::Null, Value::Number),
            Self::Text(value) => Value::String(value.clone()),
            Self::List(values) => Value::Array(values.iter().cloned().map(Value::String).collect()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// String form of an optional value; absent values become `""`.
pub fn text_or_empty(value: Option<&FieldValue>) -> String {
    value.map(FieldValue::to_text).unwrap_or_default()
}

/// Numeric form of an optional value; absent values are `NaN`.
pub fn number_or_nan(value: Option<&FieldValue>) -> f64 {
    value.map(FieldValue::to_number).unwrap_or(f64::NAN)
}

/// Parses numeric text the way browser form scripts coerce it.
///
/// Surrounding whitespace is ignored, blank text is `0`, `0x`/`0o`/`0b`
/// prefixes are honored and anything else that is not a plain decimal
/// literal is `NaN`.
pub fn parse_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = trimmed.strip_prefix(prefix) {
            return match u64::from_str_radix(digits, radix) {
                Ok(value) if !digits.is_empty() => value as f64,
                _ => f64::NAN,
            };
        }
    }

    let (sign, unsigned) = match trimmed.as_bytes()[0] {
        b'-' => (-1.0, &trimmed[1..]),
        b'+' => (1.0, &trimmed[1..]),
        _ => (1.0, trimmed),
    };
    if unsigned == "Infinity" {
        return sign * f64::INFINITY;
    }
    if !is_decimal_literal(unsigned) {
        return f64::NAN;
    }
    unsigned
        .parse::<f64>()
        .map(|value| sign * value)
        .unwrap_or(f64::NAN)
}

fn is_decimal_literal(value: &str) -> bool {
    let (mantissa, exponent) = match value.find(['e', 'E']) {
        Some(pos) => (&value[..pos], Some(&value[pos + 1..])),
        None => (value, None),
    };

    let mut digits = 0;
    let mut dots = 0;
    for c in mantissa.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return false,
        }
    }
    if digits == 0 || dots > 1 {
        return false;
    }

    match exponent {
        None => true,
        Some(exp) => {
            let exp = exp.strip_prefix(['+', '-']).unwrap_or(exp);
            !exp.is_empty() && exp.chars().all(|c| c.is_ascii_digit())
        }
    }
}

/// Formats a number without a trailing `.0` for integral values.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::{format_number, parse_number, FieldValue};

    #[test]
    fn parse_number_follows_browser_coercion() {
        assert_eq!(parse_number(""), 0.0);
        assert_eq!(parse_number("  42 "), 42.0);
        assert_eq!(parse_number("-3.5"), -3.5);
        assert_eq!(parse_number(".5"), 0.5);
        assert_eq!(parse_number("1e3"), 1000.0);
        assert_eq!(parse_number("0x1F"), 31.0);
        assert_eq!(parse_number("-Infinity"), f64::NEG_INFINITY);
        assert!(parse_number("abc").is_nan());
        assert!(parse_number("12px").is_nan());
        assert!(parse_number("inf").is_nan());
        assert!(parse_number("NaN").is_nan());
        assert!(parse_number("1.2.3").is_nan());
    }

    #[test]
    fn format_number_drops_integral_fraction() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(-0.25), "-0.25");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    #[test]
    fn emptiness_treats_zero_as_empty_but_flags_it() {
        let zero = FieldValue::Number(0.0);
        assert!(zero.is_empty());
        assert!(zero.is_zero());
        assert!(FieldValue::text("").is_empty());
        assert!(FieldValue::List(vec![]).is_empty());
        assert!(!FieldValue::Bool(true).is_empty());
    }

    #[test]
    fn list_values_join_with_commas() {
        let value = FieldValue::List(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(value.to_text(), "a,b");
        assert!(value.to_number().is_nan());
    }
}
