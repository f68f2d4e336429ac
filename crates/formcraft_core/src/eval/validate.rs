//! Per-field validation.
//!
//! # Responsibility
//! - Check one runtime value against a field's requirement flag, its
//!   configured rules and the kind-specific built-in formats.
//!
//! # Invariants
//! - Rules run in a fixed order and the first failure wins.
//! - Validation is pure: the same field and value always produce the same
//!   outcome.
//! - A pattern that is not a valid regular expression never fails a value.
//!   Patterns may use lookaround and backreferences.
//! - Lengths count UTF-16 code units, as browsers do for `maxlength`.

use crate::model::field::{Field, FieldKind};
use crate::model::rules::ValidationRules;
use crate::model::value::{format_number, FieldValue};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Validates `value` for `field`; `None` means the value is acceptable.
///
/// Layout blocks collect no value and always pass.
pub fn validate(field: &Field, value: Option<&FieldValue>) -> Option<String> {
    let control = field.control()?;
    let rules = &control.validation;

    if control.required && is_missing(value) {
        return Some(
            rules
                .custom_error()
                .map(str::to_string)
                .unwrap_or_else(|| format!("{} is required", control.label)),
        );
    }

    let value = match value {
        Some(value) if !value.is_empty() || value.is_zero() => value,
        _ => return None,
    };

    check_rules(field.kind(), rules, value).map(|default_message| {
        rules
            .custom_error()
            .map(str::to_string)
            .unwrap_or(default_message)
    })
}

/// Returns the default message of the first failing rule.
fn check_rules(kind: FieldKind, rules: &ValidationRules, value: &FieldValue) -> Option<String> {
    let text = value.to_text();
    let length = text.encode_utf16().count() as f64;

    if let Some(min_length) = rules.min_length.filter(|limit| *limit != 0.0) {
        if length < min_length {
            return Some(format!(
                "Must be at least {} characters",
                format_number(min_length)
            ));
        }
    }
    if let Some(max_length) = rules.max_length.filter(|limit| *limit != 0.0) {
        if length > max_length {
            return Some(format!(
                "Must be no more than {} characters",
                format_number(max_length)
            ));
        }
    }

    if let Some(min) = rules.min {
        let number = value.to_number();
        if number.is_nan() || number < min {
            return Some(format!("Must be at least {}", format_number(min)));
        }
    }
    if let Some(max) = rules.max {
        let number = value.to_number();
        if number.is_nan() || number > max {
            return Some(format!("Must be no more than {}", format_number(max)));
        }
    }

    if let Some(pattern) = rules.pattern.as_deref().filter(|p| !p.is_empty()) {
        if !pattern_matches(pattern, &text) {
            return Some("Invalid format".to_string());
        }
    }

    match kind {
        FieldKind::Email if !EMAIL_RE.is_match(&text) => {
            Some("Please enter a valid email address".to_string())
        }
        FieldKind::Url if Url::parse(&text).is_err() => {
            Some("Please enter a valid URL".to_string())
        }
        _ => None,
    }
}

/// Unparseable patterns, and matches that exceed the backtracking limit,
/// count as a match.
fn pattern_matches(pattern: &str, text: &str) -> bool {
    let regex = match fancy_regex::Regex::new(pattern) {
        Ok(regex) => regex,
        Err(_) => {
            debug!("event=pattern_skip module=validate status=invalid");
            return true;
        }
    };
    match regex.is_match(text) {
        Ok(matched) => matched,
        Err(_) => {
            debug!("event=pattern_skip module=validate status=backtrack_limit");
            true
        }
    }
}

/// Absent, blank text and an empty selection count as missing for
/// `required`; `false` and `0` are answers.
fn is_missing(value: Option<&FieldValue>) -> bool {
    match value {
        None => true,
        Some(FieldValue::Text(text)) => text.is_empty(),
        Some(FieldValue::List(values)) => values.is_empty(),
        Some(FieldValue::Bool(_) | FieldValue::Number(_)) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::validate;
    use crate::model::field::{Control, Field, FieldBody, TextInput, ToggleInput};
    use crate::model::rules::ValidationRules;
    use crate::model::value::FieldValue;

    fn number_field(rules: ValidationRules) -> Field {
        Field::new(
            "n",
            FieldBody::Number(TextInput {
                control: Control::new("Age").with_validation(rules),
                placeholder: String::new(),
            }),
        )
    }

    #[test]
    fn zero_still_runs_range_rules() {
        let field = number_field(ValidationRules {
            min: Some(1.0),
            ..ValidationRules::default()
        });
        assert_eq!(
            validate(&field, Some(&FieldValue::Number(0.0))).as_deref(),
            Some("Must be at least 1")
        );
    }

    #[test]
    fn non_numeric_text_violates_range_rules() {
        let field = number_field(ValidationRules {
            max: Some(10.0),
            ..ValidationRules::default()
        });
        assert!(validate(&field, Some(&FieldValue::text("ten"))).is_some());
        assert!(validate(&field, Some(&FieldValue::text("7"))).is_none());
    }

    #[test]
    fn invalid_pattern_is_ignored() {
        let field = Field::new(
            "t",
            FieldBody::Text(TextInput {
                control: Control::new("Code").with_validation(ValidationRules {
                    pattern: Some("([a-z".to_string()),
                    ..ValidationRules::default()
                }),
                placeholder: String::new(),
            }),
        );
        assert_eq!(validate(&field, Some(&FieldValue::text("abc"))), None);
    }

    #[test]
    fn lookahead_pattern_is_enforced() {
        let field = Field::new(
            "t",
            FieldBody::Text(TextInput {
                control: Control::new("Password").with_validation(ValidationRules {
                    pattern: Some(r"^(?=.*\d).+$".to_string()),
                    ..ValidationRules::default()
                }),
                placeholder: String::new(),
            }),
        );
        assert_eq!(
            validate(&field, Some(&FieldValue::text("abc"))).as_deref(),
            Some("Invalid format")
        );
        assert_eq!(validate(&field, Some(&FieldValue::text("abc1"))), None);
    }

    #[test]
    fn custom_error_replaces_every_default_message() {
        let field = Field::new(
            "t",
            FieldBody::Text(TextInput {
                control: Control::new("Code")
                    .with_required(true)
                    .with_validation(ValidationRules {
                        max_length: Some(2.0),
                        custom_error: Some("Bad code".to_string()),
                        ..ValidationRules::default()
                    }),
                placeholder: String::new(),
            }),
        );
        assert_eq!(validate(&field, None).as_deref(), Some("Bad code"));
        assert_eq!(
            validate(&field, Some(&FieldValue::text("abcd"))).as_deref(),
            Some("Bad code")
        );
    }

    #[test]
    fn required_toggle_accepts_false() {
        let field = Field::new(
            "toggle",
            FieldBody::Toggle(ToggleInput {
                control: Control::new("Subscribe").with_required(true),
                default_value: false,
            }),
        );
        assert_eq!(validate(&field, Some(&FieldValue::Bool(false))), None);
        assert!(validate(&field, None).is_some());
    }

    #[test]
    fn layout_blocks_always_pass() {
        assert_eq!(validate(&Field::new("d", FieldBody::Divider), None), None);
    }
}
