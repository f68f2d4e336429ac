//! Per-field validation rule configuration.
//!
//! # Invariants
//! - Every rule is optional; `None` means "not configured".
//! - Wire keys are camelCase (`minLength`, `customError`, ...).
//! - Decoding is lenient: numeric rules accept numbers or numeric strings,
//!   and unparseable values decode as "not configured".
//! - Integral numeric rules serialize as JSON integers.

use crate::model::value::parse_number;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Sparse validation rule mapping attached to every non-layout field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRules {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "compact_number",
        deserialize_with = "lenient_number"
    )]
    pub min_length: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "compact_number",
        deserialize_with = "lenient_number"
    )]
    pub max_length: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "compact_number",
        deserialize_with = "lenient_number"
    )]
    pub min: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "compact_number",
        deserialize_with = "lenient_number"
    )]
    pub max: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_text"
    )]
    pub pattern: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_text"
    )]
    pub custom_error: Option<String>,
}

impl ValidationRules {
    /// Returns whether no rule is configured.
    pub fn is_empty(&self) -> bool {
        self.min_length.is_none()
            && self.max_length.is_none()
            && self.min.is_none()
            && self.max.is_none()
            && self.pattern.is_none()
            && self.custom_error.is_none()
    }

    /// Custom error override, ignoring a blank message.
    pub fn custom_error(&self) -> Option<&str> {
        self.custom_error
            .as_deref()
            .filter(|message| !message.is_empty())
    }
}

/// Structured partial update for [`ValidationRules`].
///
/// Outer `None` leaves a rule untouched, `Some(None)` clears it and
/// `Some(Some(v))` sets it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationPatch {
    pub min_length: Option<Option<f64>>,
    pub max_length: Option<Option<f64>>,
    pub min: Option<Option<f64>>,
    pub max: Option<Option<f64>>,
    pub pattern: Option<Option<String>>,
    pub custom_error: Option<Option<String>>,
}

impl ValidationPatch {
    /// Shallow-merges this patch into `rules`.
    pub fn apply_to(self, rules: &mut ValidationRules) {
        if let Some(value) = self.min_length {
            rules.min_length = value;
        }
        if let Some(value) = self.max_length {
            rules.max_length = value;
        }
        if let Some(value) = self.min {
            rules.min = value;
        }
        if let Some(value) = self.max {
            rules.max = value;
        }
        if let Some(value) = self.pattern {
            rules.pattern = value;
        }
        if let Some(value) = self.custom_error {
            rules.custom_error = value;
        }
    }
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) if !text.trim().is_empty() => {
            Some(parse_number(&text)).filter(|n| !n.is_nan())
        }
        _ => None,
    })
}

fn compact_number<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(number) if number.fract() == 0.0 && number.abs() < 9_007_199_254_740_992.0 => {
            serializer.serialize_i64(*number as i64)
        }
        Some(number) => serializer.serialize_f64(*number),
        None => serializer.serialize_none(),
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        Some(Value::Bool(flag)) => Some(flag.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::{ValidationPatch, ValidationRules};

    #[test]
    fn decodes_numeric_strings_and_ignores_garbage() {
        let rules: ValidationRules = serde_json::from_value(serde_json::json!({
            "minLength": "3",
            "maxLength": 10,
            "min": "abc",
            "max": 99.5,
            "pattern": "^a+$"
        }))
        .expect("rules should decode");

        assert_eq!(rules.min_length, Some(3.0));
        assert_eq!(rules.max_length, Some(10.0));
        assert_eq!(rules.min, None);
        assert_eq!(rules.max, Some(99.5));
        assert_eq!(rules.pattern.as_deref(), Some("^a+$"));
    }

    #[test]
    fn patch_sets_and_clears_rules() {
        let mut rules = ValidationRules {
            min_length: Some(2.0),
            custom_error: Some("nope".to_string()),
            ..ValidationRules::default()
        };

        ValidationPatch {
            min_length: Some(None),
            max: Some(Some(5.0)),
            ..ValidationPatch::default()
        }
        .apply_to(&mut rules);

        assert_eq!(rules.min_length, None);
        assert_eq!(rules.max, Some(5.0));
        assert_eq!(rules.custom_error(), Some("nope"));
    }

    #[test]
    fn fractional_lengths_survive_and_integers_stay_integral() {
        let rules: ValidationRules =
            serde_json::from_value(serde_json::json!({ "minLength": 2.5, "max": "40" }))
                .expect("rules should decode");
        assert_eq!(rules.min_length, Some(2.5));

        let encoded = serde_json::to_value(&rules).expect("rules should encode");
        assert_eq!(encoded, serde_json::json!({ "minLength": 2.5, "max": 40 }));
    }

    #[test]
    fn blank_custom_error_is_ignored() {
        let rules = ValidationRules {
            custom_error: Some(String::new()),
            ..ValidationRules::default()
        };
        assert_eq!(rules.custom_error(), None);
        assert!(!rules.is_empty());
    }
}
