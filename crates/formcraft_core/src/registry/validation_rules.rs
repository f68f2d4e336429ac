//! Static catalog of validation rules.
//!
//! # Invariants
//! - Catalog order is the editor display order.
//! - `required` and `customError` apply to every kind.

use crate::model::field::FieldKind;

/// Rule identifier; matches the wire key inside `validation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKey {
    Required,
    MinLength,
    MaxLength,
    Min,
    Max,
    Pattern,
    CustomError,
}

impl RuleKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::MinLength => "minLength",
            Self::MaxLength => "maxLength",
            Self::Min => "min",
            Self::Max => "max",
            Self::Pattern => "pattern",
            Self::CustomError => "customError",
        }
    }
}

/// Editor input used to configure a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleInput {
    None,
    Numeric,
    Text,
}

/// Which kinds a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleScope {
    All,
    Kinds(&'static [FieldKind]),
}

impl RuleScope {
    pub fn includes(self, kind: FieldKind) -> bool {
        match self {
            Self::All => true,
            Self::Kinds(kinds) => kinds.contains(&kind),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleDescriptor {
    pub key: RuleKey,
    pub label: &'static str,
    pub description: &'static str,
    pub input: RuleInput,
    pub placeholder: Option<&'static str>,
    pub scope: RuleScope,
}

const RULES: [RuleDescriptor; 7] = [
    RuleDescriptor {
        key: RuleKey::Required,
        label: "Required",
        description: "Field must be filled in",
        input: RuleInput::None,
        placeholder: None,
        scope: RuleScope::All,
    },
    RuleDescriptor {
        key: RuleKey::MinLength,
        label: "Min Length",
        description: "Minimum character count",
        input: RuleInput::Numeric,
        placeholder: Some("3"),
        scope: RuleScope::Kinds(&[FieldKind::Text, FieldKind::Textarea, FieldKind::Password]),
    },
    RuleDescriptor {
        key: RuleKey::MaxLength,
        label: "Max Length",
        description: "Maximum character count",
        input: RuleInput::Numeric,
        placeholder: Some("100"),
        scope: RuleScope::Kinds(&[
            FieldKind::Text,
            FieldKind::Textarea,
            FieldKind::Password,
            FieldKind::Url,
            FieldKind::Phone,
        ]),
    },
    RuleDescriptor {
        key: RuleKey::Min,
        label: "Min Value",
        description: "Minimum numeric value",
        input: RuleInput::Numeric,
        placeholder: Some("0"),
        scope: RuleScope::Kinds(&[FieldKind::Number]),
    },
    RuleDescriptor {
        key: RuleKey::Max,
        label: "Max Value",
        description: "Maximum numeric value",
        input: RuleInput::Numeric,
        placeholder: Some("100"),
        scope: RuleScope::Kinds(&[FieldKind::Number]),
    },
    RuleDescriptor {
        key: RuleKey::Pattern,
        label: "Pattern (Regex)",
        description: "Must match regex pattern",
        input: RuleInput::Text,
        placeholder: Some("^[a-zA-Z]+$"),
        scope: RuleScope::Kinds(&[
            FieldKind::Text,
            FieldKind::Email,
            FieldKind::Phone,
            FieldKind::Url,
        ]),
    },
    RuleDescriptor {
        key: RuleKey::CustomError,
        label: "Custom Error Message",
        description: "Override default error message",
        input: RuleInput::Text,
        placeholder: Some("Please enter a valid value"),
        scope: RuleScope::All,
    },
];

/// Every rule in catalog order.
pub fn all_rules() -> &'static [RuleDescriptor] {
    &RULES
}

/// Rules applicable to `kind`, in catalog order.
pub fn applicable_rules(kind: FieldKind) -> Vec<RuleDescriptor> {
    RULES
        .iter()
        .copied()
        .filter(|rule| rule.scope.includes(kind))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{applicable_rules, RuleKey};
    use crate::model::field::FieldKind;

    fn keys(kind: FieldKind) -> Vec<RuleKey> {
        applicable_rules(kind).into_iter().map(|rule| rule.key).collect()
    }

    #[test]
    fn number_gets_range_rules_only() {
        assert_eq!(
            keys(FieldKind::Number),
            vec![RuleKey::Required, RuleKey::Min, RuleKey::Max, RuleKey::CustomError]
        );
    }

    #[test]
    fn email_gets_pattern_but_no_length_rules() {
        assert_eq!(
            keys(FieldKind::Email),
            vec![RuleKey::Required, RuleKey::Pattern, RuleKey::CustomError]
        );
    }

    #[test]
    fn text_gets_length_and_pattern_rules() {
        assert_eq!(
            keys(FieldKind::Text),
            vec![
                RuleKey::Required,
                RuleKey::MinLength,
                RuleKey::MaxLength,
                RuleKey::Pattern,
                RuleKey::CustomError,
            ]
        );
    }
}
