use formcraft_core::registry::field_types::{create, create_named, describe_named, palette};
use formcraft_core::registry::validation_rules::{all_rules, applicable_rules};
use formcraft_core::{FieldCategory, FieldKind, RuleKey, SessionIdSource};
use std::collections::HashSet;

#[test]
fn palette_lists_categories_in_display_order() {
    let palette = palette();
    let categories: Vec<FieldCategory> = palette.iter().map(|(category, _)| *category).collect();
    assert_eq!(
        categories,
        vec![FieldCategory::Inputs, FieldCategory::Choice, FieldCategory::Layout]
    );

    let labels: Vec<&str> = palette.iter().map(|(category, _)| category.label()).collect();
    assert_eq!(labels, vec!["Input Fields", "Choice Fields", "Layout"]);

    let total: usize = palette.iter().map(|(_, kinds)| kinds.len()).sum();
    assert_eq!(total, FieldKind::ALL.len());
}

#[test]
fn created_fields_carry_defaults_and_distinct_ids() {
    let mut ids = SessionIdSource::new();
    let mut seen = HashSet::new();
    for kind in FieldKind::ALL {
        let field = create(kind, &mut ids);
        assert_eq!(field.kind(), kind);
        assert!(seen.insert(field.id().to_string()), "id reused for {kind}");
        assert_eq!(field.label().is_none(), kind.is_layout());
        assert!(!field.is_required());
    }
}

#[test]
fn create_named_ignores_unknown_kinds() {
    let mut ids = SessionIdSource::new();
    assert!(create_named("signature", &mut ids).is_none());
    assert!(describe_named("signature").is_none());

    let field = create_named("textarea", &mut ids).unwrap();
    assert_eq!(field.placeholder(), Some("Enter your message..."));
}

#[test]
fn choice_defaults_use_numbered_options() {
    let mut ids = SessionIdSource::new();
    let radio = create(FieldKind::Radio, &mut ids);
    let options = radio.options().unwrap();
    assert_eq!(options.len(), 2);
    assert_eq!(options[0].label, "Option 1");
    assert_eq!(options[1].value, "option_2");
}

#[test]
fn every_kind_gets_required_and_custom_error() {
    for kind in FieldKind::ALL {
        let keys: Vec<RuleKey> = applicable_rules(kind).into_iter().map(|rule| rule.key).collect();
        assert_eq!(keys.first(), Some(&RuleKey::Required));
        assert_eq!(keys.last(), Some(&RuleKey::CustomError));
    }
}

#[test]
fn rule_catalog_is_in_display_order() {
    let keys: Vec<&str> = all_rules().iter().map(|rule| rule.key.as_str()).collect();
    assert_eq!(
        keys,
        vec!["required", "minLength", "maxLength", "min", "max", "pattern", "customError"]
    );
}

#[test]
fn url_gets_max_length_and_pattern_only() {
    let keys: Vec<RuleKey> = applicable_rules(FieldKind::Url)
        .into_iter()
        .map(|rule| rule.key)
        .collect();
    assert_eq!(
        keys,
        vec![
            RuleKey::Required,
            RuleKey::MaxLength,
            RuleKey::Pattern,
            RuleKey::CustomError
        ]
    );
}
