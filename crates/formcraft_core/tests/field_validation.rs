use formcraft_core::registry::field_types::default_body;
use formcraft_core::{validate, Control, Field, FieldBody, FieldKind, FieldValue, ValidationRules};

fn field(kind: FieldKind, label: &str, required: bool, rules: ValidationRules) -> Field {
    let mut field = Field::new("f1", default_body(kind));
    if let Some(control) = field.control_mut() {
        control.label = label.to_string();
        control.required = required;
        control.validation = rules;
    }
    field
}

fn text(value: &str) -> Option<FieldValue> {
    Some(FieldValue::text(value))
}

#[test]
fn required_text_with_min_length() {
    let name = field(
        FieldKind::Text,
        "Name",
        true,
        ValidationRules {
            min_length: Some(3.0),
            ..ValidationRules::default()
        },
    );

    let missing = validate(&name, text("").as_ref()).expect("empty value must fail");
    assert!(missing.contains("Name"));
    assert_eq!(
        validate(&name, text("Jo").as_ref()).as_deref(),
        Some("Must be at least 3 characters")
    );
    assert_eq!(validate(&name, text("Joe").as_ref()), None);
}

#[test]
fn email_kind_checks_address_shape() {
    let email = field(FieldKind::Email, "Email", false, ValidationRules::default());
    assert_eq!(
        validate(&email, text("not-an-email").as_ref()).as_deref(),
        Some("Please enter a valid email address")
    );
    assert_eq!(validate(&email, text("a@b.com").as_ref()), None);
}

#[test]
fn optional_empty_values_pass_every_rule() {
    let email = field(
        FieldKind::Email,
        "Email",
        false,
        ValidationRules {
            min_length: Some(5.0),
            pattern: Some("^x".to_string()),
            ..ValidationRules::default()
        },
    );
    assert_eq!(validate(&email, None), None);
    assert_eq!(validate(&email, text("").as_ref()), None);
}

#[test]
fn url_kind_requires_absolute_url() {
    let site = field(FieldKind::Url, "Site", false, ValidationRules::default());
    assert_eq!(
        validate(&site, text("example.com").as_ref()).as_deref(),
        Some("Please enter a valid URL")
    );
    assert_eq!(validate(&site, text("https://example.com/a?b=c").as_ref()), None);
}

#[test]
fn numeric_range_rules_flag_non_numbers() {
    let age = field(
        FieldKind::Number,
        "Age",
        false,
        ValidationRules {
            min: Some(18.0),
            max: Some(99.5),
            ..ValidationRules::default()
        },
    );
    assert_eq!(
        validate(&age, text("abc").as_ref()).as_deref(),
        Some("Must be at least 18")
    );
    assert_eq!(
        validate(&age, Some(&FieldValue::Number(100.0))).as_deref(),
        Some("Must be no more than 99.5")
    );
    assert_eq!(validate(&age, Some(&FieldValue::Number(42.0))), None);
    assert_eq!(validate(&age, text(" 18 ").as_ref()), None);
}

#[test]
fn rules_run_in_order_and_first_failure_wins() {
    let code = field(
        FieldKind::Text,
        "Code",
        false,
        ValidationRules {
            max_length: Some(3.0),
            pattern: Some("^[0-9]+$".to_string()),
            ..ValidationRules::default()
        },
    );
    assert_eq!(
        validate(&code, text("abcdef").as_ref()).as_deref(),
        Some("Must be no more than 3 characters")
    );
    assert_eq!(
        validate(&code, text("ab").as_ref()).as_deref(),
        Some("Invalid format")
    );
    assert_eq!(validate(&code, text("12").as_ref()), None);
}

#[test]
fn pattern_is_unanchored_unless_written_so() {
    let code = field(
        FieldKind::Text,
        "Code",
        false,
        ValidationRules {
            pattern: Some("[0-9]".to_string()),
            ..ValidationRules::default()
        },
    );
    assert_eq!(validate(&code, text("abc1").as_ref()), None);
}

#[test]
fn custom_error_overrides_built_in_format_messages() {
    let email = field(
        FieldKind::Email,
        "Email",
        false,
        ValidationRules {
            custom_error: Some("Work email please".to_string()),
            ..ValidationRules::default()
        },
    );
    assert_eq!(
        validate(&email, text("nope").as_ref()).as_deref(),
        Some("Work email please")
    );
}

#[test]
fn empty_custom_error_falls_back_to_defaults() {
    let name = field(
        FieldKind::Text,
        "Name",
        true,
        ValidationRules {
            custom_error: Some(String::new()),
            ..ValidationRules::default()
        },
    );
    assert_eq!(validate(&name, None).as_deref(), Some("Name is required"));
}

#[test]
fn whitespace_custom_error_is_used_verbatim() {
    let name = field(
        FieldKind::Text,
        "Name",
        true,
        ValidationRules {
            custom_error: Some("   ".to_string()),
            ..ValidationRules::default()
        },
    );
    assert_eq!(validate(&name, None).as_deref(), Some("   "));
}

#[test]
fn lookaround_and_backreference_patterns_apply() {
    let secret = field(
        FieldKind::Password,
        "Secret",
        false,
        ValidationRules {
            pattern: Some(r"^(?=.*\d).+$".to_string()),
            ..ValidationRules::default()
        },
    );
    assert_eq!(
        validate(&secret, text("abc").as_ref()).as_deref(),
        Some("Invalid format")
    );
    assert_eq!(validate(&secret, text("abc1").as_ref()), None);

    let doubled = field(
        FieldKind::Text,
        "Doubled",
        false,
        ValidationRules {
            pattern: Some(r"^(\w)\1$".to_string()),
            ..ValidationRules::default()
        },
    );
    assert_eq!(validate(&doubled, text("aa").as_ref()), None);
    assert!(validate(&doubled, text("ab").as_ref()).is_some());
}

#[test]
fn fractional_min_length_is_compared_exactly() {
    let code = field(
        FieldKind::Text,
        "Code",
        false,
        ValidationRules {
            min_length: Some(2.5),
            ..ValidationRules::default()
        },
    );
    assert_eq!(
        validate(&code, text("ab").as_ref()).as_deref(),
        Some("Must be at least 2.5 characters")
    );
    assert_eq!(validate(&code, text("abc").as_ref()), None);
}

#[test]
fn lengths_count_utf16_code_units() {
    let note = field(
        FieldKind::Text,
        "Note",
        false,
        ValidationRules {
            max_length: Some(2.0),
            ..ValidationRules::default()
        },
    );
    assert_eq!(validate(&note, text("\u{e9}\u{e9}").as_ref()), None);
    assert_eq!(
        validate(&note, text("a\u{1F600}").as_ref()).as_deref(),
        Some("Must be no more than 2 characters")
    );
}

#[test]
fn checkbox_selection_counts_as_answer() {
    let topics = field(FieldKind::Checkbox, "Topics", true, ValidationRules::default());
    assert_eq!(
        validate(&topics, Some(&FieldValue::List(Vec::new()))).as_deref(),
        Some("Topics is required")
    );
    assert_eq!(
        validate(&topics, Some(&FieldValue::List(vec!["a".to_string()]))),
        None
    );
}

#[test]
fn validation_is_deterministic() {
    let name = Field::new(
        "n",
        FieldBody::Text(formcraft_core::model::field::TextInput {
            control: Control::new("Name").with_required(true),
            placeholder: String::new(),
        }),
    );
    let first = validate(&name, None);
    for _ in 0..3 {
        assert_eq!(validate(&name, None), first);
    }
}
