use formcraft_core::{
    ConditionOperator, ConditionPatch, EditorTab, ExportFormat, FieldValue, FormMeta,
    FormSession, FormValues, FormcraftConfig, Intent, LogicPatch, MetaPatch,
};

fn answers(pairs: &[(&str, FieldValue)]) -> FormValues {
    pairs
        .iter()
        .map(|(id, value)| (id.to_string(), value.clone()))
        .collect()
}

#[test]
fn session_starts_from_configured_defaults() {
    let config = FormcraftConfig {
        defaults: FormMeta::new("Survey", "Tell us more"),
        ..FormcraftConfig::default()
    };
    let mut session = FormSession::with_config(config);
    assert_eq!(session.state().meta.title, "Survey");

    session.add_field_named("text").unwrap();
    session.dispatch(Intent::Clear);
    assert_eq!(session.state().meta.title, "Survey");
    assert!(session.state().fields.is_empty());
}

#[test]
fn selected_field_follows_additions() {
    let mut session = FormSession::new();
    let id = session.add_field_named("email").unwrap();
    assert_eq!(session.state().selected_field().unwrap().id(), id);

    session.dispatch(Intent::SelectField(Some("ghost".to_string())));
    assert!(session.state().selected_field().is_none());
}

#[test]
fn condition_editing_goes_through_the_reducer() {
    let mut session = FormSession::new();
    let plan = session.add_field_named("radio").unwrap();
    let coupon = session.add_field_named("text").unwrap();

    session.add_condition(&coupon);
    session.add_condition(&coupon);
    session.update_condition(
        &coupon,
        1,
        ConditionPatch {
            operator: Some(ConditionOperator::NotEquals),
            value: Some("option_1".to_string()),
            ..ConditionPatch::default()
        },
    );
    session.remove_condition(&coupon, 0);

    let logic = session
        .state()
        .field(&coupon)
        .and_then(|field| field.conditional_logic())
        .unwrap()
        .clone();
    assert_eq!(logic.conditions.len(), 1);
    assert_eq!(logic.conditions[0].field_id, plan);
    assert_eq!(logic.conditions[0].operator, ConditionOperator::NotEquals);
    assert!(session.state().is_dirty);

    let before = session.state().clone();
    session.remove_condition(&coupon, 5);
    session.update_condition("ghost", 0, ConditionPatch::default());
    assert_eq!(session.state(), &before);
}

#[test]
fn preview_skips_hidden_and_layout_fields() {
    let mut session = FormSession::new();
    let plan = session.add_field_named("select").unwrap();
    session.add_field_named("heading").unwrap();
    let company = session.add_field_named("text").unwrap();

    session.dispatch(Intent::UpdateField {
        field_id: company.clone(),
        patch: formcraft_core::FieldPatch {
            label: Some("Company".to_string()),
            required: Some(true),
            ..Default::default()
        },
    });
    session.add_condition(&company);
    session.update_condition(
        &company,
        0,
        ConditionPatch {
            value: Some("option_2".to_string()),
            ..ConditionPatch::default()
        },
    );
    session.dispatch(Intent::UpdateConditional {
        field_id: company.clone(),
        patch: LogicPatch {
            enabled: Some(true),
            ..LogicPatch::default()
        },
    });

    let hidden = answers(&[(plan.as_str(), FieldValue::text("option_1"))]);
    assert!(session.validate_preview(&hidden).is_empty());
    assert_eq!(session.visible_fields(&hidden).len(), 2);

    let shown = answers(&[(plan.as_str(), FieldValue::text("option_2"))]);
    let errors = session.validate_preview(&shown);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[&company], "Company is required");
}

#[test]
fn preview_payload_lists_every_answerable_field() {
    let mut session = FormSession::new();
    let email = session.add_field_named("email").unwrap();
    session.add_field_named("divider").unwrap();
    let agree = session.add_field_named("toggle").unwrap();
    session.dispatch(Intent::UpdateField {
        field_id: agree.clone(),
        patch: formcraft_core::FieldPatch {
            label: Some(String::new()),
            ..Default::default()
        },
    });

    let values = answers(&[(email.as_str(), FieldValue::text("a@b.com"))]);
    assert!(session.validate_preview(&values).is_empty());

    let payload = serde_json::Value::Object(session.preview_payload(&values));
    let mut expected = serde_json::Map::new();
    expected.insert("Email Address".to_string(), serde_json::json!("a@b.com"));
    expected.insert(agree.clone(), serde_json::Value::Null);
    assert_eq!(payload, serde_json::Value::Object(expected));
}

#[test]
fn exports_and_file_names_follow_meta() {
    let mut session = FormSession::new();
    session.dispatch(Intent::SetMeta(MetaPatch {
        title: Some("Event  signup".to_string()),
        description: None,
    }));
    session.add_field_named("date").unwrap();

    assert_eq!(
        session.export_file_name(ExportFormat::Json),
        "Event_signup.json"
    );
    assert_eq!(
        session.export_file_name(ExportFormat::Html),
        "Event_signup.html"
    );

    let json: serde_json::Value =
        serde_json::from_str(&session.export(ExportFormat::Json)).unwrap();
    assert_eq!(json["meta"]["title"], "Event  signup");
    assert_eq!(json["fields"][0]["type"], "date");

    let html = session.export(ExportFormat::Html);
    assert!(html.contains("<input type=\"date\""));
}

#[test]
fn loading_schema_replaces_document_and_keeps_tab() {
    let mut session = FormSession::new();
    session.add_field_named("text").unwrap();
    session.dispatch(Intent::SetTab(EditorTab::Export));

    session
        .load_schema_json(
            r#"{
                "$schemaId": "https://formcraft.io/schema/v1",
                "version": "1.0",
                "meta": { "title": "Imported" },
                "fields": [
                    { "id": "q1", "type": "number", "label": "Age", "required": true,
                      "validation": { "min": "18" } }
                ]
            }"#,
        )
        .unwrap();

    let state = session.state();
    assert_eq!(state.meta.title, "Imported");
    assert_eq!(state.meta.description, "Fill out the form below to get started.");
    assert_eq!(state.fields.len(), 1);
    assert_eq!(state.fields[0].validation().unwrap().min, Some(18.0));
    assert_eq!(state.active_tab, EditorTab::Export);
    assert!(!state.is_dirty);
    assert_eq!(state.selected_field_id, None);
}

#[test]
fn broken_schema_text_leaves_session_unchanged() {
    let mut session = FormSession::new();
    session.add_field_named("text").unwrap();
    let before = session.state().clone();

    assert!(session.load_schema_json("[]").is_err());
    assert!(session.load_schema_json("{").is_err());
    assert_eq!(session.state(), &before);
}

#[test]
fn schema_from_disk_round_trips_through_a_new_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("form.json");

    let mut original = FormSession::new();
    original.add_field_named("checkbox").unwrap();
    original.add_field_named("toggle").unwrap();
    std::fs::write(&path, original.export_schema_json()).unwrap();

    let mut restored = FormSession::new();
    restored
        .load_schema_json(&std::fs::read_to_string(&path).unwrap())
        .unwrap();
    assert_eq!(restored.state().fields, original.state().fields);
}
