//! Import → schema → validation behaviour across the public API.

use formsmith_fields::{
    parse_fields_from_json, FieldDescriptor, FieldEditor, FieldType, FormValue, Rule, Schema,
    ValidationType,
};
use indexmap::IndexMap;
use proptest::prelude::*;

fn field_type_strategy() -> impl Strategy<Value = FieldType> {
    prop::sample::select(FieldType::ALL.to_vec())
}

fn rule_strategy() -> impl Strategy<Value = Rule> {
    prop_oneof![
        "[a-z ]{0,12}".prop_map(Rule::required),
        (0u32..100, "[a-z ]{0,12}").prop_map(|(n, m)| Rule::min(n as f64, m)),
        (0u32..100, "[a-z ]{0,12}").prop_map(|(n, m)| Rule::max(n as f64, m)),
        "[a-z ]{0,12}".prop_map(Rule::email),
        "[a-z]{3,8}".prop_map(|kind| Rule::Unknown {
            kind: format!("x-{kind}"),
            params: vec![],
        }),
    ]
}

fn fields_strategy() -> impl Strategy<Value = Vec<FieldDescriptor>> {
    prop::collection::vec(
        (
            field_type_strategy(),
            prop::bool::ANY,
            prop::collection::vec(rule_strategy(), 0..5),
        ),
        0..8,
    )
    .prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (type_, numeric, validations))| FieldDescriptor {
                id: format!("field_{i}"),
                label: format!("Field {i}"),
                placeholder: None,
                type_,
                validation_type: if numeric {
                    ValidationType::Number
                } else {
                    ValidationType::String
                },
                value: None,
                options: type_.is_choice().then(|| vec!["one".into(), "two".into()]),
                validations,
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn one_validator_per_descriptor(fields in fields_strategy()) {
        let schema = Schema::build(&fields);
        prop_assert_eq!(schema.len(), fields.len());
        for field in &fields {
            prop_assert!(schema.contains(&field.id));
        }
        let ids: Vec<&str> = schema.field_ids().collect();
        let expected: Vec<&str> = fields.iter().map(|f| f.id.as_str()).collect();
        prop_assert_eq!(ids, expected);
    }

    #[test]
    fn checkbox_accepts_any_non_empty_selection(
        rules in prop::collection::vec(rule_strategy(), 0..5),
        picks in prop::collection::vec("[a-z]{1,6}", 1..4),
    ) {
        let field = FieldDescriptor {
            id: "choices".into(),
            label: "Choices".into(),
            placeholder: None,
            type_: FieldType::Checkbox,
            validation_type: ValidationType::String,
            value: None,
            options: Some(picks.clone()),
            validations: rules,
        };
        let schema = Schema::build([&field]);
        let accepted = schema.validate_field("choices", Some(&FormValue::List(picks))).unwrap();
        prop_assert!(accepted.is_valid());
        let rejected = schema.validate_field("choices", Some(&FormValue::List(vec![]))).unwrap();
        let expected = field
            .required_message()
            .filter(|m| !m.is_empty())
            .unwrap_or("This field is required");
        prop_assert_eq!(rejected.message(), Some(expected));
    }

    #[test]
    fn upload_accepts_any_present_value(name in "[a-zA-Z0-9_.]{1,20}") {
        let field = FieldDescriptor {
            id: "attachment".into(),
            label: "Attachment".into(),
            placeholder: None,
            type_: FieldType::Upload,
            validation_type: ValidationType::String,
            value: None,
            options: None,
            validations: vec![Rule::min(500.0, "ignored")],
        };
        let schema = Schema::build([&field]);
        let attached = schema.validate_field("attachment", Some(&FormValue::text(name))).unwrap();
        prop_assert!(attached.is_valid());
        let missing = schema.validate_field("attachment", None).unwrap();
        prop_assert_eq!(missing.message(), Some("File is required"));
    }

    #[test]
    fn parsed_descriptors_always_build(fields in fields_strategy()) {
        let json = serde_json::to_string(&fields).unwrap();
        let parsed = parse_fields_from_json(&json).unwrap();
        prop_assert_eq!(parsed.len(), fields.len());
        let schema = Schema::build(&parsed);
        prop_assert_eq!(schema.len(), parsed.len());
    }
}

#[test]
fn email_text_field_end_to_end() {
    let mut editor = FieldEditor::new(FieldType::Text);
    editor.set_label("Email");
    let field = editor.save().unwrap();
    assert_eq!(field.id, "email");

    let schema = Schema::build([&field]);
    let check = |value: &str| {
        schema
            .validate_field("email", Some(&FormValue::text(value)))
            .unwrap()
    };

    assert_eq!(check("").message(), Some("email is required"));
    assert!(!check("b").is_valid());
    assert_eq!(
        check("bob").message(),
        Some("Please enter a valid email address")
    );
    assert!(check("bob@x.com").is_valid());
}

#[test]
fn imported_form_validates_whole_submission() {
    let json = r#"[
        {"id":"name","label":"Name","type":"text","validationType":"string",
         "validations":[{"type":"required","params":["Name is required"]},{"type":"min","params":[2,"Too short"]}]},
        {"id":"age","label":"Age","type":"text","validationType":"number",
         "validations":[{"type":"min","params":[18,"Adults only"]},{"type":"max","params":[120,"Really?"]}]},
        {"id":"plan","label":"Plan","type":"select","validationType":"string","options":["Free","Pro"],
         "validations":[{"type":"required","params":["Pick a plan"]}]},
        {"id":"tags","label":"Tags","type":"checkbox","validationType":"string","options":["a","b"],
         "validations":[]},
        {"id":"cv","label":"CV","type":"upload","validationType":"string",
         "validations":[{"type":"required","params":["Attach your CV"]}]}
    ]"#;
    let fields = parse_fields_from_json(json).unwrap();
    let schema = Schema::build(&fields);

    let mut values = IndexMap::new();
    values.insert("name".to_string(), FormValue::text("J"));
    values.insert("age".to_string(), FormValue::text("seventeen"));
    values.insert("tags".to_string(), FormValue::List(vec![]));
    let result = schema.validate(&values);
    assert_eq!(result.error("name"), Some("Too short"));
    assert_eq!(result.error("age"), Some("Age must be a number"));
    assert_eq!(result.error("plan"), Some("Pick a plan"));
    assert_eq!(result.error("tags"), Some("This field is required"));
    assert_eq!(result.error("cv"), Some("Attach your CV"));

    values.insert("name".to_string(), FormValue::text("Jo"));
    values.insert("age".to_string(), FormValue::text("30"));
    values.insert("plan".to_string(), FormValue::text("Pro"));
    values.insert("tags".to_string(), FormValue::List(vec!["a".into()]));
    values.insert("cv".to_string(), FormValue::text("cv.pdf"));
    assert!(schema.validate(&values).is_valid());
}

#[test]
fn optional_number_field_accepts_empty() {
    let fields = parse_fields_from_json(
        r#"[{"id":"count","label":"Count","type":"text","validationType":"number","validations":[{"type":"min","params":[1,"At least one"]}]}]"#,
    )
    .unwrap();
    let schema = Schema::build(&fields);
    assert!(schema
        .validate_field("count", Some(&FormValue::empty()))
        .unwrap()
        .is_valid());
    assert_eq!(
        schema
            .validate_field("count", Some(&FormValue::text("0")))
            .unwrap()
            .message(),
        Some("At least one")
    );
}
