//! Builder session driven the way a front-end drives it.

use std::time::{Duration, Instant};

use formsmith_fields::{FieldType, FormValue};
use formsmith_form::{Builder, Control, FormView, ImportIndicator, InputKind, Mode, SubmitOutcome};

#[test_log::test]
fn build_fill_and_submit() {
    let mut builder = Builder::default();

    builder.add_field(FieldType::Text).set_label("Email");
    builder.save_field().unwrap();

    let editor = builder.add_field(FieldType::Radio);
    editor.set_label("Plan");
    editor.set_options("Free\nPro\n");
    builder.save_field().unwrap();

    builder.add_field(FieldType::Text).set_label("Quantity");
    builder.save_field().unwrap();

    let view = builder.view();
    assert_eq!(view.fields().len(), 3);
    assert_eq!(
        view.fields()[2].control,
        Control::TextInput {
            input_kind: InputKind::Number,
            placeholder: String::new()
        }
    );

    let session = builder.session_mut();
    session.change("email", FormValue::text("bob")).unwrap();
    session.blur("email").unwrap();
    assert_eq!(
        builder.view().fields()[0].error.as_deref(),
        Some("Please enter a valid email address")
    );

    let session = builder.session_mut();
    let SubmitOutcome::Rejected(result) = session.submit() else {
        panic!("incomplete form must not submit");
    };
    assert_eq!(result.error("plan"), Some("plan is required"));
    assert_eq!(result.error("quantity"), Some("quantity is required"));

    session.change("email", FormValue::text("bob@x.com")).unwrap();
    session.change("plan", FormValue::text("Pro")).unwrap();
    session.change("quantity", FormValue::text("12")).unwrap();
    let SubmitOutcome::Submitted(submission) = session.submit() else {
        panic!("complete form must submit");
    };
    assert_eq!(
        submission.to_json(),
        serde_json::json!({"email": "bob@x.com", "plan": "Pro", "quantity": "12"})
    );
    assert!(matches!(
        builder.view(),
        FormView::Form { submitted: Some(_), .. }
    ));
}

#[test_log::test]
fn import_dialog_lifecycle() {
    let mut builder = Builder::default();
    builder.importer_mut().open_dialog();

    let start = Instant::now();
    assert!(!builder.import_json("[1, 2]", start));
    assert_eq!(
        builder.importer().indicator(start),
        Some(ImportIndicator::Error("No valid fields found in JSON".into()))
    );

    let json = r#"[
        {"id":"a","label":"A","type":"text","validationType":"string","validations":[]},
        {"id":"a","label":"A again","type":"textarea","validationType":"string","validations":[]},
        {"id":"b","label":"B","type":"checkbox","validationType":"string","options":["x"],"validations":[]}
    ]"#;
    assert!(builder.import_json(json, start));
    assert_eq!(builder.fields().len(), 2);
    assert_eq!(
        builder.importer().indicator(start),
        Some(ImportIndicator::Success("Successfully loaded 2 fields".into()))
    );

    builder.tick(start + Duration::from_millis(1500));
    assert!(!builder.importer().is_open());
    assert_eq!(builder.mode(), Mode::Preview);
}
