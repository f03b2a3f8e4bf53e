//! Render model for a form session.
//!
//! [`render`] produces a front-end neutral description of the form: one
//! control per field chosen by field type, the required marker, the current
//! value and the error to show. Front-ends (the CLI prompts and preview) draw
//! from this and never look at rules directly.

use formsmith_fields::{FieldDescriptor, FieldType, FormValue, ValidationType};
use serde::Serialize;

use crate::session::FormSession;

pub const FORM_TITLE: &str = "Form Preview";
pub const EMPTY_TITLE: &str = "No fields added yet";
pub const EMPTY_HINT: &str = "Select field types from the sidebar to start building your form";
pub const SELECT_PLACEHOLDER: &str = "Select an option";
pub const SUBMITTED_MESSAGE: &str = "Form submitted successfully!";

/// Input flavour of a single-line text control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Text,
    Number,
}

/// One option of a choice control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub value: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "control", rename_all = "snake_case")]
pub enum Control {
    TextInput {
        input_kind: InputKind,
        placeholder: String,
    },
    TextArea {
        placeholder: String,
    },
    Select {
        placeholder: String,
        options: Vec<Choice>,
    },
    RadioGroup {
        options: Vec<Choice>,
    },
    CheckboxGroup {
        options: Vec<Choice>,
    },
    FilePicker,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedField {
    pub id: String,
    pub label: String,
    pub required: bool,
    pub control: Control,
    pub value: FormValue,
    /// Present only when the field is touched and invalid
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum FormView {
    /// Shown instead of a form when there are no fields
    Placeholder { title: String, hint: String },
    Form {
        title: String,
        fields: Vec<RenderedField>,
        /// Success notice after a submit went through
        submitted: Option<String>,
    },
}

impl FormView {
    pub fn fields(&self) -> &[RenderedField] {
        match self {
            FormView::Placeholder { .. } => &[],
            FormView::Form { fields, .. } => fields,
        }
    }
}

pub fn render(session: &FormSession) -> FormView {
    if session.is_empty() {
        return FormView::Placeholder {
            title: EMPTY_TITLE.to_string(),
            hint: EMPTY_HINT.to_string(),
        };
    }

    let fields = session
        .fields()
        .iter()
        .map(|field| {
            let value = session
                .value(&field.id)
                .cloned()
                .unwrap_or_else(|| field.initial_value());
            let error = session
                .state(&field.id)
                .and_then(|state| state.visible_error())
                .map(String::from);
            RenderedField {
                id: field.id.clone(),
                label: field.label.clone(),
                required: field.is_required(),
                control: control_for(field, &value),
                value,
                error,
            }
        })
        .collect();

    FormView::Form {
        title: FORM_TITLE.to_string(),
        fields,
        submitted: session
            .submission()
            .map(|_| SUBMITTED_MESSAGE.to_string()),
    }
}

fn control_for(field: &FieldDescriptor, value: &FormValue) -> Control {
    let choices = || {
        field
            .options()
            .iter()
            .map(|option| Choice {
                value: option.clone(),
                selected: is_selected(value, option),
            })
            .collect::<Vec<_>>()
    };

    match field.type_ {
        FieldType::Text => Control::TextInput {
            input_kind: match field.validation_type {
                ValidationType::Number => InputKind::Number,
                ValidationType::String => InputKind::Text,
            },
            placeholder: field.placeholder().to_string(),
        },
        FieldType::Textarea => Control::TextArea {
            placeholder: field.placeholder().to_string(),
        },
        FieldType::Select => Control::Select {
            placeholder: SELECT_PLACEHOLDER.to_string(),
            options: choices(),
        },
        FieldType::Radio => Control::RadioGroup { options: choices() },
        FieldType::Checkbox => Control::CheckboxGroup { options: choices() },
        FieldType::Upload => Control::FilePicker,
    }
}

fn is_selected(value: &FormValue, option: &str) -> bool {
    match value {
        FormValue::Text(s) => s == option,
        FormValue::List(items) => items.iter().any(|item| item == option),
    }
}
