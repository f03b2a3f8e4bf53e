//! Form session: values and per-field state for one field list.
//!
//! The schema is built once when the session is created; every change or
//! blur re-validates only the field it concerns. Errors become visible once a
//! field is touched: text inputs are touched on blur, choice and upload
//! controls as soon as their value changes, and every field on submit.

use formsmith_fields::{
    FieldDescriptor, FieldList, FieldOutcome, FieldType, FormValue, Schema, ValidationResult,
    ValidationSettings,
};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{FormError, Result};

/// Lifecycle of a single field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldState {
    /// Not yet interacted with; errors stay hidden.
    #[default]
    Pristine,
    TouchedValid,
    TouchedInvalid { message: String },
}

impl FieldState {
    /// Next state after validating, given whether the event touches the field.
    fn next(&self, outcome: FieldOutcome, touch: bool) -> FieldState {
        if !touch && *self == FieldState::Pristine {
            return FieldState::Pristine;
        }
        match outcome {
            FieldOutcome::Valid => FieldState::TouchedValid,
            FieldOutcome::Invalid { message } => FieldState::TouchedInvalid { message },
        }
    }

    pub fn is_touched(&self) -> bool {
        !matches!(self, FieldState::Pristine)
    }

    /// Error to show beneath the field: only when touched and invalid.
    pub fn visible_error(&self) -> Option<&str> {
        match self {
            FieldState::TouchedInvalid { message } => Some(message),
            _ => None,
        }
    }
}

/// Values captured by a successful submit, in form order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Submission {
    values: IndexMap<String, FormValue>,
}

impl Submission {
    pub fn get(&self, id: &str) -> Option<&FormValue> {
        self.values.get(id)
    }

    pub fn values(&self) -> &IndexMap<String, FormValue> {
        &self.values
    }

    /// The submission as a JSON object: strings, or string arrays for
    /// checkbox fields.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.values
                .iter()
                .map(|(id, value)| {
                    let json = match value {
                        FormValue::Text(s) => serde_json::Value::from(s.as_str()),
                        FormValue::List(items) => serde_json::Value::from(items.clone()),
                    };
                    (id.clone(), json)
                })
                .collect(),
        )
    }
}

/// What a submit attempt produced.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Submitted(Submission),
    Rejected(ValidationResult),
}

/// Live state of a form built from a field list.
#[derive(Debug, Clone)]
pub struct FormSession {
    fields: Vec<FieldDescriptor>,
    schema: Schema,
    values: IndexMap<String, FormValue>,
    states: IndexMap<String, FieldState>,
    submission: Option<Submission>,
}

impl FormSession {
    pub fn new(fields: Vec<FieldDescriptor>, settings: &ValidationSettings) -> Self {
        let schema = Schema::build_with(&fields, settings);
        let values = Self::initial_values(&fields);
        let states = fields
            .iter()
            .map(|f| (f.id.clone(), FieldState::Pristine))
            .collect();
        debug!(fields = fields.len(), "form session created");
        Self {
            fields,
            schema,
            values,
            states,
            submission: None,
        }
    }

    pub fn from_list(list: &FieldList, settings: &ValidationSettings) -> Self {
        Self::new(list.to_vec(), settings)
    }

    /// Starting values: empty text, an empty selection for checkboxes, or a
    /// free-text field's configured value.
    pub fn initial_values(fields: &[FieldDescriptor]) -> IndexMap<String, FormValue> {
        fields
            .iter()
            .map(|f| (f.id.clone(), f.initial_value()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, id: &str) -> Result<&FieldDescriptor> {
        self.fields
            .iter()
            .find(|f| f.id == id)
            .ok_or_else(|| FormError::UnknownField { id: id.to_string() })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn value(&self, id: &str) -> Option<&FormValue> {
        self.values.get(id)
    }

    pub fn values(&self) -> &IndexMap<String, FormValue> {
        &self.values
    }

    pub fn state(&self, id: &str) -> Option<&FieldState> {
        self.states.get(id)
    }

    /// The last successful submission, if any.
    pub fn submission(&self) -> Option<&Submission> {
        self.submission.as_ref()
    }

    /// Set a field's value and re-validate it.
    ///
    /// Choice and upload controls count as touched on change; text inputs
    /// wait for blur.
    pub fn change(&mut self, id: &str, value: FormValue) -> Result<&FieldState> {
        let touch = !self.field(id)?.type_.is_free_text();
        self.values.insert(id.to_string(), value);
        self.revalidate(id, touch)
    }

    /// Add or remove one option from a checkbox field's selection.
    pub fn toggle_option(&mut self, id: &str, option: &str, checked: bool) -> Result<&FieldState> {
        let field = self.field(id)?;
        if field.type_ != FieldType::Checkbox {
            return Err(FormError::NotACheckbox {
                id: id.to_string(),
                field_type: field.type_,
            });
        }
        if !field.options().iter().any(|o| o == option) {
            return Err(FormError::UnknownOption {
                id: id.to_string(),
                option: option.to_string(),
            });
        }

        let mut selected = match self.values.get(id) {
            Some(FormValue::List(items)) => items.clone(),
            _ => Vec::new(),
        };
        if checked {
            if !selected.iter().any(|s| s == option) {
                selected.push(option.to_string());
            }
        } else {
            selected.retain(|s| s != option);
        }

        self.values.insert(id.to_string(), FormValue::List(selected));
        self.revalidate(id, true)
    }

    /// Mark a field touched and re-validate it.
    pub fn blur(&mut self, id: &str) -> Result<&FieldState> {
        self.field(id)?;
        self.revalidate(id, true)
    }

    /// Touch every field and validate the whole form.
    ///
    /// On success the current values are captured as the submission.
    pub fn submit(&mut self) -> SubmitOutcome {
        let result = self.schema.validate(&self.values);
        for (id, outcome) in result.iter() {
            let state = FieldState::Pristine.next(outcome.clone(), true);
            self.states.insert(id.to_string(), state);
        }

        if result.is_valid() {
            let submission = Submission {
                values: self.values.clone(),
            };
            info!(fields = submission.values.len(), "form submitted");
            self.submission = Some(submission.clone());
            SubmitOutcome::Submitted(submission)
        } else {
            debug!(errors = result.error_count(), "submit rejected");
            SubmitOutcome::Rejected(result)
        }
    }

    /// Back to initial values with every field pristine.
    pub fn reset(&mut self) {
        self.values = Self::initial_values(&self.fields);
        for state in self.states.values_mut() {
            *state = FieldState::Pristine;
        }
        self.submission = None;
    }

    fn revalidate(&mut self, id: &str, touch: bool) -> Result<&FieldState> {
        let outcome = self.schema.validate_field(id, self.values.get(id))?;
        let state = self.states.entry(id.to_string()).or_default();
        *state = state.next(outcome, touch);
        Ok(state)
    }
}
