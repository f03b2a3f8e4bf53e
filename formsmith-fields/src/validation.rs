//! Validation schema built from field descriptors.
//!
//! Each descriptor compiles into one [`FieldValidator`]: a base type check
//! (string or number) followed by the field's rules, folded in declaration
//! order. Checkbox and upload fields replace the folded validator entirely
//! with a presence check. Fields are validated independently; there are no
//! cross-field rules.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{FieldsError, Result};
use crate::rules::Rule;
use crate::types::{FieldDescriptor, FieldType, FormValue, ValidationType};

/// Email address pattern
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles"));

/// Messages the schema builder falls back on when a field doesn't supply one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSettings {
    /// Checkbox fields without a `required` rule message
    pub checkbox_required_message: String,
    /// Upload fields without a `required` rule message
    pub upload_required_message: String,
    /// Number type mismatch; `{label}` is replaced with the field label
    pub number_type_message: String,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            checkbox_required_message: "This field is required".to_string(),
            upload_required_message: "File is required".to_string(),
            number_type_message: "{label} must be a number".to_string(),
        }
    }
}

/// One compiled check, carrying the message reported when it fails.
#[derive(Debug, Clone, PartialEq)]
pub enum Check {
    Required(String),
    MinLength(f64, String),
    MaxLength(f64, String),
    Email(String),
    MinValue(f64, String),
    MaxValue(f64, String),
}

impl Check {
    fn describe(&self) -> String {
        match self {
            Check::Required(_) => "required".to_string(),
            Check::MinLength(n, _) => format!("min length {n}"),
            Check::MaxLength(n, _) => format!("max length {n}"),
            Check::Email(_) => "email".to_string(),
            Check::MinValue(n, _) => format!(">= {n}"),
            Check::MaxValue(n, _) => format!("<= {n}"),
        }
    }
}

/// The effective validator for a field.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidatorKind {
    /// Free text with length/email checks.
    Text { checks: Vec<Check> },
    /// Numeric input with range checks.
    Number {
        type_message: String,
        checks: Vec<Check>,
    },
    /// At least one selected option.
    Selection { message: String },
    /// A non-empty file value.
    File { message: String },
}

/// Result of validating one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOutcome {
    Valid,
    Invalid { message: String },
}

impl FieldOutcome {
    fn invalid(message: impl Into<String>) -> Self {
        FieldOutcome::Invalid {
            message: message.into(),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, FieldOutcome::Valid)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            FieldOutcome::Valid => None,
            FieldOutcome::Invalid { message } => Some(message),
        }
    }
}

/// Validator compiled for a single field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValidator {
    label: String,
    kind: ValidatorKind,
}

impl FieldValidator {
    /// Compile a descriptor into its validator.
    pub fn compile(field: &FieldDescriptor, settings: &ValidationSettings) -> Self {
        let kind = match field.type_ {
            FieldType::Checkbox => ValidatorKind::Selection {
                message: field
                    .required_message()
                    .filter(|m| !m.is_empty())
                    .unwrap_or(&settings.checkbox_required_message)
                    .to_string(),
            },
            FieldType::Upload => ValidatorKind::File {
                message: field
                    .required_message()
                    .filter(|m| !m.is_empty())
                    .unwrap_or(&settings.upload_required_message)
                    .to_string(),
            },
            _ => {
                let checks = fold_rules(field);
                match field.validation_type {
                    ValidationType::String => ValidatorKind::Text { checks },
                    ValidationType::Number => ValidatorKind::Number {
                        type_message: settings.number_type_message.replace("{label}", &field.label),
                        checks,
                    },
                }
            }
        };

        Self {
            label: field.label.clone(),
            kind,
        }
    }

    pub fn kind(&self) -> &ValidatorKind {
        &self.kind
    }

    /// One-line description, e.g. `string: required, min length 2`.
    pub fn summary(&self) -> String {
        let describe = |base: &str, checks: &[Check]| {
            if checks.is_empty() {
                base.to_string()
            } else {
                let parts: Vec<String> = checks.iter().map(Check::describe).collect();
                format!("{base}: {}", parts.join(", "))
            }
        };
        match &self.kind {
            ValidatorKind::Text { checks } => describe("string", checks),
            ValidatorKind::Number { checks, .. } => describe("number", checks),
            ValidatorKind::Selection { .. } => "at least one selection".to_string(),
            ValidatorKind::File { .. } => "file required".to_string(),
        }
    }

    /// Validate a value; `None` is treated as an empty value.
    pub fn validate(&self, value: Option<&FormValue>) -> FieldOutcome {
        let empty = FormValue::empty();
        let value = value.unwrap_or(&empty);

        match &self.kind {
            ValidatorKind::Selection { message } => match value {
                FormValue::List(items) if !items.is_empty() => FieldOutcome::Valid,
                _ => FieldOutcome::invalid(message),
            },
            ValidatorKind::File { message } => {
                if value.selection_count() > 0 {
                    FieldOutcome::Valid
                } else {
                    FieldOutcome::invalid(message)
                }
            }
            ValidatorKind::Text { checks } => {
                let Some(text) = value.as_text() else {
                    return FieldOutcome::invalid(format!("{} must be text", self.label));
                };
                if text.is_empty() {
                    return required_outcome(checks);
                }
                checks
                    .iter()
                    .find_map(|check| failing_text_check(check, text))
                    .map_or(FieldOutcome::Valid, FieldOutcome::invalid)
            }
            ValidatorKind::Number {
                type_message,
                checks,
            } => {
                let Some(text) = value.as_text() else {
                    return FieldOutcome::invalid(type_message);
                };
                if text.is_empty() {
                    return required_outcome(checks);
                }
                let Some(number) = parse_number(text) else {
                    return FieldOutcome::invalid(type_message);
                };
                checks
                    .iter()
                    .find_map(|check| failing_number_check(check, number))
                    .map_or(FieldOutcome::Valid, FieldOutcome::invalid)
            }
        }
    }
}

/// Translate a field's rules into checks for its base validation type.
fn fold_rules(field: &FieldDescriptor) -> Vec<Check> {
    let id = &field.id;
    let is_string = field.validation_type == ValidationType::String;

    field
        .validations
        .iter()
        .filter_map(|rule| {
            let check = match rule {
                Rule::Required { message } => Check::Required(
                    message
                        .clone()
                        .unwrap_or_else(|| format!("{id} is a required field")),
                ),
                Rule::Min { limit, message } if is_string => Check::MinLength(
                    *limit,
                    message
                        .clone()
                        .unwrap_or_else(|| format!("{id} must be at least {limit} characters")),
                ),
                Rule::Min { limit, message } => Check::MinValue(
                    *limit,
                    message
                        .clone()
                        .unwrap_or_else(|| format!("{id} must be greater than or equal to {limit}")),
                ),
                Rule::Max { limit, message } if is_string => Check::MaxLength(
                    *limit,
                    message
                        .clone()
                        .unwrap_or_else(|| format!("{id} must be at most {limit} characters")),
                ),
                Rule::Max { limit, message } => Check::MaxValue(
                    *limit,
                    message
                        .clone()
                        .unwrap_or_else(|| format!("{id} must be less than or equal to {limit}")),
                ),
                Rule::Email { message } if is_string => Check::Email(
                    message
                        .clone()
                        .unwrap_or_else(|| format!("{id} must be a valid email")),
                ),
                Rule::Email { .. } => return None,
                Rule::Unknown { kind, .. } => {
                    trace!(field = %id, kind = %kind, "skipping unrecognised rule");
                    return None;
                }
            };
            Some(check)
        })
        .collect()
}

fn required_outcome(checks: &[Check]) -> FieldOutcome {
    checks
        .iter()
        .find_map(|check| match check {
            Check::Required(message) => Some(FieldOutcome::invalid(message)),
            _ => None,
        })
        .unwrap_or(FieldOutcome::Valid)
}

fn failing_text_check<'a>(check: &'a Check, text: &str) -> Option<&'a str> {
    let length = text.chars().count() as f64;
    match check {
        Check::MinLength(limit, message) if length < *limit => Some(message),
        Check::MaxLength(limit, message) if length > *limit => Some(message),
        Check::Email(message) if !EMAIL_PATTERN.is_match(text) => Some(message),
        _ => None,
    }
}

fn failing_number_check(check: &Check, number: f64) -> Option<&str> {
    match check {
        Check::MinValue(limit, message) if number < *limit => Some(message),
        Check::MaxValue(limit, message) if number > *limit => Some(message),
        _ => None,
    }
}

/// Coerce entered text to a number; whitespace anywhere is ignored.
fn parse_number(text: &str) -> Option<f64> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return None;
    }
    compact.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Per-field outcome of validating a whole form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    outcomes: IndexMap<String, FieldOutcome>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.outcomes.values().all(FieldOutcome::is_valid)
    }

    pub fn outcome(&self, id: &str) -> Option<&FieldOutcome> {
        self.outcomes.get(id)
    }

    pub fn error(&self, id: &str) -> Option<&str> {
        self.outcomes.get(id).and_then(FieldOutcome::message)
    }

    /// Failing fields in form order, with their messages.
    pub fn errors(&self) -> impl Iterator<Item = (&str, &str)> {
        self.outcomes
            .iter()
            .filter_map(|(id, outcome)| outcome.message().map(|m| (id.as_str(), m)))
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldOutcome)> {
        self.outcomes.iter().map(|(id, outcome)| (id.as_str(), outcome))
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Executable validators for a list of fields, keyed by field id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    validators: IndexMap<String, FieldValidator>,
}

impl Schema {
    /// Build a schema with the default fallback messages.
    pub fn build<'a>(fields: impl IntoIterator<Item = &'a FieldDescriptor>) -> Self {
        Self::build_with(fields, &ValidationSettings::default())
    }

    /// Build a schema, one validator per field id, in field order.
    ///
    /// A later descriptor with an id already seen replaces the earlier
    /// validator.
    pub fn build_with<'a>(
        fields: impl IntoIterator<Item = &'a FieldDescriptor>,
        settings: &ValidationSettings,
    ) -> Self {
        let validators: IndexMap<String, FieldValidator> = fields
            .into_iter()
            .map(|field| (field.id.clone(), FieldValidator::compile(field, settings)))
            .collect();

        debug!(fields = validators.len(), "validation schema built");
        Self { validators }
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.validators.contains_key(id)
    }

    pub fn validator(&self, id: &str) -> Option<&FieldValidator> {
        self.validators.get(id)
    }

    pub fn field_ids(&self) -> impl Iterator<Item = &str> {
        self.validators.keys().map(String::as_str)
    }

    /// Validate one field without touching any other.
    pub fn validate_field(&self, id: &str, value: Option<&FormValue>) -> Result<FieldOutcome> {
        let validator = self
            .validators
            .get(id)
            .ok_or_else(|| FieldsError::FieldNotFound { id: id.to_string() })?;
        Ok(validator.validate(value))
    }

    /// Validate every field; fields missing from `values` count as empty.
    pub fn validate(&self, values: &IndexMap<String, FormValue>) -> ValidationResult {
        let outcomes = self
            .validators
            .iter()
            .map(|(id, validator)| (id.clone(), validator.validate(values.get(id))))
            .collect();
        ValidationResult { outcomes }
    }
}
