//! Field editor. Builds one new descriptor from user-entered text.
//!
//! The editor is given a field type up front and collects a label, a
//! placeholder and (for choice fields) one option per line. Saving derives the
//! id from the label and infers a couple of semantic defaults from it: ids
//! that mention a numeric keyword validate as numbers, ids that mention
//! `email` get an email rule.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::defaults::default_rules_for_type;
use crate::rules::Rule;
use crate::types::{FieldDescriptor, FieldType, ValidationType};

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern compiles"));

/// Inference settings for new fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Substrings of an id that make the field validate as a number
    pub numeric_keywords: Vec<String>,
    /// Message of the email rule added to ids containing `email`
    pub email_message: String,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            numeric_keywords: [
                "phone", "number", "age", "count", "total", "quantity", "amount", "price",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            email_message: "Please enter a valid email address".to_string(),
        }
    }
}

/// Derive a field id from its label: lower-cased, whitespace runs collapsed
/// to a single underscore.
pub fn derive_field_id(label: &str) -> String {
    WHITESPACE_RUN
        .replace_all(&label.to_lowercase(), "_")
        .into_owned()
}

/// Collects input for exactly one new field of a fixed type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldEditor {
    field_type: FieldType,
    label: String,
    placeholder: String,
    options: String,
    settings: EditorSettings,
}

impl FieldEditor {
    pub fn new(field_type: FieldType) -> Self {
        Self::with_settings(field_type, EditorSettings::default())
    }

    pub fn with_settings(field_type: FieldType, settings: EditorSettings) -> Self {
        Self {
            field_type,
            label: String::new(),
            placeholder: String::new(),
            options: String::new(),
            settings,
        }
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.placeholder = placeholder.into();
    }

    /// Options text, one option per line.
    pub fn set_options(&mut self, options: impl Into<String>) {
        self.options = options.into();
    }

    /// Whether this editor asks for a placeholder.
    pub fn wants_placeholder(&self) -> bool {
        self.field_type.is_free_text()
    }

    /// Whether this editor asks for options.
    pub fn wants_options(&self) -> bool {
        self.field_type.is_choice()
    }

    /// Assemble the descriptor, or `None` when the label is blank.
    pub fn save(&self) -> Option<FieldDescriptor> {
        if self.label.trim().is_empty() {
            return None;
        }

        let id = derive_field_id(&self.label);
        let validation_type = if self
            .settings
            .numeric_keywords
            .iter()
            .any(|keyword| id.contains(keyword.as_str()))
        {
            ValidationType::Number
        } else {
            ValidationType::String
        };

        let mut validations = default_rules_for_type(self.field_type, &id);
        if id.contains("email") {
            validations.push(Rule::email(self.settings.email_message.clone()));
        }
        if validation_type == ValidationType::Number {
            validations.push(Rule::min(0.0, format!("{id} must be a positive number")));
        }

        let options = if self.field_type.is_choice() {
            let lines: Vec<String> = self
                .options
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(String::from)
                .collect();
            (!lines.is_empty()).then_some(lines)
        } else {
            None
        };

        let placeholder = (!self.placeholder.is_empty()).then(|| self.placeholder.clone());

        debug!(id = %id, field_type = %self.field_type, %validation_type, "field saved from editor");

        Some(FieldDescriptor {
            id,
            label: self.label.clone(),
            placeholder,
            type_: self.field_type,
            validation_type,
            value: None,
            options,
            validations,
        })
    }
}
