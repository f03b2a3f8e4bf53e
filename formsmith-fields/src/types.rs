//! Core field types.
//!
//! Descriptors serialize to/from the camelCase JSON shape used by form
//! definitions (`validationType`, `type`). A field descriptor describes one
//! input; its rules describe what a valid value looks like.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::rules::Rule;

/// The kind of input a field renders as.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Select,
    Textarea,
    Radio,
    Checkbox,
    Upload,
}

impl FieldType {
    /// Every field type, in palette order.
    pub const ALL: [FieldType; 6] = [
        FieldType::Text,
        FieldType::Select,
        FieldType::Textarea,
        FieldType::Radio,
        FieldType::Checkbox,
        FieldType::Upload,
    ];

    /// Get the wire tag for this field type
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Select => "select",
            FieldType::Textarea => "textarea",
            FieldType::Radio => "radio",
            FieldType::Checkbox => "checkbox",
            FieldType::Upload => "upload",
        }
    }

    /// Human-facing name, as shown on palette entries.
    pub fn display_name(&self) -> &'static str {
        match self {
            FieldType::Text => "Text",
            FieldType::Select => "Select",
            FieldType::Textarea => "Textarea",
            FieldType::Radio => "Radio",
            FieldType::Checkbox => "Checkbox",
            FieldType::Upload => "Upload",
        }
    }

    /// Select, radio and checkbox fields pick from a list of options.
    pub fn is_choice(&self) -> bool {
        matches!(
            self,
            FieldType::Select | FieldType::Radio | FieldType::Checkbox
        )
    }

    /// Text and textarea fields accept free text and show a placeholder.
    pub fn is_free_text(&self) -> bool {
        matches!(self, FieldType::Text | FieldType::Textarea)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown field type '{s}'"))
    }
}

/// Base validation applied before a field's rules.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ValidationType {
    String,
    Number,
}

impl ValidationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationType::String => "string",
            ValidationType::Number => "number",
        }
    }
}

impl fmt::Display for ValidationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field descriptor: the declarative record for one form field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(rename = "type")]
    pub type_: FieldType,
    pub validation_type: ValidationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub validations: Vec<Rule>,
}

impl FieldDescriptor {
    /// True when the rule list carries a `required` rule.
    pub fn is_required(&self) -> bool {
        self.validations.iter().any(Rule::is_required)
    }

    /// Message of the first `required` rule, if it has one.
    pub fn required_message(&self) -> Option<&str> {
        self.validations.iter().find_map(|rule| match rule {
            Rule::Required { message } => message.as_deref(),
            _ => None,
        })
    }

    /// Options for choice fields; empty for everything else.
    pub fn options(&self) -> &[String] {
        self.options.as_deref().unwrap_or_default()
    }

    /// Placeholder text, empty when none was configured.
    pub fn placeholder(&self) -> &str {
        self.placeholder.as_deref().unwrap_or_default()
    }

    /// The value a form starts with for this field.
    ///
    /// Checkbox fields start with an empty selection; free-text fields start
    /// with their configured `value`; everything else starts empty.
    pub fn initial_value(&self) -> FormValue {
        match self.type_ {
            FieldType::Checkbox => FormValue::List(Vec::new()),
            t if t.is_free_text() => FormValue::Text(self.value.clone().unwrap_or_default()),
            _ => FormValue::empty(),
        }
    }
}

/// A value entered into a form field.
///
/// Text covers every single-valued control, including the name of an
/// uploaded file; List holds checkbox selections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Text(String),
    List(Vec<String>),
}

impl FormValue {
    pub fn empty() -> Self {
        FormValue::Text(String::new())
    }

    pub fn text(value: impl Into<String>) -> Self {
        FormValue::Text(value.into())
    }

    /// An empty string counts as no value at all.
    pub fn is_absent(&self) -> bool {
        matches!(self, FormValue::Text(s) if s.is_empty())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FormValue::Text(s) => Some(s),
            FormValue::List(_) => None,
        }
    }

    /// Number of selected entries: list length, or one for non-empty text.
    pub fn selection_count(&self) -> usize {
        match self {
            FormValue::Text(s) if s.is_empty() => 0,
            FormValue::Text(_) => 1,
            FormValue::List(items) => items.len(),
        }
    }

    /// Convert a loosely-typed JSON value (as found in a values file).
    ///
    /// Scalars become text, arrays become lists, `null` becomes an empty
    /// value. Objects have no form representation.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        use serde_json::Value;
        match value {
            Value::Null => Some(FormValue::empty()),
            Value::String(s) => Some(FormValue::Text(s.clone())),
            Value::Number(n) => Some(FormValue::Text(n.to_string())),
            Value::Bool(b) => Some(FormValue::Text(b.to_string())),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect::<Option<Vec<_>>>()
                .map(FormValue::List),
            Value::Object(_) => None,
        }
    }
}

impl Default for FormValue {
    fn default() -> Self {
        FormValue::empty()
    }
}

impl fmt::Display for FormValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormValue::Text(s) => f.write_str(s),
            FormValue::List(items) => f.write_str(&items.join(", ")),
        }
    }
}
