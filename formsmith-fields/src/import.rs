//! JSON import of field definitions.

use serde_json::Value;
use tracing::debug;

use crate::error::{FieldsError, Result};
use crate::types::FieldDescriptor;

/// Keys every imported entry must carry as non-empty strings.
const REQUIRED_KEYS: [&str; 4] = ["id", "label", "type", "validationType"];

/// Parse pasted JSON into field descriptors.
///
/// The text must be a JSON array. Entries lacking a non-empty `id`, `label`,
/// `type` or `validationType`, or an array-typed `validations`, are dropped
/// without a per-entry error; so are entries whose values don't decode (an
/// unknown field type, say). A malformed element inside `validations` does
/// not drop its entry; it is kept as an unknown rule. Only malformed text or
/// a non-array document is an error.
pub fn parse_fields_from_json(json: &str) -> Result<Vec<FieldDescriptor>> {
    parse_import(json).map(|import| import.fields)
}

/// Fields parsed from one import, with the size of the array they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedImport {
    pub fields: Vec<FieldDescriptor>,
    /// Entries in the JSON array, kept or not
    pub entries: usize,
}

impl ParsedImport {
    pub fn dropped(&self) -> usize {
        self.entries - self.fields.len()
    }
}

/// [`parse_fields_from_json`], also reporting how many entries were read.
pub fn parse_import(json: &str) -> Result<ParsedImport> {
    let document: Value = serde_json::from_str(json)?;

    let entries = match document {
        Value::Array(entries) => entries,
        other => {
            return Err(FieldsError::NotAnArray {
                found: json_kind(&other).to_string(),
            })
        }
    };

    let total = entries.len();
    let fields: Vec<FieldDescriptor> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            if !has_required_keys(&entry) {
                debug!(index, "dropping entry without required keys");
                return None;
            }
            match serde_json::from_value::<FieldDescriptor>(entry) {
                Ok(field) => Some(field),
                Err(e) => {
                    debug!(index, error = %e, "dropping entry that does not decode");
                    None
                }
            }
        })
        .collect();

    debug!(
        kept = fields.len(),
        dropped = total - fields.len(),
        "parsed field definitions"
    );
    Ok(ParsedImport {
        fields,
        entries: total,
    })
}

fn has_required_keys(entry: &Value) -> bool {
    let non_empty = |key: &str| {
        entry
            .get(key)
            .and_then(Value::as_str)
            .is_some_and(|s| !s.is_empty())
    };
    REQUIRED_KEYS.iter().all(|key| non_empty(key))
        && entry.get("validations").is_some_and(Value::is_array)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
