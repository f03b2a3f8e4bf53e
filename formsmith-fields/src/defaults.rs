//! Default rules for newly created fields.

use crate::rules::Rule;
use crate::types::FieldType;

/// Rules every new field of `field_type` starts with.
///
/// Always a `required` rule; text fields add a 2..=50 character length window
/// and textareas a 10 character minimum. Semantic rules (email, numeric
/// minimum) are the caller's business.
pub fn default_rules_for_type(field_type: FieldType, id: &str) -> Vec<Rule> {
    let mut rules = vec![Rule::required(format!("{id} is required"))];

    match field_type {
        FieldType::Text => {
            rules.push(Rule::min(2.0, format!("{id} must be at least 2 characters")));
            rules.push(Rule::max(50.0, format!("{id} cannot exceed 50 characters")));
        }
        FieldType::Textarea => {
            rules.push(Rule::min(
                10.0,
                format!("{id} must be at least 10 characters"),
            ));
        }
        FieldType::Select | FieldType::Radio | FieldType::Checkbox | FieldType::Upload => {}
    }

    rules
}
