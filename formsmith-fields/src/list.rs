//! Ordered field list keyed by field id.
//!
//! Ids must be unique within a form. The list enforces that on every insert
//! according to its [`CollisionPolicy`] instead of trusting callers.

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{FieldsError, Result};
use crate::logging::Pretty;
use crate::types::FieldDescriptor;

/// What happens when a descriptor arrives with an id already in the list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Keep the existing descriptor and refuse the new one.
    #[default]
    Reject,
    /// Replace the existing descriptor, keeping its position.
    Overwrite,
}

/// Field descriptors in form order, unique by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldList {
    fields: IndexMap<String, FieldDescriptor>,
    policy: CollisionPolicy,
}

impl FieldList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: CollisionPolicy) -> Self {
        Self {
            fields: IndexMap::new(),
            policy,
        }
    }

    /// Build a list from imported descriptors.
    ///
    /// Duplicate ids are resolved by `policy` (rejected ones are dropped), and
    /// choice fields arriving without options are dropped since they have
    /// nothing to render.
    pub fn from_import(fields: Vec<FieldDescriptor>, policy: CollisionPolicy) -> Self {
        let mut list = Self::with_policy(policy);
        for field in fields {
            if field.type_.is_choice() && field.options().is_empty() {
                warn!(id = %field.id, field_type = %field.type_, "dropping choice field without options");
                continue;
            }
            if let Err(e) = list.insert(field) {
                warn!(error = %e, "dropping imported field");
            }
        }
        debug!(fields = list.len(), "field list imported: {}", Pretty(list.to_vec()));
        list
    }

    pub fn policy(&self) -> CollisionPolicy {
        self.policy
    }

    /// Append a descriptor, honouring the collision policy.
    pub fn insert(&mut self, field: FieldDescriptor) -> Result<()> {
        match self.fields.entry(field.id.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(field);
                Ok(())
            }
            Entry::Occupied(mut slot) => match self.policy {
                CollisionPolicy::Reject => Err(FieldsError::DuplicateFieldId {
                    id: slot.key().clone(),
                }),
                CollisionPolicy::Overwrite => {
                    debug!(id = %slot.key(), "overwriting field");
                    slot.insert(field);
                    Ok(())
                }
            },
        }
    }

    pub fn get(&self, id: &str) -> Option<&FieldDescriptor> {
        self.fields.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.fields.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.values()
    }

    /// Clone the descriptors out in form order.
    pub fn to_vec(&self) -> Vec<FieldDescriptor> {
        self.fields.values().cloned().collect()
    }
}

impl<'a> IntoIterator for &'a FieldList {
    type Item = &'a FieldDescriptor;
    type IntoIter = indexmap::map::Values<'a, String, FieldDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FieldType, ValidationType};

    fn field(id: &str, label: &str, type_: FieldType) -> FieldDescriptor {
        FieldDescriptor {
            id: id.into(),
            label: label.into(),
            placeholder: None,
            type_,
            validation_type: ValidationType::String,
            value: None,
            options: None,
            validations: Vec::new(),
        }
    }

    #[test]
    fn reject_policy_refuses_duplicates() {
        let mut list = FieldList::new();
        list.insert(field("name", "Name", FieldType::Text)).unwrap();
        let err = list
            .insert(field("name", "Other", FieldType::Text))
            .unwrap_err();
        assert!(matches!(err, FieldsError::DuplicateFieldId { ref id } if id == "name"));
        assert_eq!(list.get("name").unwrap().label, "Name");
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn overwrite_policy_replaces_in_place() {
        let mut list = FieldList::with_policy(CollisionPolicy::Overwrite);
        list.insert(field("a", "A", FieldType::Text)).unwrap();
        list.insert(field("b", "B", FieldType::Text)).unwrap();
        list.insert(field("a", "A2", FieldType::Textarea)).unwrap();
        let labels: Vec<_> = list.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, vec!["A2", "B"]);
    }

    #[test]
    fn import_drops_duplicates_and_optionless_choices() {
        let mut with_options = field("size", "Size", FieldType::Select);
        with_options.options = Some(vec!["S".into(), "M".into()]);
        let list = FieldList::from_import(
            vec![
                field("name", "Name", FieldType::Text),
                field("name", "Name again", FieldType::Text),
                field("colour", "Colour", FieldType::Radio),
                with_options,
            ],
            CollisionPolicy::Reject,
        );
        let ids: Vec<_> = list.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["name", "size"]);
        assert_eq!(list.get("name").unwrap().label, "Name");
    }

    #[test]
    fn import_with_overwrite_keeps_last_duplicate() {
        let list = FieldList::from_import(
            vec![
                field("name", "First", FieldType::Text),
                field("name", "Second", FieldType::Text),
            ],
            CollisionPolicy::Overwrite,
        );
        assert_eq!(list.len(), 1);
        assert_eq!(list.get("name").unwrap().label, "Second");
    }

    #[test]
    fn policy_deserializes_lowercase() {
        let policy: CollisionPolicy = serde_json::from_str(r#""overwrite""#).unwrap();
        assert_eq!(policy, CollisionPolicy::Overwrite);
    }
}
