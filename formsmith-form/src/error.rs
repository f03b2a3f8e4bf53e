//! Error types for form sessions and the builder

use formsmith_fields::{FieldType, FieldsError};
use thiserror::Error;

/// Result type for form operations
pub type Result<T> = std::result::Result<T, FormError>;

/// Errors raised by form and builder operations
#[derive(Debug, Error)]
pub enum FormError {
    /// No field with this id in the form
    #[error("field not found: {id}")]
    UnknownField { id: String },

    /// Options can only be toggled on checkbox fields
    #[error("field '{id}' is a {field_type} field, not a checkbox")]
    NotACheckbox { id: String, field_type: FieldType },

    /// Toggled option isn't one the field offers
    #[error("'{option}' is not an option of field '{id}'")]
    UnknownOption { id: String, option: String },

    /// Save or cancel called while no field is being edited
    #[error("no field is being edited")]
    NotEditing,

    /// Error from the field layer
    #[error(transparent)]
    Fields(#[from] FieldsError),
}
