//! Error types for field descriptors and schemas

use thiserror::Error;

/// Result type for fields operations
pub type Result<T> = std::result::Result<T, FieldsError>;

/// Errors that can occur while importing descriptors or validating values
#[derive(Debug, Error)]
pub enum FieldsError {
    /// Import text is not syntactically valid JSON
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Import text is valid JSON but not an array of field definitions
    #[error("expected a JSON array of field definitions, got {found}")]
    NotAnArray { found: String },

    /// No validator or descriptor registered under this id
    #[error("field not found: {id}")]
    FieldNotFound { id: String },

    /// A descriptor with this id is already in the field list
    #[error("duplicate field id: {id}")]
    DuplicateFieldId { id: String },
}

impl FieldsError {
    /// True for errors raised while reading import text.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse(_) | Self::NotAnArray { .. })
    }
}
