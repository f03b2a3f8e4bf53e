//! Field descriptors and validation schemas
//!
//! `formsmith-fields` is the data-contract half of Formsmith. It knows nothing
//! about prompts, terminals or form state. It owns the declarative description
//! of a form and the translation of that description into executable checks.
//!
//! # Architecture
//!
//! - **Descriptors**: a [`FieldDescriptor`] carries a field's type, base
//!   validation type, options and an ordered list of [`Rule`]s
//! - **Import**: [`parse_fields_from_json`] filters a pasted JSON array down to
//!   the entries carrying every required key
//! - **Schema**: [`Schema::build`] folds each field's rules into one validator
//!   per field id, evaluated independently of every other field
//! - **Editor**: [`FieldEditor`] turns a label/placeholder/options triple into a
//!   new descriptor with inferred defaults
//! - **Field list**: [`FieldList`] keeps descriptors keyed by id with an explicit
//!   [`CollisionPolicy`]

pub mod defaults;
pub mod editor;
pub mod error;
pub mod import;
pub mod list;
pub mod logging;
pub mod rules;
pub mod types;
pub mod validation;

pub use defaults::default_rules_for_type;
pub use editor::{derive_field_id, EditorSettings, FieldEditor};
pub use error::{FieldsError, Result};
pub use import::{parse_fields_from_json, parse_import, ParsedImport};
pub use list::{CollisionPolicy, FieldList};
pub use logging::Pretty;
pub use rules::Rule;
pub use types::{FieldDescriptor, FieldType, FormValue, ValidationType};
pub use validation::{FieldOutcome, FieldValidator, Schema, ValidationResult, ValidationSettings};
