//! Settings for a builder session.

use formsmith_fields::{CollisionPolicy, EditorSettings, ValidationSettings};
use serde::{Deserialize, Serialize};

use crate::palette::ImportSettings;

/// Field list behaviour.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldListSettings {
    /// How a new field with an existing id is handled
    pub collision_policy: CollisionPolicy,
}

/// Everything a [`Builder`](crate::Builder) can be tuned with.
///
/// Every section defaults independently, so a partial configuration file
/// only overrides what it names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderSettings {
    pub editor: EditorSettings,
    pub validation: ValidationSettings,
    pub import: ImportSettings,
    pub fields: FieldListSettings,
}
