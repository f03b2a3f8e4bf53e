//! Command modules for the formsmith CLI
//!
//! Each command lives in its own module with its help text in a
//! `description.md` next to it.

use std::fs;
use std::path::Path;

use formsmith_fields::{parse_import, FieldList};
use tracing::debug;

use crate::context::CliContext;
use crate::error::{CliError, CliResult};
use crate::exit_codes::EXIT_ERROR;

pub mod build;
pub mod check;
pub mod fill;
pub mod validate;

/// A form definition file after import.
#[derive(Debug)]
pub struct ImportedForm {
    /// Entries in the JSON array
    pub entries: usize,
    /// Entries that carried every required key
    pub parsed: usize,
    /// Fields kept after duplicate and option checks
    pub fields: FieldList,
}

impl ImportedForm {
    pub fn dropped(&self) -> usize {
        self.entries - self.fields.len()
    }
}

/// Read and import a field definition file.
pub fn load_form(path: &Path, context: &CliContext) -> CliResult<ImportedForm> {
    let text = fs::read_to_string(path).map_err(|e| CliError::read_file(path, e))?;
    let import = parse_import(&text)?;
    let entries = import.entries;
    let parsed_count = import.fields.len();
    let fields = FieldList::from_import(import.fields, context.settings.fields.collision_policy);
    debug!(
        path = %path.display(),
        entries,
        parsed = parsed_count,
        kept = fields.len(),
        "form loaded"
    );
    Ok(ImportedForm {
        entries,
        parsed: parsed_count,
        fields,
    })
}

/// Fail unless prompts can be shown.
pub fn require_terminal(context: &CliContext, command: &str) -> CliResult<()> {
    if context.is_interactive() {
        Ok(())
    } else {
        Err(CliError::new(
            format!("'{command}' needs an interactive terminal"),
            EXIT_ERROR,
        ))
    }
}
