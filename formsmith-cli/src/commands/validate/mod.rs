//! Validate command implementation
//!
//! Validates a JSON object of values against an imported form.

use std::fs;
use std::path::Path;

use colored::*;
use comfy_table::{Cell, Color};
use formsmith_fields::{FieldList, FormValue, Schema, ValidationResult};
use indexmap::IndexMap;
use serde_json::{json, Value};
use tracing::warn;

use crate::cli::OutputFormat;
use crate::commands::load_form;
use crate::context::CliContext;
use crate::error::{CliError, CliResult};
use crate::exit_codes::{EXIT_ERROR, EXIT_SUCCESS, EXIT_WARNING};
use crate::table::new_table;

/// Help text for the validate command
pub const DESCRIPTION: &str = include_str!("description.md");

pub fn handle_command(
    file: &Path,
    values_file: &Path,
    format: OutputFormat,
    context: &CliContext,
) -> CliResult<i32> {
    let form = load_form(file, context)?;
    let text = fs::read_to_string(values_file).map_err(|e| CliError::read_file(values_file, e))?;
    let values = parse_values(&text, &form.fields)?;

    let schema = Schema::build_with(&form.fields, &context.settings.validation);
    let result = schema.validate(&values);

    if !context.quiet {
        match format {
            OutputFormat::Table => print_table(&result, context.verbose),
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&result_json(&result))?)
            }
        }
    }

    Ok(if result.is_valid() {
        EXIT_SUCCESS
    } else {
        EXIT_WARNING
    })
}

/// Read a values object, keeping only keys that name a field.
pub fn parse_values(text: &str, fields: &FieldList) -> CliResult<IndexMap<String, FormValue>> {
    let document: Value = serde_json::from_str(text)
        .map_err(|e| CliError::with_source("Values file is not valid JSON", EXIT_ERROR, e))?;
    let Value::Object(entries) = document else {
        return Err(CliError::new(
            "Values file must contain a JSON object keyed by field id",
            EXIT_ERROR,
        ));
    };

    let mut values = IndexMap::new();
    for (id, raw) in &entries {
        if !fields.contains(id) {
            warn!(%id, "ignoring value for unknown field");
            continue;
        }
        let value = FormValue::from_json(raw).ok_or_else(|| {
            CliError::new(
                format!("Value for '{id}' must be a string or a list of strings"),
                EXIT_ERROR,
            )
        })?;
        values.insert(id.clone(), value);
    }
    Ok(values)
}

fn print_table(result: &ValidationResult, verbose: bool) {
    let mut table = new_table();
    table.set_header(vec!["Status", "Field", "Message"]);
    for (id, outcome) in result.iter() {
        match outcome.message() {
            Some(message) => {
                table.add_row(vec![
                    Cell::new("✗").fg(Color::Red),
                    Cell::new(id),
                    Cell::new(message),
                ]);
            }
            None if verbose => {
                table.add_row(vec![
                    Cell::new("✓").fg(Color::Green),
                    Cell::new(id),
                    Cell::new(""),
                ]);
            }
            None => {}
        }
    }

    if result.is_valid() {
        if verbose {
            println!("{table}");
        }
        println!("{} All {} fields are valid", "✓".green(), result.len());
    } else {
        println!("{table}");
        println!(
            "{} {} of {} fields failed validation",
            "✗".red(),
            result.error_count(),
            result.len()
        );
    }
}

fn result_json(result: &ValidationResult) -> Value {
    let errors: serde_json::Map<String, Value> = result
        .errors()
        .map(|(id, message)| (id.to_string(), Value::from(message)))
        .collect();
    json!({
        "valid": result.is_valid(),
        "errors": errors,
    })
}
