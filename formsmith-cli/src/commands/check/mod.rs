//! Check command implementation
//!
//! Imports a definition file and reports kept fields with their validation.

use std::path::Path;

use colored::*;
use comfy_table::{Cell, Color};
use formsmith_fields::Schema;
use serde_json::json;

use crate::cli::OutputFormat;
use crate::commands::{load_form, ImportedForm};
use crate::context::CliContext;
use crate::error::CliResult;
use crate::exit_codes::{EXIT_SUCCESS, EXIT_WARNING};
use crate::table::new_table;

/// Help text for the check command
pub const DESCRIPTION: &str = include_str!("description.md");

pub fn handle_command(file: &Path, format: OutputFormat, context: &CliContext) -> CliResult<i32> {
    let form = load_form(file, context)?;
    let schema = Schema::build_with(&form.fields, &context.settings.validation);

    if !context.quiet {
        match format {
            OutputFormat::Table => print_table(&form, &schema),
            OutputFormat::Json => println!(
                "{}",
                serde_json::to_string_pretty(&report_json(&form, &schema))?
            ),
        }
    }

    Ok(if form.fields.is_empty() {
        EXIT_WARNING
    } else {
        EXIT_SUCCESS
    })
}

fn print_table(form: &ImportedForm, schema: &Schema) {
    if form.fields.is_empty() {
        println!("{}", "No valid fields found in JSON".red());
        return;
    }

    let mut table = new_table();
    table.set_header(vec!["Id", "Label", "Type", "Required", "Validation"]);
    for field in &form.fields {
        let required = if field.is_required() {
            Cell::new("✓").fg(Color::Green)
        } else {
            Cell::new("")
        };
        table.add_row(vec![
            Cell::new(&field.id),
            Cell::new(&field.label),
            Cell::new(field.type_.as_str()),
            required,
            Cell::new(validation_summary(schema, &field.id)),
        ]);
    }
    println!("{table}");

    let summary = format!("{} of {} entries kept", form.fields.len(), form.entries);
    if form.dropped() > 0 {
        println!("{} ({} dropped)", summary, form.dropped().to_string().yellow());
    } else {
        println!("{}", summary.green());
    }
}

fn report_json(form: &ImportedForm, schema: &Schema) -> serde_json::Value {
    let fields: Vec<_> = form
        .fields
        .iter()
        .map(|field| {
            json!({
                "id": field.id,
                "label": field.label,
                "type": field.type_,
                "validationType": field.validation_type,
                "required": field.is_required(),
                "validation": validation_summary(schema, &field.id),
            })
        })
        .collect();
    json!({
        "entries": form.entries,
        "parsed": form.parsed,
        "kept": form.fields.len(),
        "fields": fields,
    })
}

fn validation_summary(schema: &Schema, id: &str) -> String {
    schema
        .validator(id)
        .map(|validator| validator.summary())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use formsmith_fields::{parse_fields_from_json, FieldList};

    #[test]
    fn test_report_json() {
        let parsed = parse_fields_from_json(
            r#"[{"id":"age","label":"Age","type":"text","validationType":"number",
                 "validations":[{"type":"required","params":["age is required"]},{"type":"min","params":[0,"positive"]}]}]"#,
        )
        .unwrap();
        let form = ImportedForm {
            entries: 2,
            parsed: 1,
            fields: FieldList::from_import(parsed, Default::default()),
        };
        let schema = Schema::build(&form.fields);
        let report = report_json(&form, &schema);
        assert_eq!(report["entries"], 2);
        assert_eq!(report["kept"], 1);
        assert_eq!(report["fields"][0]["type"], "text");
        assert_eq!(report["fields"][0]["required"], true);
        assert_eq!(report["fields"][0]["validation"], "number: required, >= 0");
    }
}
