//! Interactive prompts
//!
//! Each field type gets the dialoguer control closest to its form control.
//! Values go through the form session, so a field is re-asked until the
//! session reports it valid. Prompts draw on stderr; stdout is left for
//! results.

use std::path::Path;

use colored::*;
use dialoguer::{theme::ColorfulTheme, FuzzySelect, Input, MultiSelect, Select};
use formsmith_fields::{FieldDescriptor, FieldEditor, FieldType, FormValue};
use formsmith_form::{render::SELECT_PLACEHOLDER, FormSession, SubmitOutcome, Submission};
use tracing::debug;

use crate::error::{CliError, CliResult};
use crate::exit_codes::EXIT_ERROR;

pub struct FormPrompter {
    theme: ColorfulTheme,
}

impl Default for FormPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl FormPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }

    /// Ask for every field, then submit. Repeats for any field the submit
    /// rejects.
    pub fn fill(&self, session: &mut FormSession) -> CliResult<Submission> {
        let mut pending: Vec<String> = session.fields().iter().map(|f| f.id.clone()).collect();
        loop {
            for id in &pending {
                self.prompt_field(session, id)?;
            }
            match session.submit() {
                SubmitOutcome::Submitted(submission) => return Ok(submission),
                SubmitOutcome::Rejected(result) => {
                    pending = result.errors().map(|(id, _)| id.to_string()).collect();
                    debug!(count = pending.len(), "submit rejected, asking again");
                }
            }
        }
    }

    /// Ask for one field until its value validates.
    pub fn prompt_field(&self, session: &mut FormSession, id: &str) -> CliResult<()> {
        let field = session.field(id)?.clone();
        loop {
            let current = session
                .value(id)
                .cloned()
                .unwrap_or_else(|| field.initial_value());
            let value = self.read_value(&field, &current)?;
            session.change(id, value)?;
            match session.blur(id)?.visible_error() {
                Some(message) => eprintln!("  {}", message.red()),
                None => return Ok(()),
            }
        }
    }

    fn read_value(&self, field: &FieldDescriptor, current: &FormValue) -> CliResult<FormValue> {
        let prompt = field_prompt(field);
        let current_text = current.as_text().unwrap_or_default();
        let options = field.options();
        if field.type_.is_choice() && options.is_empty() {
            return Err(CliError::new(
                format!("Field '{}' has no options to choose from", field.id),
                EXIT_ERROR,
            ));
        }

        let value = match field.type_ {
            FieldType::Text | FieldType::Textarea => {
                let text: String = Input::with_theme(&self.theme)
                    .with_prompt(prompt)
                    .with_initial_text(current_text)
                    .allow_empty(true)
                    .interact_text()?;
                FormValue::Text(text)
            }
            FieldType::Select => {
                let mut items = vec![SELECT_PLACEHOLDER.to_string()];
                items.extend(options.iter().cloned());
                let default = options
                    .iter()
                    .position(|o| o == current_text)
                    .map_or(0, |i| i + 1);
                let picked = FuzzySelect::with_theme(&self.theme)
                    .with_prompt(prompt)
                    .items(&items)
                    .default(default)
                    .interact()?;
                match picked {
                    0 => FormValue::empty(),
                    i => FormValue::text(&items[i]),
                }
            }
            FieldType::Radio => {
                let default = options.iter().position(|o| o == current_text).unwrap_or(0);
                let picked = Select::with_theme(&self.theme)
                    .with_prompt(prompt)
                    .items(options)
                    .default(default)
                    .interact()?;
                FormValue::text(&options[picked])
            }
            FieldType::Checkbox => {
                let checked: Vec<bool> = options
                    .iter()
                    .map(|o| matches!(current, FormValue::List(items) if items.contains(o)))
                    .collect();
                let picked = MultiSelect::with_theme(&self.theme)
                    .with_prompt(prompt)
                    .items(options)
                    .defaults(&checked)
                    .interact()?;
                FormValue::List(picked.into_iter().map(|i| options[i].clone()).collect())
            }
            FieldType::Upload => loop {
                let path: String = Input::with_theme(&self.theme)
                    .with_prompt(format!("{prompt} (path to file)"))
                    .allow_empty(true)
                    .interact_text()?;
                match upload_name(&path) {
                    Some(name) => break FormValue::Text(name),
                    None => eprintln!("  {}", format!("No such file: {path}").red()),
                }
            },
        };
        Ok(value)
    }

    /// Collect the label, placeholder and options for a new field.
    pub fn edit_field(&self, editor: &mut FieldEditor) -> CliResult<()> {
        let label: String = Input::with_theme(&self.theme)
            .with_prompt(format!("{} field label", editor.field_type().display_name()))
            .with_initial_text(editor.label())
            .allow_empty(true)
            .interact_text()?;
        editor.set_label(label);

        if editor.wants_placeholder() {
            let placeholder: String = Input::with_theme(&self.theme)
                .with_prompt("Placeholder")
                .allow_empty(true)
                .interact_text()?;
            editor.set_placeholder(placeholder);
        }

        if editor.wants_options() {
            let mut lines = Vec::new();
            loop {
                let option: String = Input::with_theme(&self.theme)
                    .with_prompt(format!("Option {} (empty to finish)", lines.len() + 1))
                    .allow_empty(true)
                    .interact_text()?;
                if option.trim().is_empty() {
                    break;
                }
                lines.push(option);
            }
            editor.set_options(lines.join("\n"));
        }
        Ok(())
    }
}

/// Prompt text: label, required marker and placeholder hint.
pub fn field_prompt(field: &FieldDescriptor) -> String {
    let mut prompt = field.label.clone();
    if field.is_required() {
        prompt.push_str(" *");
    }
    if !field.placeholder().is_empty() {
        prompt.push_str(&format!(" ({})", field.placeholder()));
    }
    prompt
}

/// File name recorded for an upload path; empty input means no file.
fn upload_name(path: &str) -> Option<String> {
    let path = path.trim();
    if path.is_empty() {
        return Some(String::new());
    }
    let path = Path::new(path);
    if !path.is_file() {
        return None;
    }
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use formsmith_fields::{Rule, ValidationType};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_field_prompt() {
        let field = FieldDescriptor {
            id: "email".into(),
            label: "Email".into(),
            placeholder: Some("you@example.com".into()),
            type_: FieldType::Text,
            validation_type: ValidationType::String,
            value: None,
            options: None,
            validations: vec![Rule::required("email is required")],
        };
        assert_eq!(field_prompt(&field), "Email * (you@example.com)");
    }

    #[test]
    fn test_upload_name() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("cv.pdf");
        fs::write(&file, "pdf").unwrap();

        assert_eq!(upload_name(""), Some(String::new()));
        assert_eq!(
            upload_name(&file.display().to_string()),
            Some("cv.pdf".to_string())
        );
        assert_eq!(
            upload_name(&dir.path().join("missing.pdf").display().to_string()),
            None
        );
    }
}
