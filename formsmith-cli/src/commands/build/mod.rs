//! Build command implementation
//!
//! Drives a [`Builder`] from a terminal menu.

use std::fs;
use std::path::Path;
use std::time::Instant;

use colored::*;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use formsmith_fields::{FieldType, FieldsError};
use formsmith_form::{
    palette::{self, LOAD_FROM_JSON, NO_FIELDS_MESSAGE},
    Builder, FormError, ImportIndicator,
};
use tracing::info;

use crate::commands::require_terminal;
use crate::context::CliContext;
use crate::error::{CliError, CliResult};
use crate::exit_codes::{EXIT_ERROR, EXIT_SUCCESS, EXIT_WARNING};
use crate::preview::render_view;
use crate::prompts::FormPrompter;

/// Help text for the build command
pub const DESCRIPTION: &str = include_str!("description.md");

/// One entry of the builder menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Add(FieldType),
    LoadJson,
    Preview,
    Fill,
    Finish,
}

impl MenuAction {
    /// Menu entries in display order: the palette first.
    pub fn all() -> Vec<MenuAction> {
        let mut actions: Vec<_> = palette::palette()
            .into_iter()
            .map(|entry| MenuAction::Add(entry.field_type))
            .collect();
        actions.extend([
            MenuAction::LoadJson,
            MenuAction::Preview,
            MenuAction::Fill,
            MenuAction::Finish,
        ]);
        actions
    }

    pub fn label(&self) -> String {
        match self {
            MenuAction::Add(field_type) => format!("Add {} field", field_type.display_name()),
            MenuAction::LoadJson => LOAD_FROM_JSON.to_string(),
            MenuAction::Preview => "Preview form".to_string(),
            MenuAction::Fill => "Fill form".to_string(),
            MenuAction::Finish => "Finish".to_string(),
        }
    }
}

pub fn handle_command(from: Option<&Path>, context: &CliContext) -> CliResult<i32> {
    let mut builder = Builder::new(context.settings.clone());

    if let Some(path) = from {
        let text = fs::read_to_string(path).map_err(|e| CliError::read_file(path, e))?;
        let now = Instant::now();
        if !builder.import_json(text, now) {
            return Err(import_failure(&builder, now));
        }
    }

    require_terminal(context, "build")?;
    run_menu(&mut builder, context)?;
    info!(fields = builder.fields().len(), "builder session finished");
    Ok(EXIT_SUCCESS)
}

/// Turn a failed `--from` import into an error: no surviving fields is a
/// warning, anything else an error.
fn import_failure(builder: &Builder, now: Instant) -> CliError {
    let message = builder
        .importer()
        .indicator(now)
        .map(|indicator| indicator.message().to_string())
        .unwrap_or_default();
    let code = if message == NO_FIELDS_MESSAGE {
        EXIT_WARNING
    } else {
        EXIT_ERROR
    };
    CliError::new(message, code)
}

fn run_menu(builder: &mut Builder, context: &CliContext) -> CliResult<()> {
    let theme = ColorfulTheme::default();
    let prompter = FormPrompter::new();
    let actions = MenuAction::all();
    let labels: Vec<String> = actions.iter().map(MenuAction::label).collect();

    loop {
        builder.tick(Instant::now());
        let picked = Select::with_theme(&theme)
            .with_prompt(format!("Form builder ({} fields)", builder.fields().len()))
            .items(&labels)
            .default(0)
            .interact()?;

        match actions[picked] {
            MenuAction::Add(field_type) => add_field(builder, field_type, &prompter, &theme)?,
            MenuAction::LoadJson => load_json(builder, &theme)?,
            MenuAction::Preview => eprint!("{}", render_view(&builder.view())),
            MenuAction::Fill => {
                if builder.session().is_empty() {
                    eprint!("{}", render_view(&builder.view()));
                    continue;
                }
                let submission = prompter.fill(builder.session_mut())?;
                if !context.quiet {
                    eprint!("{}", render_view(&builder.view()));
                }
                println!("{}", serde_json::to_string_pretty(&submission.to_json())?);
                builder.session_mut().reset();
            }
            MenuAction::Finish => return Ok(()),
        }
    }
}

fn add_field(
    builder: &mut Builder,
    field_type: FieldType,
    prompter: &FormPrompter,
    theme: &ColorfulTheme,
) -> CliResult<()> {
    prompter.edit_field(builder.add_field(field_type))?;
    loop {
        let problem = match builder.save_field() {
            Ok(Some(field)) => {
                eprintln!("{} Added field '{}'", "✓".green(), field.id);
                return Ok(());
            }
            Ok(None) => "A label is required".to_string(),
            Err(FormError::Fields(e @ FieldsError::DuplicateFieldId { .. })) => e.to_string(),
            Err(e) => return Err(e.into()),
        };

        eprintln!("  {}", problem.red());
        let retry = Confirm::with_theme(theme)
            .with_prompt("Change the label?")
            .default(true)
            .interact()?;
        if !retry {
            builder.cancel_edit()?;
            return Ok(());
        }
        if let Some(editor) = builder.editor_mut() {
            prompter.edit_field(editor)?;
        }
    }
}

fn load_json(builder: &mut Builder, theme: &ColorfulTheme) -> CliResult<()> {
    builder.importer_mut().open_dialog();
    let path: String = Input::with_theme(theme)
        .with_prompt("Path to JSON field definitions")
        .allow_empty(true)
        .interact_text()?;

    let text = if path.trim().is_empty() {
        String::new()
    } else {
        match fs::read_to_string(path.trim()) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("  {}", format!("Failed to read {path}: {e}").red());
                builder.importer_mut().close_dialog();
                return Ok(());
            }
        }
    };

    let now = Instant::now();
    builder.import_json(text, now);
    match builder.importer().indicator(now) {
        Some(ImportIndicator::Success(message)) => eprintln!("{} {}", "✓".green(), message.green()),
        Some(ImportIndicator::Error(message)) => {
            eprintln!("  {}", message.red());
            builder.importer_mut().close_dialog();
        }
        None => {}
    }
    Ok(())
}
