//! Fill command implementation

use std::path::Path;

use colored::*;
use formsmith_form::{palette::NO_FIELDS_MESSAGE, render, FormSession};

use crate::commands::{load_form, require_terminal};
use crate::context::CliContext;
use crate::error::CliResult;
use crate::exit_codes::{EXIT_SUCCESS, EXIT_WARNING};
use crate::preview::render_view;
use crate::prompts::FormPrompter;

/// Help text for the fill command
pub const DESCRIPTION: &str = include_str!("description.md");

pub fn handle_command(file: &Path, context: &CliContext) -> CliResult<i32> {
    let form = load_form(file, context)?;
    if form.fields.is_empty() {
        eprintln!("{}", NO_FIELDS_MESSAGE.red());
        return Ok(EXIT_WARNING);
    }
    require_terminal(context, "fill")?;

    let mut session = FormSession::from_list(&form.fields, &context.settings.validation);
    let submission = FormPrompter::new().fill(&mut session)?;

    if !context.quiet {
        eprint!("{}", render_view(&render(&session)));
    }
    println!("{}", serde_json::to_string_pretty(&submission.to_json())?);
    Ok(EXIT_SUCCESS)
}
