use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "formsmith")]
#[command(version)]
#[command(about = "Build, preview, fill and validate forms from JSON field definitions")]
#[command(long_about = "
formsmith builds forms out of field definitions: a JSON array of fields, each
with an id, label, type, validation type and a list of validation rules.

Global arguments can be used with any command:
  --verbose     Show informational logging
  --debug       Enable debug logging
  --quiet       Suppress all output except errors
  --config      Read settings from this file on top of the discovered ones

Example usage:
  formsmith build                          # Build a form interactively
  formsmith build --from form.json         # Start from an existing definition
  formsmith fill form.json                 # Fill a form, print the submission
  formsmith check form.json                # Report which fields survive import
  formsmith validate form.json --values v.json
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Additional configuration file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a form interactively, previewing and filling it as you go
    #[command(long_about = crate::commands::build::DESCRIPTION)]
    Build {
        /// Start from the fields in this JSON file
        #[arg(long, value_name = "FILE")]
        from: Option<PathBuf>,
    },
    /// Fill a form interactively and print the submission as JSON
    #[command(long_about = crate::commands::fill::DESCRIPTION)]
    Fill {
        /// Field definitions (JSON array)
        file: PathBuf,
    },
    /// Import field definitions and report what survives
    #[command(long_about = crate::commands::check::DESCRIPTION)]
    Check {
        /// Field definitions (JSON array)
        file: PathBuf,

        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Validate a JSON object of values against a form
    #[command(long_about = crate::commands::validate::DESCRIPTION)]
    Validate {
        /// Field definitions (JSON array)
        file: PathBuf,

        /// Values to validate (JSON object keyed by field id)
        #[arg(long, value_name = "FILE")]
        values: PathBuf,

        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
}
