//! Formsmith command-line interface
//!
//! The binary in `main.rs` parses arguments and hands off to [`run`]; the
//! modules are public so commands can be tested without a process.

pub mod cli;
pub mod commands;
pub mod context;
pub mod error;
pub mod exit_codes;
pub mod logging;
pub mod preview;
pub mod prompts;
pub mod table;

use formsmith_config::ConfigProvider;
use formsmith_form::BuilderSettings;

use cli::{Cli, Commands};
use context::CliContext;
use error::{handle_cli_result, CliResult};

/// Load configuration, falling back to defaults when it can't be read.
///
/// A broken configuration file shouldn't stop commands that can run
/// without it.
pub fn load_cli_configuration(cli: &Cli) -> BuilderSettings {
    let provider = match &cli.config {
        Some(path) => ConfigProvider::new().with_file(path),
        None => ConfigProvider::new(),
    };
    match provider.load() {
        Ok(settings) => {
            tracing::debug!("Loaded configuration");
            settings
        }
        Err(e) => {
            tracing::warn!("Failed to load configuration: {}", e);
            if !cli.quiet {
                eprintln!("Warning: Configuration loading failed: {}", e);
                eprintln!("Continuing with default configuration...");
            }
            BuilderSettings::default()
        }
    }
}

/// Run a parsed command line and return the process exit code.
pub fn run(cli: Cli) -> i32 {
    let settings = load_cli_configuration(&cli);
    let context = CliContext::new(settings, cli.verbose, cli.quiet);
    handle_cli_result(dispatch(&cli.command, &context))
}

fn dispatch(command: &Commands, context: &CliContext) -> CliResult<i32> {
    match command {
        Commands::Build { from } => {
            commands::build::handle_command(from.as_deref(), context)
        }
        Commands::Fill { file } => commands::fill::handle_command(file, context),
        Commands::Check { file, format } => commands::check::handle_command(file, *format, context),
        Commands::Validate {
            file,
            values,
            format,
        } => commands::validate::handle_command(file, values, *format, context),
    }
}
