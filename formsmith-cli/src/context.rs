//! CLI Context
//!
//! Settings and global flags shared by every command.

use std::io;

use formsmith_form::BuilderSettings;
use is_terminal::IsTerminal;

pub struct CliContext {
    /// Loaded configuration, or defaults when loading failed
    pub settings: BuilderSettings,

    /// Enable verbose output
    pub verbose: bool,

    /// Suppress output except errors
    pub quiet: bool,
}

impl CliContext {
    pub fn new(settings: BuilderSettings, verbose: bool, quiet: bool) -> Self {
        Self {
            settings,
            verbose,
            quiet,
        }
    }

    /// Whether prompts can be shown: both stdin and stderr must be terminals.
    pub fn is_interactive(&self) -> bool {
        io::stdin().is_terminal() && io::stderr().is_terminal()
    }
}
