//! Error handling for the Formsmith CLI
//!
//! Library errors are converted into a [`CliError`] that keeps the source
//! chain and carries the exit code the process should end with.

use std::error::Error;
use std::fmt;
use std::path::Path;

use formsmith_config::ConfigError;
use formsmith_fields::FieldsError;
use formsmith_form::FormError;

use crate::exit_codes::{EXIT_ERROR, EXIT_SUCCESS};

/// CLI-specific result type that preserves error information
pub type CliResult<T> = Result<T, CliError>;

/// CLI error with a message, the exit code to use and the underlying cause
#[derive(Debug)]
pub struct CliError {
    pub message: String,
    pub exit_code: i32,
    pub source: Option<Box<dyn Error + Send + Sync>>,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: i32) -> Self {
        Self {
            message: message.into(),
            exit_code,
            source: None,
        }
    }

    /// Wrap `source` with a message and exit code.
    pub fn with_source(
        message: impl Into<String>,
        exit_code: i32,
        source: impl Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            exit_code,
            source: Some(Box::new(source)),
        }
    }

    /// Error for a file that couldn't be read.
    pub fn read_file(path: &Path, source: std::io::Error) -> Self {
        Self::with_source(
            format!("Failed to read {}", path.display()),
            EXIT_ERROR,
            source,
        )
    }

    /// The message followed by every cause in the chain
    pub fn full_chain(&self) -> String {
        let mut result = self.message.clone();

        let mut current_source = self.source();
        while let Some(err) = current_source {
            result.push_str(&format!("\n  Caused by: {err}"));
            current_source = err.source();
        }

        result
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

impl From<FieldsError> for CliError {
    fn from(error: FieldsError) -> Self {
        let message = if error.is_parse_error() {
            "Invalid JSON format".to_string()
        } else {
            error.to_string()
        };
        Self::with_source(message, EXIT_ERROR, error)
    }
}

impl From<FormError> for CliError {
    fn from(error: FormError) -> Self {
        Self::with_source(error.to_string(), EXIT_ERROR, error)
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        Self::with_source("Configuration error", EXIT_ERROR, error)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(error: serde_json::Error) -> Self {
        Self::with_source("JSON error", EXIT_ERROR, error)
    }
}

impl From<dialoguer::Error> for CliError {
    fn from(error: dialoguer::Error) -> Self {
        Self::with_source("Failed to read input", EXIT_ERROR, error)
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        Self::with_source("I/O error", EXIT_ERROR, error)
    }
}

/// Convert a CliResult to an exit code, reporting the full error chain
pub fn handle_cli_result(result: CliResult<i32>) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            tracing::debug!("Error: {}", e.full_chain());
            eprintln!("Error: {}", e.full_chain());
            if e.exit_code == EXIT_SUCCESS {
                EXIT_ERROR
            } else {
                e.exit_code
            }
        }
    }
}
