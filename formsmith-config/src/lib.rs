//! Formsmith configuration using Figment
//!
//! Settings for the builder come from, in increasing precedence:
//!
//! - built-in defaults
//! - `~/.formsmith/formsmith.{toml,yaml,yml,json}`
//! - `./.formsmith/formsmith.{toml,yaml,yml,json}`
//! - environment variables prefixed `FORMSMITH_`, with `__` between nested
//!   keys (`FORMSMITH_IMPORT__SUCCESS_DISMISS_MS=800`)
//!
//! ```no_run
//! use formsmith_config::load_configuration;
//!
//! let settings = load_configuration()?;
//! println!("{:?}", settings.editor.numeric_keywords);
//! # Ok::<(), formsmith_config::ConfigError>(())
//! ```
//!
//! ## Example TOML Configuration
//!
//! ```toml
//! [editor]
//! numeric_keywords = ["phone", "age", "weight"]
//! email_message = "That doesn't look like an email address"
//!
//! [validation]
//! upload_required_message = "Please attach a file"
//! number_type_message = "{label} needs to be a number"
//!
//! [import]
//! success_dismiss_ms = 800
//!
//! [fields]
//! collision_policy = "overwrite"
//! ```

pub mod discovery;
pub mod error;
pub mod provider;

pub use discovery::{ConfigFile, ConfigFormat, ConfigScope, FileDiscovery};
pub use error::ConfigError;
pub use formsmith_form::BuilderSettings;
pub use provider::{ConfigProvider, ENV_PREFIX, ENV_SEPARATOR};

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Load builder settings from the standard sources.
pub fn load_configuration() -> ConfigResult<BuilderSettings> {
    ConfigProvider::new().load()
}
