//! Configuration provider using Figment

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use formsmith_form::BuilderSettings;
use tracing::{debug, trace};

use crate::{
    discovery::{ConfigFile, ConfigFormat, ConfigScope, FileDiscovery},
    error::ConfigError,
    ConfigResult,
};

/// Prefix of environment variables read as configuration.
pub const ENV_PREFIX: &str = "FORMSMITH_";

/// Separator between nested keys in environment variable names.
pub const ENV_SEPARATOR: &str = "__";

/// Loads [`BuilderSettings`] from every configuration source.
///
/// Sources are merged in precedence order, later ones overriding earlier:
/// 1. Built-in defaults
/// 2. Discovered files, global then project
/// 3. Files passed with [`with_file`](Self::with_file)
/// 4. `FORMSMITH_*` environment variables
///
/// Nothing is cached; each load reads the sources again.
#[derive(Debug, Clone, Default)]
pub struct ConfigProvider {
    discovery: FileDiscovery,
    extra_files: Vec<PathBuf>,
}

impl ConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_discovery(discovery: FileDiscovery) -> Self {
        Self {
            discovery,
            extra_files: Vec::new(),
        }
    }

    /// Layer an explicit file above the discovered ones.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.extra_files.push(path.into());
        self
    }

    /// Load and check settings from all sources.
    pub fn load(&self) -> ConfigResult<BuilderSettings> {
        let settings: BuilderSettings = self.build_figment()?.extract()?;
        validate(&settings)?;
        debug!(
            numeric_keywords = settings.editor.numeric_keywords.len(),
            collision_policy = ?settings.fields.collision_policy,
            "configuration loaded"
        );
        Ok(settings)
    }

    fn build_figment(&self) -> ConfigResult<Figment> {
        let mut figment = Figment::from(Serialized::defaults(BuilderSettings::default()));

        for file in self.discovery.discover_all() {
            trace!("Loading config file: {} ({:?})", file.path.display(), file.format);
            figment = figment.merge(load_config_file(&file));
        }

        for path in &self.extra_files {
            if !path.is_file() {
                return Err(ConfigError::FileNotFound { path: path.clone() });
            }
            let format = ConfigFormat::from_path(path).ok_or_else(|| {
                ConfigError::UnsupportedFormat {
                    format: path
                        .extension()
                        .map(|ext| ext.to_string_lossy().into_owned())
                        .unwrap_or_default(),
                }
            })?;
            trace!("Loading explicit config file: {}", path.display());
            figment = figment.merge(load_config_file(&ConfigFile::new(
                path.clone(),
                format,
                ConfigScope::Project,
            )));
        }

        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split(ENV_SEPARATOR)))
    }
}

fn load_config_file(config_file: &ConfigFile) -> Figment {
    let path = &config_file.path;
    match config_file.format {
        ConfigFormat::Toml => Figment::from(Toml::file(path)),
        ConfigFormat::Yaml => Figment::from(Yaml::file(path)),
        ConfigFormat::Json => Figment::from(Json::file(path)),
    }
}

/// Reject values that deserialize fine but would misbehave.
fn validate(settings: &BuilderSettings) -> ConfigResult<()> {
    // An empty keyword is a substring of every id.
    if settings
        .editor
        .numeric_keywords
        .iter()
        .any(|keyword| keyword.trim().is_empty())
    {
        return Err(ConfigError::InvalidValue {
            key: "editor.numeric_keywords".to_string(),
            message: "keywords must not be empty".to_string(),
        });
    }
    if settings.validation.number_type_message.is_empty() {
        return Err(ConfigError::InvalidValue {
            key: "validation.number_type_message".to_string(),
            message: "message must not be empty".to_string(),
        });
    }
    Ok(())
}
