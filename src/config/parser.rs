//! Configuration loading.
//!
//! Configuration comes from an optional YAML file, then environment
//! variables. Command-line flags are applied last by the binary.

use crate::error::{ConfigError, InspectorError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::spec::InspectorConfig;
use super::validator::ConfigValidator;

/// Default configuration file names to search for.
pub const DEFAULT_CONFIG_FILES: &[&str] = &[".tfinspect.yaml", ".tfinspect.yml", "tfinspect.yaml"];

/// Configuration parser for loading inspector configuration.
#[derive(Debug, Default)]
pub struct ConfigParser {
    /// Base path for resolving the `.env` file.
    base_path: Option<PathBuf>,
}

impl ConfigParser {
    /// Creates a new configuration parser.
    #[must_use]
    pub const fn new() -> Self {
        Self { base_path: None }
    }

    /// Sets the base path for resolving relative paths.
    #[must_use]
    pub fn with_base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<InspectorConfig> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());

        if !path.exists() {
            return Err(InspectorError::Config(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            }));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            InspectorError::Config(ConfigError::ParseError {
                message: format!("Failed to read file: {e}"),
                location: Some(path.display().to_string()),
            })
        })?;

        self.parse_yaml(&content, Some(path))
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn parse_yaml(&self, content: &str, source: Option<&Path>) -> Result<InspectorConfig> {
        debug!("Parsing YAML configuration");

        if content.trim().is_empty() {
            return Ok(InspectorConfig::default());
        }

        serde_yaml::from_str(content).map_err(|e| {
            let location = source.map(|p| p.display().to_string());
            InspectorError::Config(ConfigError::ParseError {
                message: format!("YAML parse error: {e}"),
                location,
            })
        })
    }

    /// Loads configuration, applying environment overrides and validating.
    ///
    /// An explicit path must exist. Without one, the nearest discovered file
    /// is used, or defaults if there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or parsed, or if the result
    /// fails validation.
    pub fn load(&self, explicit: Option<&Path>) -> Result<InspectorConfig> {
        let start = match &self.base_path {
            Some(base) => base.clone(),
            None => std::env::current_dir()?,
        };
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => find_config_file(&start),
        };

        let mut config = match &path {
            Some(path) => {
                let parser = path
                    .parent()
                    .map_or_else(Self::new, |dir| Self::new().with_base_path(dir));
                parser.load_dotenv()?;
                parser.load_file(path)?
            }
            None => {
                debug!("No configuration file found, using defaults");
                self.load_dotenv()?;
                InspectorConfig::default()
            }
        };

        Self::apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
        ConfigValidator::new().validate(&config)?;
        Ok(config)
    }

    /// Applies environment variable overrides using `lookup` to read them.
    ///
    /// Recognized variables: `TFINSPECT_COLOR`, `TFINSPECT_SHOW_DIFF`,
    /// `TFINSPECT_MAX_ADDRESS_WIDTH`.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparseable value.
    pub fn apply_env_overrides<F>(config: &mut InspectorConfig, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("TFINSPECT_COLOR") {
            debug!("Overriding display.color from environment");
            config.display.color = parse_bool("TFINSPECT_COLOR", &value)?;
        }

        if let Some(value) = lookup("TFINSPECT_SHOW_DIFF") {
            debug!("Overriding display.show_diff from environment");
            config.display.show_diff = parse_bool("TFINSPECT_SHOW_DIFF", &value)?;
        }

        if let Some(value) = lookup("TFINSPECT_MAX_ADDRESS_WIDTH") {
            debug!("Overriding display.max_address_width from environment");
            config.display.max_address_width = value.trim().parse().map_err(|_| {
                ConfigError::validation(
                    format!("expected a number, got {value:?}"),
                    "TFINSPECT_MAX_ADDRESS_WIDTH",
                )
            })?;
        }

        Ok(())
    }

    /// Loads the .env file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the .env file exists but cannot be loaded.
    pub fn load_dotenv(&self) -> Result<()> {
        let env_path = self
            .base_path
            .as_ref()
            .map_or_else(|| PathBuf::from(".env"), |p| p.join(".env"));

        if env_path.exists() {
            info!("Loading environment from: {}", env_path.display());
            dotenvy::from_path(&env_path).map_err(|e| {
                InspectorError::Config(ConfigError::ParseError {
                    message: format!("Failed to load .env file: {e}"),
                    location: Some(env_path.display().to_string()),
                })
            })?;
        } else {
            debug!(".env file not found at: {}", env_path.display());
        }

        Ok(())
    }
}

/// Parses a boolean environment value.
fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::validation(format!("expected a boolean, got {value:?}"), name).into()),
    }
}

/// Finds the configuration file in `start_dir` or its parents, falling back
/// to `<config dir>/tfinspect/config.yaml`.
#[must_use]
pub fn find_config_file(start_dir: impl AsRef<Path>) -> Option<PathBuf> {
    let mut current = start_dir.as_ref().to_path_buf();

    loop {
        for filename in DEFAULT_CONFIG_FILES {
            let config_path = current.join(filename);
            if config_path.exists() {
                info!("Found configuration file: {}", config_path.display());
                return Some(config_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    dirs::config_dir()
        .map(|dir| dir.join("tfinspect").join("config.yaml"))
        .filter(|path| path.exists())
}
