//! Configuration management for tag-chips.
//!
//! This module handles loading the optional TOML config file and resolving
//! host-supplied control properties into the settings snapshot the editor
//! renders with.

mod properties;
mod settings;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub use properties::ControlProperties;
pub use settings::{
    BehaviorSettings, TagEditorSettings, DEFAULT_MAX_TAGS_TO_SHOW, DEFAULT_MAX_TAG_LENGTH,
    DEFAULT_TAG_COLOR,
};

/// Environment variable that overrides the default config file location.
pub const CONFIG_PATH_ENV: &str = "TAG_CHIPS_CONFIG";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("Could not determine configuration directory")]
    NoConfigDir,

    /// The config file could not be read.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// The config file is not valid TOML.
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// The config file parsed but contains invalid values.
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Contents of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Control properties, as a host manifest would supply them.
    pub control: ControlProperties,
    /// Behavior switches.
    pub behavior: BehaviorSettings,
}

impl Config {
    /// Load the config file from its default location.
    ///
    /// A missing file is not an error and yields the default configuration.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load the config file from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::parse(&contents)?;
        info!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Parse and validate config file contents.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate values that a user wrote by hand.
    ///
    /// Limits must be positive when set. Hosts are more lenient, see
    /// [`TagEditorSettings::from_properties`].
    pub fn validate(&self) -> Result<()> {
        if let Some(max) = self.control.max_tag_length {
            if max <= 0 {
                return Err(ConfigError::ValidationError(format!(
                    "max_tag_length must be positive, got {}",
                    max
                )));
            }
        }
        if let Some(max) = self.control.max_tags_to_show {
            if max <= 0 {
                return Err(ConfigError::ValidationError(format!(
                    "max_tags_to_show must be positive, got {}",
                    max
                )));
            }
        }
        Ok(())
    }

    /// Get the default config file path.
    ///
    /// Honors [`CONFIG_PATH_ENV`], otherwise
    /// `<config dir>/tag-chips/config.toml`.
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join("tag-chips").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    #[test]
    fn test_parse_full_config() {
        let config = Config::parse(
            r##"
            [control]
            value = "Test,Vip"
            defaultTagColor = "#00FF00"
            useDynamicColors = true
            maxTagsToShow = 3

            [behavior]
            clear_error_on_refresh = false
            "##,
        )
        .unwrap();

        assert_eq!(config.control.raw_value(), "Test,Vip");
        assert_eq!(config.control.default_tag_color.as_deref(), Some("#00FF00"));
        assert_eq!(config.control.max_tags_to_show, Some(3));
        assert!(!config.behavior.clear_error_on_refresh);
    }

    #[test]
    fn test_parse_empty_config() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.behavior.clear_error_on_refresh);
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = Config::parse("[control\nvalue = ");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_zero_limit_rejected() {
        let result = Config::parse("[control]\nmax_tag_length = 0\n");
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(err.to_string().contains("max_tag_length must be positive"));
    }

    #[test]
    fn test_negative_show_limit_rejected() {
        let result = Config::parse("[control]\nmax_tags_to_show = -1\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[control]\nvalue = \"a,b\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.control.raw_value(), "a,b");
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempdir().unwrap();
        let result = Config::load_from(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(ConfigError::ReadError(_))));
    }

    #[test]
    #[serial]
    fn test_load_uses_env_override() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[control]\nmaxTagLength = 7\n").unwrap();

        std::env::set_var(CONFIG_PATH_ENV, &path);
        let config = Config::load();
        std::env::remove_var(CONFIG_PATH_ENV);

        assert_eq!(config.unwrap().control.max_tag_length, Some(7));
    }

    #[test]
    #[serial]
    fn test_load_missing_default_is_default() {
        let dir = tempdir().unwrap();
        std::env::set_var(CONFIG_PATH_ENV, dir.path().join("nope.toml"));
        let config = Config::load();
        std::env::remove_var(CONFIG_PATH_ENV);

        assert_eq!(config.unwrap(), Config::default());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let config = Config {
            control: ControlProperties::with_value("One,Two"),
            behavior: BehaviorSettings {
                clear_error_on_refresh: false,
            },
        };
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }
}
