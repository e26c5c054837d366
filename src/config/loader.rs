use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/loginvm/config.toml` on Unix/macOS, or the platform
    /// equivalent via `dirs::config_dir()`. Falls back to the current
    /// directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("loginvm").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`, or from [`config_path`](Self::config_path)
    /// when none is given, reporting failures as [`crate::Error::Config`].
    pub fn open(path: Option<&Path>) -> crate::Result<Self> {
        let config = match path {
            Some(path) => Self::load_from(path)?,
            None => Self::load()?,
        };
        Ok(config)
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - Otherwise parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file missing, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The carousel has at least one item and a non-zero interval
    /// - The email cap leaves room for the minimum email length
    /// - A password cap, if set, leaves room for the minimum password length
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.carousel.items.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "carousel.items must contain at least one item".to_string(),
            });
        }

        if self.carousel.interval_ms == 0 {
            return Err(ConfigError::ValidationError {
                message: "carousel.interval_ms must be greater than zero".to_string(),
            });
        }

        let form = &self.form;
        if form.email_max_chars < form.min_email_chars {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "form.email_max_chars ({}) is below form.min_email_chars ({})",
                    form.email_max_chars, form.min_email_chars
                ),
            });
        }

        if let Some(max) = form.password_max_chars {
            if max < form.min_password_chars {
                return Err(ConfigError::ValidationError {
                    message: format!(
                        "form.password_max_chars ({}) is below form.min_password_chars ({})",
                        max, form.min_password_chars
                    ),
                });
            }
        }

        Ok(())
    }
}
