use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

use crate::config::types::{Environment, GnavConfig};

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

impl GnavConfig {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/gnav/config.toml` on Unix/macOS, or the platform
    /// equivalent via `dirs::config_dir()`. Falls back to the current
    /// directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("gnav").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `GnavConfig::default()`.
    /// - Otherwise parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(GnavConfig::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: GnavConfig = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The fragment path is absolute
    /// - The origin is an absolute http(s) URL
    /// - The desktop breakpoint is non-zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.path.starts_with('/') {
            return Err(ConfigError::ValidationError {
                message: format!("Navigation path '{}' must start with '/'", self.path),
            });
        }

        self.origin_url()?;

        if self.desktop_min_width == 0 {
            return Err(ConfigError::ValidationError {
                message: "desktop_min_width must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    /// The configured origin as a parsed URL.
    pub fn origin_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.origin).map_err(|e| ConfigError::ValidationError {
            message: format!("Origin '{}' is not a valid URL: {}", self.origin, e),
        })?;
        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(ConfigError::ValidationError {
                message: format!("Origin '{}' must be an http(s) URL", self.origin),
            });
        }
        Ok(url)
    }

    /// The identity environment: explicit when configured, otherwise
    /// derived from the origin host.
    pub fn environment(&self) -> Environment {
        if let Some(env) = &self.environment {
            return env.clone();
        }
        let host = self
            .origin_url()
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_default();
        Environment::for_host(&host)
    }
}
