//! Error types for the navigation.
//!
//! None of these reach the host page: `Gnav::init` logs them and leaves
//! the navigation absent, event dispatch logs and carries on.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised while loading, building or driving the navigation.
#[derive(Debug, Error)]
pub enum GnavError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Network failure while fetching a resource
    #[error("Request to '{url}' failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Resource answered with a non-success status
    #[error("Request to '{url}' returned status {status}")]
    Status { url: String, status: u16 },

    /// Fragment body was empty
    #[error("Navigation fragment at '{url}' is empty")]
    EmptyFragment { url: String },

    /// Fragment is missing structure the builder relies on
    #[error("Navigation markup is missing '{selector}'")]
    MissingElement { selector: String },

    /// Invalid URL or path
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Lazily loaded module could not be produced
    #[error("Could not load {module} module: {reason}")]
    ModuleLoad { module: String, reason: String },
}

impl GnavError {
    pub fn missing(selector: &str) -> Self {
        GnavError::MissingElement {
            selector: selector.to_string(),
        }
    }

    /// Short machine-readable classification used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            GnavError::Config(_) => "config",
            GnavError::Fetch { .. } => "fetch",
            GnavError::Status { .. } => "status",
            GnavError::EmptyFragment { .. } => "empty_fragment",
            GnavError::MissingElement { .. } => "missing_element",
            GnavError::InvalidUrl { .. } => "invalid_url",
            GnavError::ModuleLoad { .. } => "module_load",
        }
    }
}
