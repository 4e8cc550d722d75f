//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (C2PA_DOCS_*)
//! 2. TOML config file (if C2PA_DOCS_CONFIG_FILE set)
//! 3. Built-in defaults
//!
//! The GitHub access credential additionally falls back to the conventional
//! `GITHUB_TOKEN` variable when no prefixed variable is set.

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (C2PA_DOCS_*)
/// 2. TOML config file (if C2PA_DOCS_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// GitHub access token for repository-contents requests.
    ///
    /// Set via C2PA_DOCS_GITHUB_TOKEN, or GITHUB_TOKEN as a fallback.
    /// Optional: requests proceed unauthenticated with lower rate limits.
    #[serde(default)]
    pub github_token: Option<String>,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via C2PA_DOCS_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Total HTTP request timeout in milliseconds.
    ///
    /// Set via C2PA_DOCS_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum number of entries in the HTTP response cache.
    ///
    /// Set via C2PA_DOCS_CACHE_CAPACITY environment variable.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

fn default_user_agent() -> String {
    "c2pa-docs-mcp/0.1 (+https://github.com/contentauth)".into()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_cache_capacity() -> usize {
    64
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            github_token: None,
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            cache_capacity: default_cache_capacity(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("C2PA_DOCS_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("C2PA_DOCS_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let mut config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        if config.github_token.is_none()
            && let Ok(token) = std::env::var("GITHUB_TOKEN")
            && !token.is_empty()
        {
            config.github_token = Some(token);
        }

        config.validate()?;

        Ok(config)
    }
}
