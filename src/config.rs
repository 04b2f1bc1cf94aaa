//! Configuration file parser for ~/.config/artfeed/config.toml.
//!
//! The file is optional. A missing or blank file yields `Config::default()`.
//! Unrecognised keys don't fail the load but are logged at warn.
use secrecy::SecretString;
use serde::Deserialize;
use std::num::NonZeroU32;
use std::path::Path;
use thiserror::Error;

use crate::feed::{FeedRequestConfig, OrderBy, DEFAULT_BASE_URL, DEFAULT_QUERY};

/// Environment variable that overrides `api_key` from the file.
pub const API_KEY_ENV: &str = "ARTFEED_API_KEY";

/// The public developer key accepted by the content API.
const DEFAULT_API_KEY: &str = "test";

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Top-level application configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
/// The custom Debug impl masks `api_key`.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Search endpoint.
    pub base_url: String,

    /// Sort order: "newest", "oldest" or "relevance".
    pub order_by: OrderBy,

    /// Number of articles requested per fetch.
    pub page_size: NonZeroU32,

    /// Topic keyword.
    pub query: String,

    /// API key (alternative to the ARTFEED_API_KEY env var).
    /// Env var takes precedence over config file.
    pub api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            order_by: OrderBy::Newest,
            page_size: NonZeroU32::new(10).unwrap_or(NonZeroU32::MIN),
            query: DEFAULT_QUERY.to_string(),
            api_key: None,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("order_by", &self.order_by)
            .field("page_size", &self.page_size)
            .field("query", &self.query)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [&'static str; 5] = ["base_url", "order_by", "page_size", "query", "api_key"];

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → silently accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // File deleted between metadata and read
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text. Blank text yields defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            tracing::debug!("Config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(content)?;
        tracing::info!(
            base_url = %config.base_url,
            order_by = %config.order_by,
            page_size = config.page_size.get(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Build the per-fetch request from this config.
    ///
    /// `env_api_key` is the value of [`API_KEY_ENV`], if set; it wins over
    /// the file. Without either, the public developer key is used.
    pub fn request(&self, env_api_key: Option<String>) -> FeedRequestConfig {
        let api_key = env_api_key
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.api_key.clone())
            .unwrap_or_else(|| DEFAULT_API_KEY.to_string());

        FeedRequestConfig {
            base_url: self.base_url.clone(),
            order_by: self.order_by,
            page_size: self.page_size,
            query: self.query.clone(),
            api_key: SecretString::from(api_key),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
