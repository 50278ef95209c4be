//! TOML configuration parsing and management.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::EnvironmentLoader;

/// Production root of the NZBN registry gateway.
pub const DEFAULT_BASE_URL: &str = "https://api.business.govt.nz/gateway/nzbn/v5";

/// Client-side timeout applied to every register request.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Configuration {
    /// Registry gateway access (`[api]`).
    #[serde(default)]
    pub api: ApiConfig,
    /// MCP server identity (`[server]`).
    #[serde(default)]
    pub server: ServerConfig,
    /// Log level, format and transcript (`[logging]`).
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Upstream registry gateway configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Gateway root; `/entities/{nzbn}` is appended to it.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Value of the `Ocp-Apim-Subscription-Key` header.
    #[serde(default, skip_serializing)]
    pub subscription_key: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            subscription_key: String::new(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = if self.subscription_key.is_empty() {
            "<unset>"
        } else {
            "<redacted>"
        };
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("subscription_key", &key)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

impl ApiConfig {
    /// Create an API configuration for the given gateway root and key.
    pub fn new(base_url: impl Into<String>, subscription_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            subscription_key: subscription_key.into(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Whether a subscription key has been supplied.
    pub fn has_subscription_key(&self) -> bool {
        !self.subscription_key.is_empty()
    }
}

/// MCP server identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Name reported in `serverInfo`.
    #[serde(default = "default_server_name")]
    pub name: String,
    /// Version reported in `serverInfo`.
    #[serde(default = "default_server_version")]
    pub version: String,
}

fn default_server_name() -> String {
    "nzbn_mcp".to_string()
}

fn default_server_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_server_name(),
            version: default_server_version(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Emit JSON lines instead of human-readable text.
    #[serde(default)]
    pub json: bool,
    /// Optional markdown transcript of tool calls.
    #[serde(default)]
    pub transcript_file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
            transcript_file: None,
        }
    }
}

impl Configuration {
    /// Apply overrides on top of the file configuration.
    ///
    /// `None` leaves the existing value in place.
    pub fn with_overrides(
        mut self,
        base_url: Option<String>,
        subscription_key: Option<String>,
    ) -> Self {
        if let Some(base_url) = base_url {
            self.api.base_url = base_url;
        }
        if let Some(key) = subscription_key {
            self.api.subscription_key = key;
        }
        self
    }

    /// Apply `NZBN_API_BASE_URL` and `NZBN_API_KEY` from the environment.
    pub fn apply_environment(self, env: &EnvironmentLoader) -> Self {
        self.with_overrides(env.api_base_url(), env.api_key())
    }
}

/// Loads and manages TOML configuration.
#[derive(Debug)]
pub struct ConfigurationLoader {
    /// File the configuration was read from, if any.
    pub config_path: Option<PathBuf>,
    /// The loaded configuration.
    pub config: Configuration,
}

impl ConfigurationLoader {
    /// Initialize configuration loader.
    ///
    /// # Arguments
    /// * `config_path` - Path to TOML config file. If None or missing, uses defaults.
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) if path.exists() => Self::load_config(path)?,
            _ => Configuration::default(),
        };

        Ok(Self {
            config_path: config_path.map(|p| p.to_path_buf()),
            config,
        })
    }

    /// Create a configuration loader from a pre-built Configuration.
    pub fn from_config(config: Configuration) -> Self {
        Self {
            config_path: None,
            config,
        }
    }

    /// Load configuration from TOML file.
    fn load_config(path: &Path) -> Result<Configuration> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
    }

    /// Consume the loader, keeping only the configuration.
    pub fn into_config(self) -> Configuration {
        self.config
    }

    /// Get configuration value by dot-notation key.
    pub fn get_string(&self, key: &str) -> Option<String> {
        match key {
            "api.base_url" => Some(self.config.api.base_url.clone()),
            "server.name" => Some(self.config.server.name.clone()),
            "server.version" => Some(self.config.server.version.clone()),
            "logging.log_level" => Some(self.config.logging.log_level.clone()),
            "logging.transcript_file" => self.config.logging.transcript_file.clone(),
            _ => None,
        }
    }

    /// Get numeric configuration value.
    pub fn get_u64(&self, key: &str) -> Option<u64> {
        match key {
            "api.timeout_ms" => Some(self.config.api.timeout_ms),
            _ => None,
        }
    }
}
