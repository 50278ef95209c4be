//! Environment variable loading and management.
//!
//! Only three variables are read: the gateway root, the subscription key and
//! an optional config file path. A value set in the process environment wins
//! over one from the `.env` file. The `.env` file is parsed into the loader
//! and never written back into the process environment.

use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

/// Gateway root override.
pub const BASE_URL_VAR: &str = "NZBN_API_BASE_URL";
/// Subscription key for the registry gateway.
pub const API_KEY_VAR: &str = "NZBN_API_KEY";
/// Path to a TOML configuration file.
pub const CONFIG_PATH_VAR: &str = "NZBN_MCP_CONFIG";

/// Reads settings from the process environment and an optional .env file.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentLoader {
    env_file: Option<PathBuf>,
    file_vars: HashMap<String, String>,
    // None reads the real process environment.
    process_vars: Option<HashMap<String, String>>,
}

impl EnvironmentLoader {
    /// Initialize the environment loader.
    ///
    /// # Arguments
    /// * `env_file` - Path to a .env file. Nothing is loaded when None.
    pub fn new(env_file: Option<&Path>) -> Self {
        // Only an explicit path is honoured so tests never pick up a stray .env.
        let file_vars = match env_file {
            Some(path) if path.exists() => read_env_file(path),
            Some(path) => {
                tracing::warn!(
                    target: "nzbn_mcp::config",
                    ".env file {} does not exist",
                    path.display()
                );
                HashMap::new()
            }
            None => HashMap::new(),
        };

        Self {
            env_file: env_file.map(|p| p.to_path_buf()),
            file_vars,
            process_vars: None,
        }
    }

    /// Use a fixed set of variables in place of the process environment.
    pub fn with_process_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.process_vars = Some(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// The .env file this loader was created with, if any.
    pub fn env_file(&self) -> Option<&Path> {
        self.env_file.as_deref()
    }

    /// Gateway root from `NZBN_API_BASE_URL`.
    pub fn api_base_url(&self) -> Option<String> {
        self.non_empty_var(BASE_URL_VAR)
    }

    /// Subscription key from `NZBN_API_KEY`.
    ///
    /// An empty value is still returned so an explicit blank overrides a file key.
    pub fn api_key(&self) -> Option<String> {
        self.var(API_KEY_VAR)
    }

    /// Config file path from `NZBN_MCP_CONFIG`.
    pub fn config_path(&self) -> Option<PathBuf> {
        self.non_empty_var(CONFIG_PATH_VAR).map(PathBuf::from)
    }

    fn var(&self, name: &str) -> Option<String> {
        let from_process = match &self.process_vars {
            Some(vars) => vars.get(name).cloned(),
            None => env::var(name).ok(),
        };
        from_process.or_else(|| self.file_vars.get(name).cloned())
    }

    fn non_empty_var(&self, name: &str) -> Option<String> {
        self.var(name).filter(|v| !v.trim().is_empty())
    }
}

fn read_env_file(path: &Path) -> HashMap<String, String> {
    let entries = match dotenv::from_path_iter(path) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(
                target: "nzbn_mcp::config",
                "Failed to load .env file {}: {}",
                path.display(),
                e
            );
            return HashMap::new();
        }
    };

    let mut vars = HashMap::new();
    for entry in entries {
        match entry {
            Ok((key, value)) => {
                vars.insert(key, value);
            }
            Err(e) => {
                tracing::warn!(
                    target: "nzbn_mcp::config",
                    "Skipping malformed line in {}: {}",
                    path.display(),
                    e
                );
            }
        }
    }
    vars
}
