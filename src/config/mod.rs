//! Configuration management for the NZBN MCP server.
//!
//! This module provides configuration loading through TOML files and
//! environment variable management via `.env` files. Configuration is read
//! once at startup and handed to the client by reference.
//!
//! # Example
//!
//! ```no_run
//! use nzbn_mcp::config::{ConfigurationLoader, EnvironmentLoader};
//! use std::path::Path;
//!
//! let env = EnvironmentLoader::new(Some(Path::new(".env")));
//! let config = ConfigurationLoader::new(Some(Path::new("nzbn-mcp.toml")))
//!     .unwrap()
//!     .into_config()
//!     .apply_environment(&env);
//!
//! println!("Gateway: {}", config.api.base_url);
//! ```

/// TOML configuration
#[allow(clippy::module_inception)]
pub mod config;
/// Environment and `.env` overrides
pub mod environment;

// Re-export main types for convenience
pub use self::config::{
    ApiConfig, Configuration, ConfigurationLoader, LoggingConfig, ServerConfig, DEFAULT_BASE_URL,
    DEFAULT_TIMEOUT_MS,
};
pub use self::environment::EnvironmentLoader;
