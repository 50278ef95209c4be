//! NZBN MCP - New Zealand Business Number register as an agent tool
//!
//! This crate exposes the NZBN registry gateway through the Model Context
//! Protocol. One tool, `get_entity`, validates a 13-digit NZBN, fetches the
//! entity record and returns either the record as indented JSON or a short
//! sentence explaining what went wrong.
//!
//! - **`nzbn`** - Identifier validation
//! - **`client`** - HTTP client for the registry gateway
//! - **`outcome`** - Classification of upstream faults into messages
//! - **`render`** - JSON rendering of entity records
//! - **`tool`** / **`registry`** - Tool surface and tool registry
//! - **`server`** - MCP JSON-RPC server over stdio
//! - **`config`** - TOML and environment configuration
//! - **`observability`** - `tracing` setup and session transcripts
//!
//! # Example: one-off lookup
//!
//! ```no_run
//! use nzbn_mcp::client::NzbnClient;
//! use nzbn_mcp::config::ApiConfig;
//! use nzbn_mcp::tool::lookup_entity;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ApiConfig::new(nzbn_mcp::config::DEFAULT_BASE_URL, "my-subscription-key");
//! let client = NzbnClient::new(&config)?;
//!
//! match lookup_entity(&client, "9429041864373").await {
//!     Ok(lookup) => println!("{}", lookup.text()),
//!     Err(invalid) => eprintln!("Invalid NZBN: {}", invalid),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example: running the server
//!
//! ```no_run
//! use nzbn_mcp::config::{ConfigurationLoader, EnvironmentLoader};
//! use nzbn_mcp::server::McpServer;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let env = EnvironmentLoader::new(None);
//! let config = ConfigurationLoader::new(env.config_path().as_deref())?
//!     .into_config()
//!     .apply_environment(&env);
//!
//! McpServer::from_config(&config)?.run_stdio().await
//! # }
//! ```

#![warn(missing_docs)]

/// HTTP client for the registry gateway
pub mod client;

/// Configuration management
pub mod config;

/// NZBN identifier validation
pub mod nzbn;

/// Observability utilities
pub mod observability;

/// Fault classification
pub mod outcome;

/// Tool registry
pub mod registry;

/// Entity rendering
pub mod render;

/// MCP server
pub mod server;

/// Tools exposed over MCP
pub mod tool;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::client::{FetchError, NzbnClient};
    pub use crate::config::{ApiConfig, Configuration, ConfigurationLoader, EnvironmentLoader};
    pub use crate::nzbn::{Nzbn, NzbnError};
    pub use crate::outcome::ErrorOutcome;
    pub use crate::registry::ToolRegistry;
    pub use crate::server::McpServer;
    pub use crate::tool::{lookup_entity, EntityLookup, GetEntityTool, Tool};
}
