//! Tool Registry Module
//!
//! Holds the tools a server exposes, indexed by name. Names are validated
//! and must be unique.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use nzbn_mcp::registry::ToolRegistry;
//! use nzbn_mcp::tool::GetEntityTool;
//!
//! let mut registry = ToolRegistry::new();
//! registry.register(GetEntityTool::new(client))?;
//!
//! let tool = registry.get("get_entity")?;
//! let result = tool.call(serde_json::json!({"nzbn": "9429041864373"})).await;
//! ```

mod error;
#[allow(clippy::module_inception)]
mod registry;

pub use error::{RegistryError, RegistryResult};
pub use registry::ToolRegistry;
