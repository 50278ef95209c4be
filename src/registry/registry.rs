//! Name-indexed registry of the tools a server exposes.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::{RegistryError, RegistryResult};
use crate::server::protocol::ToolDefinition;
use crate::tool::Tool;

/// Registry of tools, kept in registration order.
///
/// The registry is built once at startup and then shared read-only, so
/// lookups hand out `Arc` clones that can be awaited without holding any
/// lock.
///
/// # Example
///
/// ```rust,ignore
/// use nzbn_mcp::registry::ToolRegistry;
/// use nzbn_mcp::tool::GetEntityTool;
///
/// let mut registry = ToolRegistry::new();
/// registry.register(GetEntityTool::new(client))?;
///
/// let definitions = registry.definitions();
/// ```
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    name_index: HashMap<String, usize>,
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tool_names())
            .finish()
    }
}

impl ToolRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// MCP tool names: ASCII letters, digits, `_` and `-`, at least one.
    pub(crate) fn validate_name(name: &str) -> RegistryResult<()> {
        let valid = !name.is_empty()
            && name
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');

        if valid {
            Ok(())
        } else {
            Err(RegistryError::InvalidName(name.to_string()))
        }
    }

    /// Register a tool.
    ///
    /// Returns an error if the name is invalid or already taken.
    pub fn register<T: Tool + 'static>(&mut self, tool: T) -> RegistryResult<()> {
        self.register_shared(Arc::new(tool))
    }

    /// Register an already shared tool.
    pub fn register_shared(&mut self, tool: Arc<dyn Tool>) -> RegistryResult<()> {
        let name = tool.name();
        Self::validate_name(&name)?;

        if self.name_index.contains_key(&name) {
            return Err(RegistryError::Conflict { name });
        }

        self.name_index.insert(name, self.tools.len());
        self.tools.push(tool);

        Ok(())
    }

    /// Look up a tool, `None` if no tool has this name.
    pub fn find(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.name_index
            .get(name)
            .map(|&idx| Arc::clone(&self.tools[idx]))
    }

    /// Look up a tool for `tools/call`.
    pub fn get(&self, name: &str) -> RegistryResult<Arc<dyn Tool>> {
        self.find(name).ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    /// Definitions of all tools in registration order.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.definition()).collect()
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether no tool is registered.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// List all tool names in registration order.
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.name_index.contains_key(name)
    }
}
