//! Tools exposed over MCP.
//!
//! A tool describes itself with a [`ToolDefinition`] and answers every call
//! with a [`ToolCallResult`]. Calls never fail at the protocol level: bad
//! arguments and upstream faults both come back as `isError` results.

mod get_entity;

pub use get_entity::{lookup_entity, EntityLookup, GetEntityInput, GetEntityTool, GET_ENTITY};

use async_trait::async_trait;
use serde_json::Value;

use crate::server::protocol::{ToolCallResult, ToolDefinition};

/// A callable tool.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Name, description, input schema and annotations.
    fn definition(&self) -> ToolDefinition;

    /// Invoke the tool with raw JSON arguments.
    async fn call(&self, arguments: Value) -> ToolCallResult;

    /// Tool name, taken from the definition.
    fn name(&self) -> String {
        self.definition().name
    }
}
