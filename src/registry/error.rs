//! Tool registry failures.

use thiserror::Error;

/// Why a tool could not be registered or resolved.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Another tool already answers to this name.
    #[error("Tool '{name}' already registered")]
    Conflict {
        /// The duplicated name.
        name: String,
    },

    /// MCP tool names are ASCII letters, digits, `_` and `-`.
    #[error("Tool name '{0}' is not a valid MCP tool name")]
    InvalidName(String),

    /// `tools/call` named a tool the server does not expose.
    #[error("Tool '{0}' not found")]
    NotFound(String),
}

/// Result alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
