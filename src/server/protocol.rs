//! MCP Protocol Types
//!
//! JSON-RPC 2.0 types for the Model Context Protocol.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Protocol versions this server can speak, newest first.
pub const SUPPORTED_PROTOCOL_VERSIONS: &[&str] = &["2025-06-18", "2025-03-26", "2024-11-05"];

/// JSON-RPC request or notification
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    /// Always `"2.0"`.
    pub jsonrpc: String,
    /// Request id; absent for notifications.
    #[serde(default)]
    pub id: Option<Value>,
    /// Method name.
    pub method: String,
    /// Method parameters, `null` when omitted.
    #[serde(default)]
    pub params: Value,
}

impl JsonRpcRequest {
    /// Notifications carry no id and must not be answered.
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// JSON-RPC response
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    /// Always `"2.0"`.
    pub jsonrpc: String,
    /// Id of the request being answered, `null` if it could not be read.
    pub id: Value,
    /// Set on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Set on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    /// One of the error code constants below.
    pub code: i32,
    /// Human-readable description.
    pub message: String,
}

impl JsonRpcResponse {
    /// Successful response carrying `result`.
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id: id.unwrap_or(Value::Null),
            result: Some(result),
            error: None,
        }
    }

    /// Error response.
    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id: id.unwrap_or(Value::Null),
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

/// The line was not valid JSON.
pub const PARSE_ERROR: i32 = -32700;
/// The JSON was not a valid request object.
pub const INVALID_REQUEST: i32 = -32600;
/// Unknown method.
pub const METHOD_NOT_FOUND: i32 = -32601;
/// Method parameters were rejected.
pub const INVALID_PARAMS: i32 = -32602;
/// The server failed to build a response.
pub const INTERNAL_ERROR: i32 = -32603;

/// Parameters of an `initialize` request
#[derive(Debug, Default, Deserialize)]
pub struct InitializeParams {
    /// Version the client would like to speak.
    #[serde(rename = "protocolVersion", default)]
    pub protocol_version: Option<String>,
}

/// MCP initialize result
#[derive(Debug, Serialize)]
pub struct InitializeResult {
    /// Negotiated protocol version.
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    /// Features the server offers.
    pub capabilities: ServerCapabilities,
    /// Server name and version.
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
    /// Usage hints for the agent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// Server capabilities
#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    /// The server exposes tools.
    pub tools: ToolsCapability,
}

/// Tools capability
#[derive(Debug, Serialize)]
pub struct ToolsCapability {
    /// Whether `notifications/tools/list_changed` is ever sent.
    #[serde(rename = "listChanged")]
    pub list_changed: bool,
}

/// Server info
#[derive(Debug, Clone, Serialize)]
pub struct ServerInfo {
    /// Server name.
    pub name: String,
    /// Server version.
    pub version: String,
}

/// Behaviour hints advertised with a tool
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolAnnotations {
    /// Display title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// The tool does not modify anything.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only_hint: Option<bool>,
    /// The tool may perform destructive updates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destructive_hint: Option<bool>,
    /// Repeating a call has no further effect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idempotent_hint: Option<bool>,
    /// The tool talks to an external system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_world_hint: Option<bool>,
}

/// Tool definition
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    /// Name used in `tools/call`.
    pub name: String,
    /// Display title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// What the tool does, for the agent.
    pub description: String,
    /// JSON Schema of the arguments object.
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
    /// Behaviour hints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<ToolAnnotations>,
}

/// Tools list result
#[derive(Debug, Serialize)]
pub struct ToolsListResult {
    /// Every registered tool.
    pub tools: Vec<ToolDefinition>,
}

/// Tool call parameters
#[derive(Debug, Deserialize)]
pub struct ToolCallParams {
    /// Tool to invoke.
    pub name: String,
    /// Arguments object, `null` when omitted.
    #[serde(default)]
    pub arguments: Value,
}

/// Tool call result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolCallResult {
    /// Content blocks; always exactly one text block here.
    pub content: Vec<ToolContent>,
    /// The call failed and `content` explains why.
    #[serde(rename = "isError")]
    pub is_error: bool,
}

/// Tool content block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolContent {
    /// Block type, `"text"`.
    #[serde(rename = "type")]
    pub content_type: String,
    /// Block text.
    pub text: String,
}

impl ToolCallResult {
    /// Successful result with one text block.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent {
                content_type: "text".into(),
                text: text.into(),
            }],
            is_error: false,
        }
    }

    /// Failed result with one text block and `isError` set.
    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent {
                content_type: "text".into(),
                text: msg.into(),
            }],
            is_error: true,
        }
    }

    /// Concatenated text of all content blocks.
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Pick the protocol version to answer an `initialize` with.
pub fn negotiate_protocol_version(requested: Option<&str>) -> &'static str {
    requested
        .and_then(|r| SUPPORTED_PROTOCOL_VERSIONS.iter().find(|v| **v == r))
        .copied()
        .unwrap_or(SUPPORTED_PROTOCOL_VERSIONS[0])
}
