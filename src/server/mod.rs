//! MCP Server
//!
//! JSON-RPC 2.0 over newline-delimited stdio. Every request is answered
//! independently; notifications and client responses get no reply. The loop
//! ends when the input stream closes.
//!
//! ```text
//!   agent ──stdin──▶ McpServer ──▶ ToolRegistry ──▶ GetEntityTool ──▶ registry gateway
//!   agent ◀─stdout── McpServer
//! ```

/// JSON-RPC and MCP wire types
pub mod protocol;

use std::collections::HashMap;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use self::protocol::*;
use crate::client::NzbnClient;
use crate::config::{ApiConfig, Configuration};
use crate::observability::Logger;
use crate::registry::ToolRegistry;
use crate::tool::GetEntityTool;

const INSTRUCTIONS: &str = "Look up businesses in the New Zealand Business Number Register. \
Call get_entity with a 13-digit NZBN to retrieve the full entity record as JSON.";

const PREVIEW_CHARS: usize = 100;

/// MCP Server
#[derive(Debug)]
pub struct McpServer {
    registry: ToolRegistry,
    info: ServerInfo,
    instructions: Option<String>,
    transcript: Option<Logger>,
}

impl McpServer {
    /// Create a server exposing the tools in `registry`.
    pub fn new(registry: ToolRegistry, info: ServerInfo) -> Self {
        Self {
            registry,
            info,
            instructions: None,
            transcript: None,
        }
    }

    /// Build the NZBN server from configuration.
    ///
    /// Creates the shared register client, registers `get_entity` and opens
    /// the transcript file when one is configured.
    pub fn from_config(config: &Configuration) -> Result<Self> {
        let registry = nzbn_registry(&config.api)?;

        let info = ServerInfo {
            name: config.server.name.clone(),
            version: config.server.version.clone(),
        };

        let mut server = Self::new(registry, info).with_instructions(INSTRUCTIONS);

        if let Some(path) = &config.logging.transcript_file {
            let logger = Logger::new(std::path::Path::new(path))?;
            let mut settings = HashMap::new();
            settings.insert("base_url".to_string(), json!(config.api.base_url));
            settings.insert("timeout_ms".to_string(), json!(config.api.timeout_ms));
            settings.insert(
                "subscription_key_set".to_string(),
                json!(config.api.has_subscription_key()),
            );
            logger.log_session_start(
                &format!("{} {}", server.info.name, server.info.version),
                &settings,
            )?;
            server = server.with_transcript(logger);
        }

        Ok(server)
    }

    /// Set the instructions returned from `initialize`.
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Record every tool call to a markdown transcript.
    pub fn with_transcript(mut self, logger: Logger) -> Self {
        self.transcript = Some(logger);
        self
    }

    /// Tools exposed by this server.
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Server name and version.
    pub fn info(&self) -> &ServerInfo {
        &self.info
    }

    /// Run the server on process stdin/stdout.
    pub async fn run_stdio(&self) -> Result<()> {
        self.run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Run the server, reading one message per line and writing one response per line.
    ///
    /// A line that is not valid UTF-8 is answered with a parse error; only a
    /// failing reader or writer ends the loop early.
    pub async fn run<R, W>(&self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!(
            target: "nzbn_mcp::server",
            "{} {} started with {} tool(s), waiting for messages",
            self.info.name,
            self.info.version,
            self.registry.len()
        );

        let mut buf = Vec::new();
        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .await
                .context("Failed to read from input")?;
            if read == 0 {
                break;
            }

            let response = match std::str::from_utf8(&buf) {
                Ok(text) => {
                    let line = text.trim();
                    if line.is_empty() {
                        continue;
                    }
                    debug!(target: "nzbn_mcp::server", "<- {}", preview(line));
                    self.handle_message(line).await
                }
                Err(e) => Some(self.protocol_error(
                    None,
                    PARSE_ERROR,
                    format!("Parse error: input is not valid UTF-8: {}", e),
                )),
            };

            if let Some(response) = response {
                let out = serde_json::to_string(&response)?;
                debug!(target: "nzbn_mcp::server", "-> {}", preview(&out));

                writer.write_all(out.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }

        info!(target: "nzbn_mcp::server", "Input closed, server shutting down");
        if let Some(transcript) = &self.transcript {
            if let Err(e) = transcript.log_completion("input closed") {
                warn!(target: "nzbn_mcp::server", "Failed to write transcript: {:#}", e);
            }
        }

        Ok(())
    }

    /// Handle a single JSON-RPC message.
    ///
    /// Returns `None` for notifications and for responses sent by the client.
    pub async fn handle_message(&self, msg: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(msg) {
            Ok(v) => v,
            Err(e) => {
                return Some(self.protocol_error(None, PARSE_ERROR, format!("Parse error: {}", e)))
            }
        };

        if value.get("method").is_none()
            && (value.get("result").is_some() || value.get("error").is_some())
        {
            debug!(target: "nzbn_mcp::server", "Ignoring client response");
            return None;
        }

        // A notification has no `id` member at all; `"id": null` is malformed.
        let id = match value.get("id") {
            Some(Value::Null) => {
                return Some(self.protocol_error(
                    None,
                    INVALID_REQUEST,
                    "Invalid request: id must be a string or number".to_string(),
                ))
            }
            id => id.cloned(),
        };
        let req: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(r) => r,
            Err(e) => {
                return Some(self.protocol_error(
                    id,
                    INVALID_REQUEST,
                    format!("Invalid request: {}", e),
                ))
            }
        };

        if req.is_notification() {
            debug!(target: "nzbn_mcp::server", "Notification: {}", req.method);
            return None;
        }

        Some(self.handle_request(req).await)
    }

    async fn handle_request(&self, req: JsonRpcRequest) -> JsonRpcResponse {
        let id = req.id.clone();

        match req.method.as_str() {
            "initialize" => {
                let params: InitializeParams =
                    serde_json::from_value(req.params).unwrap_or_default();
                let protocol_version =
                    negotiate_protocol_version(params.protocol_version.as_deref());
                info!(
                    target: "nzbn_mcp::server",
                    "Client initialized, protocol version {}",
                    protocol_version
                );

                let result = InitializeResult {
                    protocol_version: protocol_version.to_string(),
                    capabilities: ServerCapabilities {
                        tools: ToolsCapability {
                            list_changed: false,
                        },
                    },
                    server_info: self.info.clone(),
                    instructions: self.instructions.clone(),
                };
                to_response(id, &result)
            }

            "ping" => JsonRpcResponse::success(id, json!({})),

            "tools/list" => {
                let result = ToolsListResult {
                    tools: self.registry.definitions(),
                };
                to_response(id, &result)
            }

            "tools/call" => {
                let params: ToolCallParams = match serde_json::from_value(req.params) {
                    Ok(p) => p,
                    Err(e) => {
                        return self.protocol_error(
                            id,
                            INVALID_PARAMS,
                            format!("Invalid tools/call params: {}", e),
                        )
                    }
                };

                let tool = match self.registry.get(&params.name) {
                    Ok(tool) => tool,
                    Err(e) => return self.protocol_error(id, INVALID_PARAMS, e.to_string()),
                };

                info!(target: "nzbn_mcp::server", "Calling tool: {}", params.name);
                let result = tool.call(params.arguments.clone()).await;

                if let Some(transcript) = &self.transcript {
                    if let Err(e) = transcript.log_tool_call(&params.name, &params.arguments, &result)
                    {
                        warn!(target: "nzbn_mcp::server", "Failed to write transcript: {:#}", e);
                    }
                }

                to_response(id, &result)
            }

            _ => self.protocol_error(
                id,
                METHOD_NOT_FOUND,
                format!("Unknown method: {}", req.method),
            ),
        }
    }

    fn protocol_error(&self, id: Option<Value>, code: i32, message: String) -> JsonRpcResponse {
        warn!(target: "nzbn_mcp::server", code, "{}", message);
        if let Some(transcript) = &self.transcript {
            if let Err(e) = transcript.log_error(&message) {
                warn!(target: "nzbn_mcp::server", "Failed to write transcript: {:#}", e);
            }
        }
        JsonRpcResponse::error(id, code, message)
    }
}

/// Registry holding the NZBN tools over one shared client.
///
/// Touches neither stdio nor the transcript, so it can back listings outside
/// a session.
pub fn nzbn_registry(api: &ApiConfig) -> Result<ToolRegistry> {
    let client = NzbnClient::new(api).context("Failed to build NZBN API client")?;

    let mut registry = ToolRegistry::new();
    registry
        .register(GetEntityTool::new(client))
        .context("Failed to register get_entity")?;

    Ok(registry)
}

fn to_response<T: Serialize>(id: Option<Value>, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(v) => JsonRpcResponse::success(id, v),
        Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, format!("Serialization error: {}", e)),
    }
}

fn preview(line: &str) -> String {
    if line.chars().count() > PREVIEW_CHARS {
        let head: String = line.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", head)
    } else {
        line.to_string()
    }
}
