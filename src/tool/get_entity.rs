//! The `get_entity` tool: full register record for one NZBN.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::Tool;
use crate::client::NzbnClient;
use crate::nzbn::{Nzbn, NzbnError};
use crate::outcome::ErrorOutcome;
use crate::render::render_entity;
use crate::server::protocol::{ToolAnnotations, ToolCallResult, ToolDefinition};

/// Registered name of the tool.
pub const GET_ENTITY: &str = "get_entity";

const DESCRIPTION: &str = "Retrieve full details for a New Zealand business by its NZBN.\n\n\
Returns the entity's primary business data including legal name, trading names, \
entity type, status, addresses, directors, shareholders, and other registration details \
as a JSON document from the NZBN Register.";

/// Arguments accepted by `get_entity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetEntityInput {
    /// Candidate 13-digit NZBN, validated before any request is made.
    pub nzbn: String,
}

/// Result of a lookup for a well-formed NZBN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityLookup {
    /// The record, rendered as indented JSON.
    Found(String),
    /// The request failed; the outcome carries the message.
    Failed(ErrorOutcome),
}

impl EntityLookup {
    /// The single text result: JSON on success, a sentence on failure.
    pub fn text(&self) -> String {
        match self {
            EntityLookup::Found(json) => json.clone(),
            EntityLookup::Failed(outcome) => outcome.to_string(),
        }
    }

    /// Whether the lookup failed.
    pub fn is_error(&self) -> bool {
        matches!(self, EntityLookup::Failed(_))
    }
}

impl From<EntityLookup> for ToolCallResult {
    fn from(lookup: EntityLookup) -> Self {
        match lookup {
            EntityLookup::Found(json) => ToolCallResult::text(json),
            EntityLookup::Failed(outcome) => ToolCallResult::error(outcome.to_string()),
        }
    }
}

/// Validate `raw` and fetch its record.
///
/// A malformed identifier is returned as `Err` and no request is made.
/// Every fault after validation is folded into [`EntityLookup::Failed`].
pub async fn lookup_entity(client: &NzbnClient, raw: &str) -> Result<EntityLookup, NzbnError> {
    let nzbn = Nzbn::parse(raw)?;

    let lookup = match client.get_entity(&nzbn).await {
        Ok(entity) => match render_entity(&entity) {
            Ok(text) => EntityLookup::Found(text),
            Err(e) => EntityLookup::Failed(ErrorOutcome::Unclassified {
                kind: "SerializationError".to_string(),
                message: e.to_string(),
            }),
        },
        Err(err) => {
            warn!(
                target: "nzbn_mcp::tool",
                nzbn = %nzbn,
                kind = err.kind(),
                "Entity lookup failed: {}",
                err
            );
            EntityLookup::Failed(ErrorOutcome::classify(&err))
        }
    };

    Ok(lookup)
}

/// MCP tool wrapping [`lookup_entity`].
#[derive(Debug, Clone)]
pub struct GetEntityTool {
    client: NzbnClient,
}

impl GetEntityTool {
    /// Create the tool over a shared client.
    pub fn new(client: NzbnClient) -> Self {
        Self { client }
    }

    fn input_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "nzbn": {
                    "type": "string",
                    "description": "The 13-digit New Zealand Business Number (e.g., '9429041864373')",
                    "minLength": 13,
                    "maxLength": 13,
                    "pattern": "^\\d{13}$"
                }
            },
            "required": ["nzbn"],
            "additionalProperties": false
        })
    }
}

#[async_trait]
impl Tool for GetEntityTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: GET_ENTITY.to_string(),
            title: Some("Get NZBN Entity".to_string()),
            description: DESCRIPTION.to_string(),
            input_schema: Self::input_schema(),
            annotations: Some(ToolAnnotations {
                title: Some("Get NZBN Entity".to_string()),
                read_only_hint: Some(true),
                destructive_hint: Some(false),
                idempotent_hint: Some(true),
                open_world_hint: Some(true),
            }),
        }
    }

    async fn call(&self, arguments: Value) -> ToolCallResult {
        let input: GetEntityInput = match serde_json::from_value(arguments) {
            Ok(input) => input,
            Err(e) => {
                debug!(target: "nzbn_mcp::tool", "Rejected get_entity arguments: {}", e);
                return ToolCallResult::error(format!("Invalid arguments for get_entity: {}", e));
            }
        };

        match lookup_entity(&self.client, &input.nzbn).await {
            Ok(lookup) => lookup.into(),
            Err(e) => {
                debug!(target: "nzbn_mcp::tool", "Rejected NZBN {:?}: {}", input.nzbn, e);
                ToolCallResult::error(format!("Invalid NZBN: {}", e))
            }
        }
    }

    fn name(&self) -> String {
        GET_ENTITY.to_string()
    }
}
