//! Rendering of entity records returned by the register.

use serde_json::Value;

/// Render an entity record as 2-space indented JSON.
///
/// Object keys keep the order the register sent them in, so parsing the
/// output yields a value equal to the input.
pub fn render_entity(entity: &Value) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(entity)
}
