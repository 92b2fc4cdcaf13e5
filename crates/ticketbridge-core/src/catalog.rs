// crates/ticketbridge-core/src/catalog.rs
// ============================================================================
// Module: Tool Catalog
// Description: Canonical tool records, normalization, and action filtering.
// Purpose: Give every downstream projector one stable catalog contract.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The remote server describes each tool with a name, description, and input
//! schema. Schemas arrive either as structured JSON or as a serialized string
//! holding the same shape, and either form may be malformed. Normalization
//! always yields the full `{type, properties, required}` object so projectors
//! never branch on source shape; a single malformed tool degrades to an empty
//! schema instead of aborting the whole catalog fetch.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::action::Action;
use crate::diagnostics::DiagnosticEvent;
use crate::diagnostics::DiagnosticSink;

// ============================================================================
// SECTION: Raw Catalog Types
// ============================================================================

/// Raw tool descriptor as returned by the session gateway.
///
/// # Invariants
/// - `name` is the remote dispatch key; it is never rewritten here.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTool {
    /// Remote tool name.
    pub name: String,
    /// Tool description for clients.
    #[serde(default)]
    pub description: String,
    /// Input schema, inline or serialized.
    #[serde(default, rename = "inputSchema")]
    pub input_schema: Option<RawSchema>,
}

/// Input schema carried either inline or as a serialized JSON string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawSchema {
    /// Already-structured schema object.
    Inline(Map<String, Value>),
    /// Serialized JSON encoding of the schema object.
    Encoded(String),
}

// ============================================================================
// SECTION: Canonical Catalog Types
// ============================================================================

/// Canonical description of one remotely callable operation.
///
/// Constructed fresh on every catalog fetch and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolRecord {
    /// Unique, stable tool name; also the dispatch key.
    pub name: String,
    /// Tool description.
    pub description: String,
    /// Normalized parameter schema.
    pub parameters: ParameterSchema,
}

/// Normalized parameter schema in the full object form.
///
/// # Invariants
/// - `kind` is always the literal `"object"`.
/// - `properties` and `required` default to empty rather than being absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSchema {
    /// Schema type, always `"object"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Property schemas keyed by property name.
    pub properties: Map<String, Value>,
    /// Names of required properties.
    pub required: Vec<String>,
}

impl ParameterSchema {
    /// Returns an empty object schema.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            kind: "object".to_string(),
            properties: Map::new(),
            required: Vec::new(),
        }
    }
}

// ============================================================================
// SECTION: Normalization
// ============================================================================

/// Normalizes raw tool descriptors into canonical records.
///
/// Never fails: a schema that cannot be deserialized is reported through the
/// sink and replaced with an empty schema so the rest of the catalog survives.
#[must_use]
pub fn normalize(raw_tools: Vec<RawTool>, sink: &dyn DiagnosticSink) -> Vec<ToolRecord> {
    raw_tools
        .into_iter()
        .map(|tool| {
            let schema = resolve_schema(&tool.name, tool.input_schema, sink);
            ToolRecord {
                name: tool.name,
                description: tool.description,
                parameters: schema,
            }
        })
        .collect()
}

/// Resolves a raw schema into the normalized object form.
fn resolve_schema(
    tool_name: &str,
    raw: Option<RawSchema>,
    sink: &dyn DiagnosticSink,
) -> ParameterSchema {
    let schema = match raw {
        None => Map::new(),
        Some(RawSchema::Inline(map)) => map,
        Some(RawSchema::Encoded(text)) => match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                sink.emit(&DiagnosticEvent::SchemaParseFailure {
                    tool: tool_name.to_string(),
                    message: format!("expected schema object, got {}", json_type_name(&other)),
                });
                Map::new()
            }
            Err(err) => {
                sink.emit(&DiagnosticEvent::SchemaParseFailure {
                    tool: tool_name.to_string(),
                    message: err.to_string(),
                });
                Map::new()
            }
        },
    };
    ParameterSchema {
        kind: "object".to_string(),
        properties: schema
            .get("properties")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default(),
        required: schema
            .get("required")
            .and_then(Value::as_array)
            .map(|entries| {
                entries.iter().filter_map(Value::as_str).map(str::to_string).collect()
            })
            .unwrap_or_default(),
    }
}

/// Returns a stable label for a JSON value's type.
const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// SECTION: Filtering
// ============================================================================

/// Filters records by an optional action allow-list.
///
/// `None` returns all records unchanged. `Some` keeps only records whose name
/// matches one of the actions' wire names, preserving catalog order; actions
/// absent from the catalog yield no entry rather than an error.
#[must_use]
pub fn filter_actions(records: Vec<ToolRecord>, actions: Option<&[Action]>) -> Vec<ToolRecord> {
    let Some(actions) = actions else {
        return records;
    };
    records
        .into_iter()
        .filter(|record| actions.iter().any(|action| action.as_str() == record.name))
        .collect()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
