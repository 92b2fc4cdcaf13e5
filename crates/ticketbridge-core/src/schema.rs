// crates/ticketbridge-core/src/schema.rs
// ============================================================================
// Module: Generated Parameter Schemas
// Description: Typed parameter descriptors built from canonical tool records.
// Purpose: Give every projector one deterministic schema and validation path.
// Dependencies: jsonschema, serde_json
// ============================================================================

//! ## Overview
//! Each tool's validation schema is assembled once from its canonical record
//! as a typed descriptor tree with a fixed set of recognized primitive kinds.
//! Unrecognized or missing type information falls back to opaque text rather
//! than branching ad hoc inside each projector. The emitted JSON Schema is
//! compiled with Draft 2020-12 for pre-dispatch validation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use jsonschema::Draft;
use jsonschema::Validator;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;

use crate::catalog::ParameterSchema;
use crate::error::BridgeError;

// ============================================================================
// SECTION: Descriptor Types
// ============================================================================

/// Recognized primitive parameter kinds.
///
/// # Invariants
/// - Anything outside this set maps to [`ParamKind::Text`] deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Integer parameter.
    Integer,
    /// Boolean parameter.
    Boolean,
    /// Opaque text parameter; also the fallback for unknown kinds.
    Text,
}

impl ParamKind {
    /// Maps a declared JSON Schema type to a recognized kind.
    #[must_use]
    pub fn from_declared(declared: Option<&str>) -> Self {
        match declared {
            Some("integer") => Self::Integer,
            Some("boolean") => Self::Boolean,
            _ => Self::Text,
        }
    }

    /// Returns the JSON Schema type label for the kind.
    #[must_use]
    pub const fn as_schema_type(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Text => "string",
        }
    }
}

/// One parameter descriptor within a generated schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamField {
    /// Property name.
    pub name: String,
    /// Recognized primitive kind.
    pub kind: ParamKind,
    /// Property description when the record carries one.
    pub description: Option<String>,
    /// Whether the property is mandatory.
    pub required: bool,
}

/// Generated parameter schema for one tool.
///
/// Regenerated on every catalog projection; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParamSchema {
    /// Parameter descriptors in catalog property order.
    pub fields: Vec<ParamField>,
}

// ============================================================================
// SECTION: Schema Construction
// ============================================================================

impl ParamSchema {
    /// Builds the descriptor tree from a normalized parameter schema.
    ///
    /// Fields listed in `required` are mandatory; all others are optional
    /// with no default value.
    #[must_use]
    pub fn from_parameters(parameters: &ParameterSchema) -> Self {
        let fields = parameters
            .properties
            .iter()
            .map(|(name, prop)| {
                let declared = prop.get("type").and_then(Value::as_str);
                let description =
                    prop.get("description").and_then(Value::as_str).map(str::to_string);
                ParamField {
                    name: name.clone(),
                    kind: ParamKind::from_declared(declared),
                    description,
                    required: parameters.required.iter().any(|entry| entry == name),
                }
            })
            .collect();
        Self {
            fields,
        }
    }

    /// Emits the schema as a JSON Schema object.
    #[must_use]
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for field in &self.fields {
            let mut prop = Map::new();
            prop.insert("type".to_string(), json!(field.kind.as_schema_type()));
            if let Some(description) = &field.description {
                prop.insert("description".to_string(), json!(description));
            }
            properties.insert(field.name.clone(), Value::Object(prop));
            if field.required {
                required.push(json!(field.name));
            }
        }
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Compiles the emitted JSON Schema for payload validation.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Execution`] when the schema fails to compile.
    pub fn compile(&self) -> Result<Validator, BridgeError> {
        jsonschema::options()
            .with_draft(Draft::Draft202012)
            .build(&self.to_json_schema())
            .map_err(|err| BridgeError::Execution(format!("invalid generated schema: {err}")))
    }
}

// ============================================================================
// SECTION: Payload Validation
// ============================================================================

/// Validates actual parameters against a compiled schema.
///
/// # Errors
///
/// Returns [`BridgeError::Execution`] naming the tool when validation fails.
pub fn validate_payload(
    tool_name: &str,
    validator: &Validator,
    payload: &Value,
) -> Result<(), BridgeError> {
    if validator.is_valid(payload) {
        return Ok(());
    }
    let messages =
        validator.iter_errors(payload).map(|error| error.to_string()).collect::<Vec<_>>();
    Err(BridgeError::Execution(format!(
        "Invalid parameters for {tool_name}: {}",
        messages.join("; ")
    )))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
