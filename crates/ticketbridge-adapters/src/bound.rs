// crates/ticketbridge-adapters/src/bound.rs
// ============================================================================
// Module: Bound Tools
// Description: Tool objects bound by reference with pre-dispatch validation.
// Purpose: Emit the strict dialect where failures propagate as errors.
// Dependencies: ticketbridge-core, jsonschema, serde_json
// ============================================================================

//! ## Overview
//! Bound tools hold their dispatch client by reference and validate actual
//! parameters against the generated schema before the remote call is
//! attempted, giving callers a fast, clearly-attributed rejection. Unlike the
//! structured dialect, every failure here is raised as a domain error.
//!
//! An alternate calling convention is tolerated: when the parameter map
//! nests the real parameters inside a `properties` field as a serialized
//! string, that string is deserialized and replaces the top-level map before
//! validation and dispatch.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use jsonschema::Validator;
use serde_json::Map;
use serde_json::Value;
use ticketbridge_core::Action;
use ticketbridge_core::BridgeClient;
use ticketbridge_core::BridgeError;
use ticketbridge_core::ParamSchema;
use ticketbridge_core::validate_payload;

use crate::projector::ProjectedTool;
use crate::projector::project;

// ============================================================================
// SECTION: Bound Tool
// ============================================================================

/// Tool object bound by reference to its dispatch client.
pub struct BoundTool {
    /// Tool name, verbatim from the canonical record.
    name: String,
    /// Tool description, verbatim from the canonical record.
    description: String,
    /// Generated parameter schema.
    schema: ParamSchema,
    /// Compiled validator for pre-dispatch validation.
    validator: Validator,
    /// Resolved action identifier for dispatch.
    action: Action,
    /// SDK client used for dispatch.
    client: Arc<BridgeClient>,
}

impl BoundTool {
    /// Wraps a projected tool, compiling its validator once.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Execution`] when the generated schema fails to
    /// compile.
    fn from_projected(tool: ProjectedTool, client: Arc<BridgeClient>) -> Result<Self, BridgeError> {
        let validator = tool.schema.compile()?;
        Ok(Self {
            name: tool.record.name,
            description: tool.record.description,
            schema: tool.schema,
            validator,
            action: tool.action,
            client,
        })
    }

    /// Returns the tool name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the tool description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the declared argument contract as JSON Schema.
    #[must_use]
    pub fn parameters_schema(&self) -> Value {
        self.schema.to_json_schema()
    }

    /// Invokes the tool asynchronously.
    ///
    /// The alternate `properties`-string convention is applied first, then
    /// the actual parameters are validated against the generated schema
    /// before dispatch.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Execution`] for nested-payload deserialization
    /// failures, validation failures, and dispatch failures.
    pub async fn invoke(&self, params: Map<String, Value>) -> Result<Value, BridgeError> {
        let params = unnest_properties(params)?;
        validate_payload(&self.name, &self.validator, &Value::Object(params.clone()))?;
        self.client.execute_action(self.action, params).await
    }
}

/// Applies the alternate `properties`-as-serialized-string convention.
fn unnest_properties(params: Map<String, Value>) -> Result<Map<String, Value>, BridgeError> {
    let Some(Value::String(text)) = params.get("properties") else {
        return Ok(params);
    };
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(actual)) => Ok(actual),
        Ok(other) => Err(BridgeError::Execution(format!(
            "Invalid JSON in properties: expected object, got {other}"
        ))),
        Err(err) => Err(BridgeError::Execution(format!("Invalid JSON in properties: {err}"))),
    }
}

// ============================================================================
// SECTION: Tool Set
// ============================================================================

/// Tool set producing bound tools.
pub struct BoundToolSet {
    /// SDK client shared by all produced tools.
    client: Arc<BridgeClient>,
}

impl BoundToolSet {
    /// Builds the tool set over a shared client.
    #[must_use]
    pub const fn new(client: Arc<BridgeClient>) -> Self {
        Self {
            client,
        }
    }

    /// Projects the filtered catalog into bound tools.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError`] when the catalog fetch, action resolution, or
    /// per-tool schema compilation fails.
    pub async fn get_tools(
        &self,
        actions: Option<&[Action]>,
    ) -> Result<Vec<BoundTool>, BridgeError> {
        let projected = project(&self.client, actions).await?;
        projected
            .into_iter()
            .map(|tool| BoundTool::from_projected(tool, self.client.clone()))
            .collect()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
