// crates/ticketbridge-adapters/src/functions.rs
// ============================================================================
// Module: Flat Function Specs
// Description: Function-calling descriptors for completion-model requests.
// Purpose: Emit the flat {type, function} schema payload dialect.
// Dependencies: ticketbridge-core, serde, serde_json
// ============================================================================

//! ## Overview
//! This dialect produces plain descriptors with exactly two top-level keys,
//! `type` (always the literal `"function"`) and `function`, ready to embed in
//! a completion-model request payload. The descriptors carry no executable
//! binding of their own; callers feed model-chosen calls back through
//! [`FunctionToolSet::execute_call`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use ticketbridge_core::Action;
use ticketbridge_core::BridgeClient;
use ticketbridge_core::BridgeError;

use crate::projector::project;

// ============================================================================
// SECTION: Descriptor Types
// ============================================================================

/// Flat function-calling descriptor.
///
/// # Invariants
/// - Serializes with exactly the top-level keys `type` and `function`.
/// - `kind` is always the literal `"function"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSpec {
    /// Descriptor kind, always `"function"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Function declaration payload.
    pub function: FunctionDecl,
}

/// Function declaration within a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDecl {
    /// Function name, verbatim from the canonical record.
    pub name: String,
    /// Function description, verbatim from the canonical record.
    pub description: String,
    /// JSON Schema for the function arguments.
    pub parameters: Value,
}

// ============================================================================
// SECTION: Tool Set
// ============================================================================

/// Tool set producing flat function specs.
pub struct FunctionToolSet {
    /// SDK client used for catalog fetch and dispatch.
    client: Arc<BridgeClient>,
    /// Credential for the downstream completion-model provider.
    completion_api_key: String,
}

impl std::fmt::Debug for FunctionToolSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionToolSet").finish_non_exhaustive()
    }
}

impl FunctionToolSet {
    /// Builds the tool set, validating the completion-provider credential.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Authentication`] when the completion credential
    /// is missing or empty.
    pub fn new(
        client: Arc<BridgeClient>,
        completion_api_key: impl Into<String>,
    ) -> Result<Self, BridgeError> {
        let completion_api_key = completion_api_key.into();
        if completion_api_key.trim().is_empty() {
            return Err(BridgeError::Authentication(
                "completion provider api key is required and must be non-empty".to_string(),
            ));
        }
        Ok(Self {
            client,
            completion_api_key,
        })
    }

    /// Returns the completion-provider credential for request construction.
    #[must_use]
    pub fn completion_api_key(&self) -> &str {
        &self.completion_api_key
    }

    /// Projects the filtered catalog into flat function specs.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError`] when the catalog fetch or action resolution
    /// fails.
    pub async fn get_tools(
        &self,
        actions: Option<&[Action]>,
    ) -> Result<Vec<FunctionSpec>, BridgeError> {
        let projected = project(&self.client, actions).await?;
        Ok(projected
            .into_iter()
            .map(|tool| FunctionSpec {
                kind: "function".to_string(),
                function: FunctionDecl {
                    name: tool.record.name,
                    description: tool.record.description,
                    parameters: tool.schema.to_json_schema(),
                },
            })
            .collect())
    }

    /// Executes a model-chosen function call.
    ///
    /// `arguments` is the serialized JSON object the model produced for the
    /// call; this is the execution binding for callers consuming the flat
    /// descriptors.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::UnknownAction`] for unrecognized names and
    /// [`BridgeError::Execution`] for argument or dispatch failures.
    pub async fn execute_call(&self, name: &str, arguments: &str) -> Result<Value, BridgeError> {
        let action = Action::resolve(name)?;
        let params = serde_json::from_str::<serde_json::Map<String, Value>>(arguments)
            .map_err(|err| BridgeError::Execution(format!("invalid function arguments: {err}")))?;
        self.client.execute_action(action, params).await
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
