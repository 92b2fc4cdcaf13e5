// crates/ticketbridge-adapters/src/structured.rs
// ============================================================================
// Module: Structured Tools
// Description: Self-contained tool objects with sync and async entrypoints.
// Purpose: Emit the best-effort dialect where failures are data, not errors.
// Dependencies: ticketbridge-core, serde_json, tokio
// ============================================================================

//! ## Overview
//! Structured tools are independently invocable objects with both an
//! asynchronous and a synchronous entrypoint. This dialect's framework
//! contract expects best-effort results: dispatch failures and timeouts come
//! back as error-shaped result objects labelled with the tool's name, never
//! as raised errors, so one misbehaving tool cannot abort a larger
//! orchestration run.
//!
//! ## Invariants
//! - The asynchronous call is capped at [`STRUCTURED_CALL_TIMEOUT`].
//! - The synchronous entrypoint has two explicit scheduling branches: with an
//!   active runtime it schedules onto that runtime; without one it builds a
//!   throwaway current-thread runtime. Inside a runtime the multi-thread
//!   flavor is required.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use serde_json::Map;
use serde_json::Value;
use serde_json::json;
use ticketbridge_core::Action;
use ticketbridge_core::BridgeClient;
use ticketbridge_core::BridgeError;
use ticketbridge_core::ParamSchema;
use tokio::runtime::Builder;
use tokio::runtime::Handle;

use crate::projector::ProjectedTool;
use crate::projector::project;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Cap applied by the synchronous entrypoint to the asynchronous call.
pub const STRUCTURED_CALL_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// SECTION: Structured Tool
// ============================================================================

/// Self-contained, independently invocable tool object.
pub struct StructuredTool {
    /// Tool name, verbatim from the canonical record.
    name: String,
    /// Tool description, verbatim from the canonical record.
    description: String,
    /// Generated parameter schema.
    schema: ParamSchema,
    /// Resolved action identifier for dispatch.
    action: Action,
    /// SDK client used for dispatch.
    client: Arc<BridgeClient>,
}

impl StructuredTool {
    /// Wraps a projected tool for this dialect.
    fn from_projected(tool: ProjectedTool, client: Arc<BridgeClient>) -> Self {
        Self {
            name: tool.record.name,
            description: tool.record.description,
            schema: tool.schema,
            action: tool.action,
            client,
        }
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

    /// Invokes the tool asynchronously with the timeout cap.
    ///
    /// Never fails: timeouts and dispatch failures are returned as
    /// error-shaped result objects labelled with the tool's name.
    pub async fn call_async(&self, params: Map<String, Value>) -> Value {
        let dispatch = self.client.execute_action(self.action, params);
        match tokio::time::timeout(STRUCTURED_CALL_TIMEOUT, dispatch).await {
            Ok(Ok(value)) => value,
            Ok(Err(err)) => error_result(format!("Failed to execute {}: {err}", self.name)),
            Err(_) => error_result(format!("Tool {} timed out after 30 seconds", self.name)),
        }
    }

    /// Invokes the tool synchronously.
    ///
    /// With a cooperative scheduler already active in the caller's context,
    /// the asynchronous path is scheduled onto it; otherwise a throwaway
    /// current-thread runtime drives it. Both branches share the async
    /// path's semantics.
    #[must_use]
    pub fn call(&self, params: Map<String, Value>) -> Value {
        match Handle::try_current() {
            Ok(handle) => {
                tokio::task::block_in_place(|| handle.block_on(self.call_async(params)))
            }
            Err(_) => match Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => runtime.block_on(self.call_async(params)),
                Err(err) => {
                    error_result(format!("Failed to execute {}: {err}", self.name))
                }
            },
        }
    }
}

/// Builds an error-shaped result object.
fn error_result(message: String) -> Value {
    json!({"error": message})
}

// ============================================================================
// SECTION: Tool Set
// ============================================================================

/// Tool set producing structured tools.
pub struct StructuredToolSet {
    /// SDK client shared by all produced tools.
    client: Arc<BridgeClient>,
}

impl StructuredToolSet {
    /// Builds the tool set over a shared client.
    #[must_use]
    pub const fn new(client: Arc<BridgeClient>) -> Self {
        Self {
            client,
        }
    }

    /// Projects the filtered catalog into structured tools.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError`] when the catalog fetch or action resolution
    /// fails. Tool construction itself cannot fail in this dialect.
    pub async fn get_tools(
        &self,
        actions: Option<&[Action]>,
    ) -> Result<Vec<StructuredTool>, BridgeError> {
        let projected = project(&self.client, actions).await?;
        Ok(projected
            .into_iter()
            .map(|tool| StructuredTool::from_projected(tool, self.client.clone()))
            .collect())
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
