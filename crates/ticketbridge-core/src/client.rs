// crates/ticketbridge-core/src/client.rs
// ============================================================================
// Module: SDK Client
// Description: Catalog retrieval and action dispatch over one session.
// Purpose: Own the lazy session lifecycle and the result-unwrapping rules.
// Dependencies: serde_json, tokio
// ============================================================================

//! ## Overview
//! [`BridgeClient`] composes the session gateway, catalog normalization, and
//! action dispatch. The session is established lazily and exactly once on
//! first use; transport failures surface as domain execution errors with the
//! original message preserved, never as raw transport types.
//!
//! ## Invariants
//! - Construction validates the access key before any network access.
//! - Catalog records are rebuilt on every fetch; nothing is cached here.
//! - Dispatch failures are logged with the failing action name.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde_json::Map;
use serde_json::Value;
use tokio::sync::OnceCell;

use crate::action::Action;
use crate::catalog;
use crate::catalog::ToolRecord;
use crate::config::ClientConfig;
use crate::config::ConfigError;
use crate::diagnostics::DiagnosticEvent;
use crate::diagnostics::DiagnosticSink;
use crate::diagnostics::NoopDiagnosticSink;
use crate::error::BridgeError;
use crate::gateway::CallToolResult;
use crate::gateway::ContentItem;
use crate::gateway::HttpSessionGateway;
use crate::gateway::SessionGateway;

// ============================================================================
// SECTION: Client
// ============================================================================

/// SDK client owning one logical connection to the remote tool server.
pub struct BridgeClient {
    /// Session gateway for transport operations.
    gateway: Arc<dyn SessionGateway>,
    /// Diagnostics sink for catalog and dispatch events.
    sink: Arc<dyn DiagnosticSink>,
    /// Lazily established session marker.
    session: OnceCell<()>,
}

impl std::fmt::Debug for BridgeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeClient").finish_non_exhaustive()
    }
}

impl BridgeClient {
    /// Builds a client over the HTTP gateway from a configuration.
    ///
    /// Validation happens synchronously here, before any network access.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Authentication`] when the access key is missing
    /// or empty, and [`BridgeError::Execution`] for other invalid settings.
    pub fn new(config: &ClientConfig) -> Result<Self, BridgeError> {
        config.validate().map_err(map_config_error)?;
        let gateway = HttpSessionGateway::from_config(config)
            .map_err(|err| BridgeError::Execution(err.to_string()))?;
        Ok(Self::with_gateway(Arc::new(gateway), Arc::new(NoopDiagnosticSink)))
    }

    /// Builds a client over a caller-supplied gateway and sink.
    ///
    /// The gateway owns its own credentials in this form.
    #[must_use]
    pub fn with_gateway(gateway: Arc<dyn SessionGateway>, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            gateway,
            sink,
            session: OnceCell::new(),
        }
    }

    /// Replaces the diagnostics sink.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Establishes the session explicitly.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Execution`] when the handshake fails.
    pub async fn connect(&self) -> Result<(), BridgeError> {
        self.ensure_connected().await
    }

    /// Establishes the session lazily, exactly once.
    async fn ensure_connected(&self) -> Result<(), BridgeError> {
        self.session
            .get_or_try_init(|| async {
                let tools = self
                    .gateway
                    .connect()
                    .await
                    .map_err(|err| BridgeError::Execution(format!("Failed to connect: {err}")))?;
                self.sink.emit(&DiagnosticEvent::Connected {
                    tools,
                });
                Ok::<(), BridgeError>(())
            })
            .await?;
        Ok(())
    }

    /// Fetches the normalized, optionally filtered tool catalog.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Execution`] when the catalog fetch fails.
    pub async fn get_tools(
        &self,
        actions: Option<&[Action]>,
    ) -> Result<Vec<ToolRecord>, BridgeError> {
        self.ensure_connected().await?;
        let raw = self
            .gateway
            .list_tools()
            .await
            .map_err(|err| BridgeError::Execution(format!("Failed to fetch tools: {err}")))?;
        let records = catalog::filter_actions(catalog::normalize(raw, self.sink.as_ref()), actions);
        self.sink.emit(&DiagnosticEvent::ToolsFetched {
            count: records.len(),
        });
        Ok(records)
    }

    /// Executes an action with the given parameter map.
    ///
    /// Result unwrapping, in priority order: a non-empty structured-content
    /// payload is returned as-is; otherwise every text content item is parsed
    /// from its serialized form and collected, and a single-element collection
    /// is unwrapped to the bare element.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Execution`] for any invocation failure; the
    /// message starts with `Failed to execute action:`.
    pub async fn execute_action(
        &self,
        action: Action,
        params: Map<String, Value>,
    ) -> Result<Value, BridgeError> {
        self.ensure_connected().await?;
        let outcome = self.dispatch(action, params).await;
        match outcome {
            Ok(value) => {
                self.sink.emit(&DiagnosticEvent::ActionExecuted {
                    action,
                });
                Ok(value)
            }
            Err(message) => {
                self.sink.emit(&DiagnosticEvent::ActionFailed {
                    action,
                    message: message.clone(),
                });
                Err(BridgeError::Execution(format!("Failed to execute action: {message}")))
            }
        }
    }

    /// Dispatches the call and unwraps the result envelope.
    async fn dispatch(
        &self,
        action: Action,
        params: Map<String, Value>,
    ) -> Result<Value, String> {
        let result = self
            .gateway
            .call_tool(action.as_str(), Value::Object(params))
            .await
            .map_err(|err| err.to_string())?;
        unwrap_result(result)
    }

    /// Releases the session and associated resources; idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Execution`] when resource release fails.
    pub async fn cleanup(&self) -> Result<(), BridgeError> {
        self.gateway
            .cleanup()
            .await
            .map_err(|err| BridgeError::Execution(format!("Failed to clean up: {err}")))
    }
}

// ============================================================================
// SECTION: Result Unwrapping
// ============================================================================

/// Unwraps a tool result envelope into a single structured value.
fn unwrap_result(result: CallToolResult) -> Result<Value, String> {
    if let Some(structured) = result.structured_content
        && !structured_is_empty(&structured)
    {
        return Ok(structured);
    }
    let mut collected = Vec::new();
    for item in result.content {
        if let ContentItem::Text {
            text,
        } = item
        {
            let value: Value = serde_json::from_str(&text)
                .map_err(|err| format!("invalid text content: {err}"))?;
            collected.push(value);
        }
    }
    // Single-result tools hand back the value directly; multi-result tools
    // hand back the list.
    if collected.len() == 1 {
        return Ok(collected.swap_remove(0));
    }
    Ok(Value::Array(collected))
}

/// Returns true when a structured-content payload counts as empty.
fn structured_is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(entries) => entries.is_empty(),
        Value::String(text) => text.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Maps configuration errors into the domain taxonomy.
fn map_config_error(error: ConfigError) -> BridgeError {
    match error {
        ConfigError::MissingApiKey => BridgeError::Authentication(error.to_string()),
        other => BridgeError::Execution(format!("invalid configuration: {other}")),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
