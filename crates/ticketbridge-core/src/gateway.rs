// crates/ticketbridge-core/src/gateway.rs
// ============================================================================
// Module: Session Gateway
// Description: Session contract and HTTP JSON-RPC gateway to the tool server.
// Purpose: Own the single logical connection used for catalog and dispatch.
// Dependencies: async-trait, reqwest, serde, serde_json
// ============================================================================

//! ## Overview
//! The session gateway owns one logical connection to the remote tool server
//! and exposes the four operations the SDK consumes: connect, list tools,
//! call tool, and cleanup. The HTTP implementation speaks JSON-RPC 2.0 with
//! an `apikey` header and a response-size cap. The connection is established
//! explicitly and is not re-established automatically if it drops; callers
//! detect a dispatch failure and reconnect or rebuild the client.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::catalog::RawTool;
use crate::config::ClientConfig;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum size of tool server responses (bytes).
const MAX_RESPONSE_BYTES: usize = 1024 * 1024;
/// Protocol version announced during the initialize handshake.
const PROTOCOL_VERSION: &str = "2025-06-18";
/// Client name announced during the initialize handshake.
const CLIENT_NAME: &str = "ticketbridge";

// ============================================================================
// SECTION: Gateway Contract
// ============================================================================

/// Session gateway interface consumed by the SDK client.
#[async_trait]
pub trait SessionGateway: Send + Sync {
    /// Establishes the transport session and capability handshake.
    async fn connect(&self) -> Result<Vec<String>, GatewayError>;

    /// Lists raw tool descriptors advertised by the server.
    async fn list_tools(&self) -> Result<Vec<RawTool>, GatewayError>;

    /// Invokes a tool by name with a JSON arguments object.
    async fn call_tool(&self, name: &str, arguments: Value)
    -> Result<CallToolResult, GatewayError>;

    /// Releases held resources; idempotent.
    async fn cleanup(&self) -> Result<(), GatewayError>;
}

/// Result envelope returned by a tool invocation.
///
/// # Invariants
/// - `structured_content`, when present and non-empty, is preferred over the
///   raw content list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallToolResult {
    /// Pre-parsed result payload, preferred when present.
    #[serde(default, rename = "structuredContent")]
    pub structured_content: Option<Value>,
    /// Raw content items emitted by the tool.
    #[serde(default)]
    pub content: Vec<ContentItem>,
}

/// Content item variants within a tool result.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentItem {
    /// Text payload holding serialized JSON.
    Text {
        /// Serialized payload text.
        text: String,
    },
    /// Content kinds this SDK does not consume.
    #[serde(other)]
    Other,
}

/// Gateway transport and protocol errors.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Transport-level failure (connect, send, read).
    #[error("transport failure: {0}")]
    Transport(String),
    /// Response violated the JSON-RPC or result envelope contract.
    #[error("protocol failure: {0}")]
    Protocol(String),
    /// Server returned a JSON-RPC error payload.
    #[error("server error: {0}")]
    Remote(String),
}

// ============================================================================
// SECTION: JSON-RPC Envelopes
// ============================================================================

/// JSON-RPC request envelope for tool server calls.
#[derive(Debug, Serialize)]
struct JsonRpcRequest {
    /// JSON-RPC protocol version.
    jsonrpc: &'static str,
    /// Request identifier.
    id: u64,
    /// Remote method name.
    method: String,
    /// Request parameters payload.
    params: Value,
}

/// JSON-RPC response envelope for tool server calls.
#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    /// Successful result payload.
    result: Option<Value>,
    /// Error payload when the request fails.
    error: Option<JsonRpcError>,
}

/// JSON-RPC error payload.
#[derive(Debug, Deserialize)]
struct JsonRpcError {
    /// Human-readable error message.
    message: String,
}

/// Result payload for `tools/list`.
#[derive(Debug, Deserialize)]
struct ListToolsResult {
    /// Raw tool descriptors.
    #[serde(default)]
    tools: Vec<RawTool>,
}

// ============================================================================
// SECTION: HTTP Gateway
// ============================================================================

/// HTTP JSON-RPC session gateway.
///
/// # Invariants
/// - Request identifiers increase monotonically within one gateway instance.
pub struct HttpSessionGateway {
    /// Tool server endpoint URL.
    url: String,
    /// Access-key credential sent as the `apikey` header.
    api_key: String,
    /// HTTP client with configured timeouts.
    client: reqwest::Client,
    /// JSON-RPC request id counter.
    next_id: AtomicU64,
}

impl HttpSessionGateway {
    /// Builds a gateway from a validated client configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when the HTTP client cannot be
    /// constructed.
    pub fn from_config(config: &ClientConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|_| GatewayError::Transport("http client build failed".to_string()))?;
        Ok(Self {
            url: config.server_url.clone(),
            api_key: config.api_key.clone(),
            client,
            next_id: AtomicU64::new(1),
        })
    }

    /// Executes one JSON-RPC call and decodes the response envelope.
    async fn call(&self, method: &str, params: Value) -> Result<Value, GatewayError> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method: method.to_string(),
            params,
        };
        let response = self
            .client
            .post(&self.url)
            .header("apikey", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|err| map_send_error(&err))?;
        if !response.status().is_success() {
            return Err(GatewayError::Transport(format!(
                "http request failed with status {}",
                response.status()
            )));
        }
        let max_bytes_u64 = u64::try_from(MAX_RESPONSE_BYTES).unwrap_or(u64::MAX);
        if let Some(length) = response.content_length()
            && length > max_bytes_u64
        {
            return Err(GatewayError::Protocol("response too large".to_string()));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|_| GatewayError::Transport("http response read failed".to_string()))?;
        if bytes.len() > MAX_RESPONSE_BYTES {
            return Err(GatewayError::Protocol("response too large".to_string()));
        }
        let envelope: JsonRpcResponse = serde_json::from_slice(&bytes)
            .map_err(|_| GatewayError::Protocol("invalid json-rpc response".to_string()))?;
        if let Some(error) = envelope.error {
            return Err(GatewayError::Remote(error.message));
        }
        envelope
            .result
            .ok_or_else(|| GatewayError::Protocol("missing json-rpc result".to_string()))
    }
}

#[async_trait]
impl SessionGateway for HttpSessionGateway {
    async fn connect(&self) -> Result<Vec<String>, GatewayError> {
        let params = serde_json::json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {},
            "clientInfo": {"name": CLIENT_NAME, "version": env!("CARGO_PKG_VERSION")},
        });
        let _ = self.call("initialize", params).await?;
        let tools = self.list_tools().await?;
        Ok(tools.into_iter().map(|tool| tool.name).collect())
    }

    async fn list_tools(&self) -> Result<Vec<RawTool>, GatewayError> {
        let result = self.call("tools/list", serde_json::json!({})).await?;
        let listing: ListToolsResult = serde_json::from_value(result)
            .map_err(|_| GatewayError::Protocol("invalid tools/list result".to_string()))?;
        Ok(listing.tools)
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<CallToolResult, GatewayError> {
        let params = serde_json::json!({"name": name, "arguments": arguments});
        let result = self.call("tools/call", params).await?;
        serde_json::from_value(result)
            .map_err(|_| GatewayError::Protocol("invalid tools/call result".to_string()))
    }

    async fn cleanup(&self) -> Result<(), GatewayError> {
        // Stateless HTTP transport; nothing beyond dropping the client.
        Ok(())
    }
}

/// Maps reqwest send errors to stable transport error messages.
fn map_send_error(error: &reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Transport("http request timed out".to_string())
    } else if error.is_connect() {
        GatewayError::Transport("http connect failed".to_string())
    } else {
        GatewayError::Transport("http request failed".to_string())
    }
}
