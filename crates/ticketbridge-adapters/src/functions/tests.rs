// crates/ticketbridge-adapters/src/functions/tests.rs
// ============================================================================
// Module: Flat Function Spec Unit Tests
// Description: Unit tests for descriptor shape and call execution.
// Purpose: Validate the two-key payload contract and the execution binding.
// Dependencies: ticketbridge-adapters, async-trait, serde_json, tokio
// ============================================================================

//! ## Overview
//! Exercises descriptor production and the model-call execution binding
//! against an in-memory gateway stub: exact top-level key set, schema
//! round-trip of required and optional fields, credential validation, and
//! argument-parsing failures.

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::panic,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;
use ticketbridge_core::CallToolResult;
use ticketbridge_core::ContentItem;
use ticketbridge_core::GatewayError;
use ticketbridge_core::NoopDiagnosticSink;
use ticketbridge_core::RawSchema;
use ticketbridge_core::RawTool;
use ticketbridge_core::SessionGateway;

use super::*;

// ============================================================================
// SECTION: Test Fixtures
// ============================================================================

/// In-memory gateway stub recording the last tool-call arguments.
struct StubGateway {
    /// Raw tools returned by `list_tools`.
    tools: Vec<RawTool>,
    /// Arguments from the most recent `call_tool`.
    last_arguments: Mutex<Option<Value>>,
}

impl StubGateway {
    fn new(tools: Vec<RawTool>) -> Self {
        Self {
            tools,
            last_arguments: Mutex::new(None),
        }
    }
}

#[async_trait]
impl SessionGateway for StubGateway {
    async fn connect(&self) -> Result<Vec<String>, GatewayError> {
        Ok(self.tools.iter().map(|tool| tool.name.clone()).collect())
    }

    async fn list_tools(&self) -> Result<Vec<RawTool>, GatewayError> {
        Ok(self.tools.clone())
    }

    async fn call_tool(
        &self,
        _name: &str,
        arguments: Value,
    ) -> Result<CallToolResult, GatewayError> {
        *self.last_arguments.lock().expect("lock") = Some(arguments);
        Ok(CallToolResult {
            structured_content: None,
            content: vec![ContentItem::Text {
                text: r#"{"status":"ok"}"#.to_string(),
            }],
        })
    }

    async fn cleanup(&self) -> Result<(), GatewayError> {
        Ok(())
    }
}

fn schema_tool(name: &str, schema: Value) -> RawTool {
    RawTool {
        name: name.to_string(),
        description: format!("{name} tool"),
        input_schema: schema.as_object().cloned().map(RawSchema::Inline),
    }
}

fn tool_set(tools: Vec<RawTool>) -> (Arc<StubGateway>, FunctionToolSet) {
    let gateway = Arc::new(StubGateway::new(tools));
    let client = Arc::new(BridgeClient::with_gateway(
        gateway.clone(),
        Arc::new(NoopDiagnosticSink),
    ));
    let set = FunctionToolSet::new(client, "completion-key").expect("tool set");
    (gateway, set)
}

// ============================================================================
// SECTION: Construction Tests
// ============================================================================

#[test]
fn empty_completion_credential_is_rejected() {
    let gateway = Arc::new(StubGateway::new(vec![]));
    let client = Arc::new(BridgeClient::with_gateway(gateway, Arc::new(NoopDiagnosticSink)));
    let err = FunctionToolSet::new(client, "  ").expect_err("must fail");
    assert!(matches!(err, BridgeError::Authentication(_)));
}

#[test]
fn completion_credential_is_exposed_for_request_construction() {
    let (_gateway, set) = tool_set(vec![]);
    assert_eq!(set.completion_api_key(), "completion-key");
}

// ============================================================================
// SECTION: Descriptor Tests
// ============================================================================

#[tokio::test]
async fn descriptors_carry_exactly_type_and_function_keys() {
    let (_gateway, set) = tool_set(vec![schema_tool(
        "create_ticket",
        json!({
            "properties": {
                "a": {"type": "string"},
                "b": {"type": "integer"},
                "c": {"type": "boolean"},
            },
            "required": ["a", "b"],
        }),
    )]);

    let specs = set.get_tools(None).await.expect("tools");
    assert_eq!(specs.len(), 1);

    let payload = serde_json::to_value(&specs[0]).expect("serialize");
    let object = payload.as_object().expect("object");
    let keys: Vec<&str> = object.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["type", "function"]);
    assert_eq!(object["type"], json!("function"));

    let parameters = &object["function"]["parameters"];
    assert_eq!(parameters["type"], json!("object"));
    assert_eq!(parameters["required"], json!(["a", "b"]));
    let properties = parameters["properties"].as_object().expect("properties");
    assert_eq!(properties.len(), 3);
    assert_eq!(properties["b"]["type"], json!("integer"));
    assert_eq!(properties["c"]["type"], json!("boolean"));
}

#[tokio::test]
async fn repeated_projection_is_stable() {
    let (_gateway, set) = tool_set(vec![
        schema_tool("list_tickets", json!({})),
        schema_tool("health_check", json!({})),
    ]);

    let first = set.get_tools(None).await.expect("tools");
    let second = set.get_tools(None).await.expect("tools");
    assert_eq!(first, second);
}

// ============================================================================
// SECTION: Execution Tests
// ============================================================================

#[tokio::test]
async fn execute_call_dispatches_parsed_arguments() {
    let (gateway, set) = tool_set(vec![schema_tool("create_ticket", json!({}))]);

    let value = set
        .execute_call("create_ticket", r#"{"name":"printer on fire"}"#)
        .await
        .expect("execute");
    assert_eq!(value, json!({"status": "ok"}));

    let sent = gateway.last_arguments.lock().expect("lock").clone().expect("arguments");
    assert_eq!(sent, json!({"name": "printer on fire"}));
}

#[tokio::test]
async fn execute_call_rejects_unknown_names() {
    let (_gateway, set) = tool_set(vec![]);
    let err = set.execute_call("launch_rocket", "{}").await.expect_err("must fail");
    assert!(matches!(err, BridgeError::UnknownAction(_)));
}

#[tokio::test]
async fn execute_call_rejects_malformed_arguments() {
    let (_gateway, set) = tool_set(vec![schema_tool("create_ticket", json!({}))]);
    let err = set.execute_call("create_ticket", "{broken").await.expect_err("must fail");
    match err {
        BridgeError::Execution(message) => {
            assert!(message.contains("invalid function arguments"));
        }
        other => panic!("unexpected error: {other}"),
    }
}
