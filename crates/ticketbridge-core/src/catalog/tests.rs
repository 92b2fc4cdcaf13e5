// crates/ticketbridge-core/src/catalog/tests.rs
// ============================================================================
// Module: Tool Catalog Unit Tests
// Description: Unit tests for catalog normalization and filtering.
// Purpose: Validate graceful degradation and order-preserving filters.
// Dependencies: ticketbridge-core, serde_json
// ============================================================================

//! ## Overview
//! Exercises normalization across inline, serialized, and malformed schemas,
//! and filtering against the action allow-list.

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::panic,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

use std::sync::Mutex;

use serde_json::json;

use super::*;
use crate::diagnostics::NoopDiagnosticSink;

// ============================================================================
// SECTION: Test Fixtures
// ============================================================================

/// Sink that records every emitted event for assertions.
#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl RecordingSink {
    fn parse_failures(&self) -> Vec<(String, String)> {
        self.events
            .lock()
            .expect("lock")
            .iter()
            .filter_map(|event| match event {
                DiagnosticEvent::SchemaParseFailure {
                    tool,
                    message,
                } => Some((tool.clone(), message.clone())),
                _ => None,
            })
            .collect()
    }
}

impl DiagnosticSink for RecordingSink {
    fn emit(&self, event: &DiagnosticEvent) {
        self.events.lock().expect("lock").push(event.clone());
    }
}

fn raw_tool(name: &str, schema: Option<RawSchema>) -> RawTool {
    RawTool {
        name: name.to_string(),
        description: format!("{name} description"),
        input_schema: schema,
    }
}

fn inline_schema(value: serde_json::Value) -> Option<RawSchema> {
    match value {
        serde_json::Value::Object(map) => Some(RawSchema::Inline(map)),
        _ => panic!("inline schema must be an object"),
    }
}

// ============================================================================
// SECTION: Normalization Tests
// ============================================================================

#[test]
fn normalize_copies_properties_and_required_from_inline_schema() {
    let sink = RecordingSink::default();
    let schema = inline_schema(json!({
        "type": "object",
        "properties": {
            "name": {"type": "string", "description": "Ticket name"},
            "count": {"type": "integer"}
        },
        "required": ["name"]
    }));
    let records = normalize(vec![raw_tool("create_ticket", schema)], &sink);

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.name, "create_ticket");
    assert_eq!(record.parameters.kind, "object");
    assert_eq!(record.parameters.properties.len(), 2);
    assert_eq!(record.parameters.required, vec!["name".to_string()]);
    assert!(sink.parse_failures().is_empty());
}

#[test]
fn normalize_deserializes_string_encoded_schemas() {
    let sink = RecordingSink::default();
    let encoded = RawSchema::Encoded(
        r#"{"type":"object","properties":{"id":{"type":"string"}},"required":["id"]}"#.to_string(),
    );
    let records = normalize(vec![raw_tool("list_tickets", Some(encoded))], &sink);

    assert_eq!(records[0].parameters.required, vec!["id".to_string()]);
    assert!(records[0].parameters.properties.contains_key("id"));
    assert!(sink.parse_failures().is_empty());
}

#[test]
fn normalize_substitutes_empty_schema_on_malformed_string() {
    let sink = RecordingSink::default();
    let records = normalize(
        vec![
            raw_tool("broken_tool", Some(RawSchema::Encoded("{not json".to_string()))),
            raw_tool("health_check", inline_schema(json!({"type": "object"}))),
        ],
        &sink,
    );

    // The malformed tool degrades; the rest of the catalog survives.
    assert_eq!(records.len(), 2);
    assert!(records[0].parameters.properties.is_empty());
    assert!(records[0].parameters.required.is_empty());
    assert_eq!(records[0].parameters.kind, "object");

    let failures = sink.parse_failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, "broken_tool");
}

#[test]
fn normalize_rejects_non_object_encoded_schema() {
    let sink = RecordingSink::default();
    let records =
        normalize(vec![raw_tool("odd_tool", Some(RawSchema::Encoded("[1,2]".to_string())))], &sink);

    assert!(records[0].parameters.properties.is_empty());
    let failures = sink.parse_failures();
    assert_eq!(failures.len(), 1);
    assert!(failures[0].1.contains("array"));
}

#[test]
fn normalize_defaults_missing_schema_to_empty_object_form() {
    let sink = RecordingSink::default();
    let records = normalize(vec![raw_tool("health_check", None)], &sink);

    assert_eq!(records[0].parameters, ParameterSchema::empty());
    assert!(sink.parse_failures().is_empty());
}

#[test]
fn normalized_schema_serializes_with_type_field() {
    let value = serde_json::to_value(ParameterSchema::empty()).expect("serialize");
    assert_eq!(value, json!({"type": "object", "properties": {}, "required": []}));
}

// ============================================================================
// SECTION: Filtering Tests
// ============================================================================

fn four_tool_catalog() -> Vec<ToolRecord> {
    let sink = NoopDiagnosticSink;
    normalize(
        vec![
            raw_tool("list_services", None),
            raw_tool("create_ticket", None),
            raw_tool("list_tickets", None),
            raw_tool("health_check", None),
        ],
        &sink,
    )
}

#[test]
fn filter_none_returns_all_records_in_order() {
    let records = filter_actions(four_tool_catalog(), None);
    let names: Vec<&str> = records.iter().map(|record| record.name.as_str()).collect();
    assert_eq!(names, vec!["list_services", "create_ticket", "list_tickets", "health_check"]);
}

#[test]
fn filter_keeps_only_matching_records_in_catalog_order() {
    let records = filter_actions(
        four_tool_catalog(),
        Some(&[Action::CreateTicket, Action::HealthCheck]),
    );
    let names: Vec<&str> = records.iter().map(|record| record.name.as_str()).collect();
    assert_eq!(names, vec!["create_ticket", "health_check"]);
}

#[test]
fn filter_by_absent_action_yields_empty_result() {
    let records = filter_actions(four_tool_catalog(), Some(&[Action::ListCollections]));
    assert!(records.is_empty());
}
