// crates/ticketbridge-core/src/diagnostics.rs
// ============================================================================
// Module: Diagnostics
// Description: Structured diagnostic events for SDK operations.
// Purpose: Provide pluggable sinks without a hard logging dependency.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! This module exposes a thin diagnostics interface for catalog and dispatch
//! events. It is intentionally dependency-light so downstream deployments can
//! plug in their own logging or telemetry stack without redesign. The stderr
//! sink emits one JSON object per line.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;

use serde::Serialize;

use crate::action::Action;

// ============================================================================
// SECTION: Event Types
// ============================================================================

/// Diagnostic event payload emitted by SDK operations.
///
/// # Invariants
/// - Variants are stable for downstream log parsing.
/// - Payloads never carry credentials or raw transport errors.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DiagnosticEvent {
    /// Session established with the remote tool server.
    Connected {
        /// Tool names advertised by the server at connect time.
        tools: Vec<String>,
    },
    /// A tool's serialized input schema failed to deserialize.
    SchemaParseFailure {
        /// Tool whose schema was malformed.
        tool: String,
        /// Deserialization failure message.
        message: String,
    },
    /// Tool catalog fetched and normalized.
    ToolsFetched {
        /// Number of records after filtering.
        count: usize,
    },
    /// Action dispatched successfully.
    ActionExecuted {
        /// Action that was executed.
        action: Action,
    },
    /// Action dispatch failed.
    ActionFailed {
        /// Action that failed.
        action: Action,
        /// Failure message carried into the raised error.
        message: String,
    },
}

// ============================================================================
// SECTION: Sink Trait
// ============================================================================

/// Diagnostic sink interface.
pub trait DiagnosticSink: Send + Sync {
    /// Records a diagnostic event.
    fn emit(&self, event: &DiagnosticEvent);
}

/// No-op diagnostic sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDiagnosticSink;

impl DiagnosticSink for NoopDiagnosticSink {
    fn emit(&self, _event: &DiagnosticEvent) {}
}

/// Stderr diagnostic sink emitting JSON lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrDiagnosticSink;

impl DiagnosticSink for StderrDiagnosticSink {
    fn emit(&self, event: &DiagnosticEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}
