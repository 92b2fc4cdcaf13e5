// crates/ticketbridge-core/src/lib.rs
// ============================================================================
// Module: Ticketbridge Core Library
// Description: Canonical tool catalog, dispatch, and session gateway for the
// Ticketbridge SDK.
// Dependencies: async-trait, jsonschema, reqwest, serde, serde_json, thiserror, tokio
// ============================================================================

//! ## Overview
//! `ticketbridge-core` connects to a remote MCP-style ticketing tool server,
//! normalizes the tool catalog it advertises into canonical records, and
//! dispatches action invocations over a single logical session. Framework
//! adapters in `ticketbridge-adapters` project the canonical catalog into
//! their own callable shapes; everything they rely on lives here.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod action;
pub mod catalog;
pub mod client;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod gateway;
pub mod models;
pub mod schema;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use action::Action;
pub use catalog::ParameterSchema;
pub use catalog::RawSchema;
pub use catalog::RawTool;
pub use catalog::ToolRecord;
pub use client::BridgeClient;
pub use config::ClientConfig;
pub use config::ConfigError;
pub use diagnostics::DiagnosticEvent;
pub use diagnostics::DiagnosticSink;
pub use diagnostics::NoopDiagnosticSink;
pub use diagnostics::StderrDiagnosticSink;
pub use error::BridgeError;
pub use gateway::CallToolResult;
pub use gateway::ContentItem;
pub use gateway::GatewayError;
pub use gateway::HttpSessionGateway;
pub use gateway::SessionGateway;
pub use models::Collection;
pub use models::Integration;
pub use models::Organization;
pub use models::Service;
pub use models::TicketData;
pub use models::TicketSummary;
pub use schema::ParamField;
pub use schema::ParamKind;
pub use schema::ParamSchema;
pub use schema::validate_payload;
