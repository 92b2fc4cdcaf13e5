// crates/ticketbridge-core/src/models.rs
// ============================================================================
// Module: Ticketing Models
// Description: Typed payloads for the remote ticketing operations.
// Purpose: Give callers serde-ready shapes for common action payloads.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Typed request and response payloads for the ticketing actions. These are
//! conveniences for callers; the dispatch path itself works on untyped JSON
//! maps so that new server-side fields never break the SDK.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Request Payloads
// ============================================================================

/// Ticket creation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketData {
    /// Ticket name/title.
    pub name: String,
    /// Ticket description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ticket status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Ticket priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    /// Ticket type.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub ticket_type: Option<String>,
}

// ============================================================================
// SECTION: Response Payloads
// ============================================================================

/// Ticketing service descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Service name.
    pub name: String,
}

/// Integration descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Integration {
    /// Integration identifier.
    pub id: String,
    /// Integration name.
    pub name: String,
}

/// Organization descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Organization identifier.
    pub id: String,
    /// Organization name.
    pub name: String,
}

/// Ticket collection descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Collection identifier.
    pub id: String,
    /// Collection name.
    pub name: String,
    /// Collection description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Ticket summary row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketSummary {
    /// Ticket identifier.
    pub id: String,
    /// Ticket name/title.
    pub name: String,
    /// Ticket type.
    #[serde(rename = "type")]
    pub ticket_type: String,
    /// Ticket status.
    pub status: String,
}

// ============================================================================
// SECTION: Tests
// ============================================================================
