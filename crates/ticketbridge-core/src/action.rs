// crates/ticketbridge-core/src/action.rs
// ============================================================================
// Module: Action Identifiers
// Description: Closed enumeration of remote ticketing operations.
// Purpose: Validate and route dispatch calls against known tool names.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Every dispatchable operation has one [`Action`] whose wire name equals the
//! remote tool's catalog name. Resolution goes through an explicit lookup
//! table built once from [`Action::ALL`]; a tool name with no entry is a
//! defined error condition, never a silent skip.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::Deserialize;
use serde::Serialize;

use crate::error::BridgeError;

// ============================================================================
// SECTION: Action Enumeration
// ============================================================================

/// Known remote ticketing operations.
///
/// # Invariants
/// - `as_str` values are stable wire names matching the remote catalog.
/// - [`Action::ALL`] lists every variant in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// List available ticketing services.
    ListServices,
    /// List configured integrations.
    ListIntegrations,
    /// List organizations visible to the caller.
    ListOrganizations,
    /// List ticket collections.
    ListCollections,
    /// Confirm a pending ticket creation.
    ConfirmTicketCreation,
    /// Create a ticket.
    CreateTicket,
    /// List tickets.
    ListTickets,
    /// Check remote server health.
    HealthCheck,
}

/// Lookup table from wire names to actions, built once from [`Action::ALL`].
static ACTION_NAMES: LazyLock<BTreeMap<&'static str, Action>> =
    LazyLock::new(|| Action::ALL.iter().map(|action| (action.as_str(), *action)).collect());

impl Action {
    /// All actions in canonical order.
    pub const ALL: [Self; 8] = [
        Self::ListServices,
        Self::ListIntegrations,
        Self::ListOrganizations,
        Self::ListCollections,
        Self::ConfirmTicketCreation,
        Self::CreateTicket,
        Self::ListTickets,
        Self::HealthCheck,
    ];

    /// Returns the stable wire name for the action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ListServices => "list_services",
            Self::ListIntegrations => "list_integrations",
            Self::ListOrganizations => "list_organizations",
            Self::ListCollections => "list_collections",
            Self::ConfirmTicketCreation => "confirm_ticket_creation",
            Self::CreateTicket => "create_ticket",
            Self::ListTickets => "list_tickets",
            Self::HealthCheck => "health_check",
        }
    }

    /// Parses a wire name into an action.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        ACTION_NAMES.get(name).copied()
    }

    /// Resolves a tool name to an action, failing on unknown names.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::UnknownAction`] when no action carries the name.
    pub fn resolve(name: &str) -> Result<Self, BridgeError> {
        Self::parse(name).ok_or_else(|| BridgeError::UnknownAction(name.to_string()))
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
