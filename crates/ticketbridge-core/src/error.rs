// crates/ticketbridge-core/src/error.rs
// ============================================================================
// Module: Domain Errors
// Description: Error taxonomy for the Ticketbridge SDK.
// Purpose: Keep transport and parsing failures behind a stable domain surface.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! All public operations surface [`BridgeError`]. Transport and parsing
//! failures are caught at the dispatch and normalization boundaries and
//! re-wrapped here with the original message preserved as context; callers
//! never see raw transport error types.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Error Types
// ============================================================================

/// Domain error for Ticketbridge SDK operations.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Access-key credential missing or empty, detected at construction time.
    #[error("authentication failed: {0}")]
    Authentication(String),
    /// Tool name with no matching action identifier.
    #[error("unknown action: {0}")]
    UnknownAction(String),
    /// Catalog fetch or action dispatch failed.
    ///
    /// The message carries the human-readable cause chain from the underlying
    /// failure.
    #[error("{0}")]
    Execution(String),
}
