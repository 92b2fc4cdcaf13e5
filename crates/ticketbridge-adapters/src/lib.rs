// crates/ticketbridge-adapters/src/lib.rs
// ============================================================================
// Module: Ticketbridge Adapters Library
// Description: Framework-dialect projections of the canonical tool catalog.
// Purpose: Re-expose normalized tools in the shapes agent frameworks expect.
// Dependencies: ticketbridge-core, jsonschema, serde_json, tokio
// ============================================================================

//! ## Overview
//! Each adapter consumes the canonical catalog from `ticketbridge-core` and
//! produces framework-native callables. All three share one projection
//! pipeline ([`projector`]); they differ only in the shape of the produced
//! callable, whether validation runs before dispatch, and whether failures
//! are raised or returned as data.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod bound;
pub mod functions;
pub mod projector;
pub mod structured;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use bound::BoundTool;
pub use bound::BoundToolSet;
pub use functions::FunctionDecl;
pub use functions::FunctionSpec;
pub use functions::FunctionToolSet;
pub use projector::ProjectedTool;
pub use projector::project;
pub use structured::StructuredTool;
pub use structured::StructuredToolSet;
