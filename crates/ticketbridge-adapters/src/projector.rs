// crates/ticketbridge-adapters/src/projector.rs
// ============================================================================
// Module: Generic Projector
// Description: Shared catalog-fetch, resolve, and schema-build pipeline.
// Purpose: Keep dialect adapters down to their wrapper shapes.
// Dependencies: ticketbridge-core
// ============================================================================

//! ## Overview
//! Every dialect adapter starts from the same steps: fetch the filtered
//! canonical catalog, resolve each record's action identifier through the
//! closed enumeration, and build the generated parameter schema once. The
//! projector performs those steps; adapters only map [`ProjectedTool`] into
//! their own callable shape.

// ============================================================================
// SECTION: Imports
// ============================================================================

use ticketbridge_core::Action;
use ticketbridge_core::BridgeClient;
use ticketbridge_core::BridgeError;
use ticketbridge_core::ParamSchema;
use ticketbridge_core::ToolRecord;

// ============================================================================
// SECTION: Projection
// ============================================================================

/// One catalog record prepared for dialect wrapping.
#[derive(Debug, Clone)]
pub struct ProjectedTool {
    /// Canonical tool record.
    pub record: ToolRecord,
    /// Resolved action identifier for dispatch.
    pub action: Action,
    /// Generated parameter schema for the tool.
    pub schema: ParamSchema,
}

/// Fetches, filters, resolves, and schema-builds the catalog.
///
/// # Errors
///
/// Returns [`BridgeError::Execution`] when the catalog fetch fails and
/// [`BridgeError::UnknownAction`] when a tool name has no enumeration entry.
pub async fn project(
    client: &BridgeClient,
    actions: Option<&[Action]>,
) -> Result<Vec<ProjectedTool>, BridgeError> {
    let records = client.get_tools(actions).await?;
    records
        .into_iter()
        .map(|record| {
            let action = Action::resolve(&record.name)?;
            let schema = ParamSchema::from_parameters(&record.parameters);
            Ok(ProjectedTool {
                record,
                action,
                schema,
            })
        })
        .collect()
}

// ============================================================================
// SECTION: Tests
// ============================================================================
