//! Fetch → reconcile → push of field capability settings.

use crate::error::StoreError;
use crate::traits::{SchemaSink, SchemaSource};
use mediaprep_schema::{CapabilitySets, ReconcileOutcome, Reconciler, Reconciliation, SchemaDiff};
use tracing::{info, warn};

/// What a sync did.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    /// No capability was configured; nothing was fetched.
    Skipped,
    /// The current schema already matches; nothing was pushed.
    Unchanged,
    /// An update was pushed.
    Applied(SchemaDiff),
}

/// What applying a capability configuration would do, before anything is
/// pushed.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncPlan {
    /// No capability was configured; nothing was fetched.
    Skip,
    /// The current schema was fetched and reconciled.
    Reconciled(Reconciliation),
}

/// Fetches the schema held by `source` and reconciles it against
/// `capabilities` without writing anywhere.
pub fn plan_field_settings(
    source: &dyn SchemaSource,
    capabilities: &CapabilitySets,
) -> Result<SyncPlan, StoreError> {
    if capabilities.is_empty() {
        info!("no field settings configured, skipping schema sync");
        return Ok(SyncPlan::Skip);
    }

    let schema = source
        .fetch_schema()
        .map_err(|err| match err {
            StoreError::Fetch(message) => StoreError::Fetch(message),
            other => StoreError::Fetch(other.to_string()),
        })?;
    if schema.properties.is_empty() {
        return Err(StoreError::EmptySchema);
    }

    let reconciliation = Reconciler::new(capabilities.clone()).reconcile(&schema.properties)?;
    for warning in &reconciliation.warnings {
        warn!(field = %warning.field, "{}", warning.message);
    }
    Ok(SyncPlan::Reconciled(reconciliation))
}

/// Applies `capabilities` to the schema held by `source`, pushing to `sink`
/// only when something changed.
pub fn sync_field_settings(
    source: &dyn SchemaSource,
    sink: &dyn SchemaSink,
    capabilities: &CapabilitySets,
) -> Result<SyncOutcome, StoreError> {
    let reconciliation = match plan_field_settings(source, capabilities)? {
        SyncPlan::Skip => return Ok(SyncOutcome::Skipped),
        SyncPlan::Reconciled(reconciliation) => reconciliation,
    };

    match reconciliation.outcome {
        ReconcileOutcome::NoChange => {
            info!("schema already up to date");
            Ok(SyncOutcome::Unchanged)
        }
        ReconcileOutcome::Update(diff) => {
            let payload = diff.to_update_payload()?;
            sink.apply_schema(&payload)?;
            info!(changed = ?diff.changed_paths, "schema field settings applied");
            Ok(SyncOutcome::Applied(diff))
        }
    }
}
