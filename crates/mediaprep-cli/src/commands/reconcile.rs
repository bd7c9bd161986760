//! Reconcile command implementation.

use crate::config::Config;
use crate::output::{read_json, write_json};
use mediaprep_schema::{CapabilitySets, ReconcileOutcome};
use mediaprep_store::{
    plan_field_settings, sync_field_settings, FileSchemaStore, StoreError, SyncOutcome, SyncPlan,
};
use serde_json::{json, Value};
use std::path::PathBuf;

pub fn run(
    schema: PathBuf,
    fields: Option<PathBuf>,
    apply: bool,
    output: Option<PathBuf>,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let capabilities = match fields {
        Some(path) => CapabilitySets::from_value(read_json(Some(path.as_path()))?)
            .map_err(|e| format!("Invalid field settings {}: {}", path.display(), e))?,
        None => config.capabilities.clone(),
    };
    let store = FileSchemaStore::new(&schema);

    let summary = if apply {
        apply_settings(&store, &capabilities)?
    } else {
        preview(&store, &capabilities)?
    };
    write_json(&summary, output.as_deref())
}

fn apply_settings(
    store: &FileSchemaStore,
    capabilities: &CapabilitySets,
) -> Result<Value, StoreError> {
    Ok(match sync_field_settings(store, store, capabilities)? {
        SyncOutcome::Skipped => json!({ "status": "skipped" }),
        SyncOutcome::Unchanged => json!({ "status": "unchanged" }),
        SyncOutcome::Applied(diff) => json!({
            "status": "applied",
            "changed_paths": diff.changed_paths,
            "before": diff.before.to_string(),
            "after": diff.after.to_string(),
        }),
    })
}

/// Reconciles without writing; the update payload is part of the summary.
fn preview(store: &FileSchemaStore, capabilities: &CapabilitySets) -> Result<Value, StoreError> {
    let reconciliation = match plan_field_settings(store, capabilities)? {
        SyncPlan::Skip => return Ok(json!({ "status": "skipped" })),
        SyncPlan::Reconciled(reconciliation) => reconciliation,
    };

    Ok(match reconciliation.outcome {
        ReconcileOutcome::NoChange => json!({
            "status": "unchanged",
            "warnings": reconciliation.warnings,
        }),
        ReconcileOutcome::Update(diff) => json!({
            "status": "update",
            "changed_paths": diff.changed_paths,
            "before": diff.before.to_string(),
            "after": diff.after.to_string(),
            "warnings": reconciliation.warnings,
            "payload": diff.to_update_payload()?,
        }),
    })
}
