use mediaprep_core::{map_record, CanonicalDocument, MapperConfig};
use mediaprep_schema::{CapabilitySets, JsonSchema, ReconcileOutcome};
use mediaprep_store::{
    plan_field_settings, sync_field_settings, DocumentFormat, DocumentSink, FileSchemaStore,
    JsonDocumentSink, MemoryDocumentSink, MemorySchemaStore, SchemaSink, SchemaSource, StoreError,
    SyncOutcome, SyncPlan,
};
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

fn remote_schema() -> JsonSchema {
    JsonSchema::from_value(json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "type": "object",
        "properties": {
            "title": {"type": "string", "keyPropertyMapping": "title", "searchable": true},
            "genre": {"type": ["string", "null"]},
            "year": {"type": "integer"}
        }
    }))
    .unwrap()
}

fn capabilities() -> CapabilitySets {
    CapabilitySets::from_value(json!({
        "retrievable": ["title", "genre", "year"],
        "searchable": ["genre"],
        "facetable": ["year"]
    }))
    .unwrap()
}

fn document(id: &str) -> CanonicalDocument {
    map_record(
        &json!({"id": id, "title": "T", "image": "i", "release_date": "2024-01-01"}),
        &MapperConfig::default(),
    )
    .unwrap()
    .document
}

#[test]
fn empty_configuration_skips_without_fetching() {
    let store = MemorySchemaStore::unavailable();
    let outcome = sync_field_settings(&store, &store, &CapabilitySets::default()).unwrap();
    assert_eq!(outcome, SyncOutcome::Skipped);
    assert!(store.applied().is_empty());
}

#[test]
fn fetch_failure_is_terminal() {
    let store = MemorySchemaStore::unavailable();
    let err = sync_field_settings(&store, &store, &capabilities()).unwrap_err();
    assert!(matches!(err, StoreError::Fetch(_)));
    assert_eq!(
        err.to_string(),
        "failed to fetch current schema: no schema loaded"
    );
}

#[test]
fn empty_remote_schema_is_an_error() {
    let store = MemorySchemaStore::new(JsonSchema::new(Default::default()));
    let err = sync_field_settings(&store, &store, &capabilities()).unwrap_err();
    assert!(matches!(err, StoreError::EmptySchema));
    assert!(store.applied().is_empty());
}

#[test]
fn sync_applies_once_then_reports_unchanged() {
    let store = MemorySchemaStore::new(remote_schema());

    let first = sync_field_settings(&store, &store, &capabilities()).unwrap();
    let SyncOutcome::Applied(diff) = first else {
        panic!("expected an applied update");
    };
    assert_eq!(diff.changed_paths, vec!["genre", "title", "year"]);

    let applied = store.applied();
    assert_eq!(applied.len(), 1);
    assert_eq!(applied[0]["type"], "object");
    assert_eq!(applied[0]["properties"]["genre"]["type"], "string");
    assert_eq!(applied[0]["properties"]["genre"]["searchable"], true);
    assert_eq!(applied[0]["properties"]["year"]["indexable"], true);
    assert_eq!(applied[0]["properties"]["title"]["searchable"], true);

    let second = sync_field_settings(&store, &store, &capabilities()).unwrap();
    assert_eq!(second, SyncOutcome::Unchanged);
    assert_eq!(store.applied().len(), 1);
}

#[test]
fn plan_reconciles_without_pushing() {
    let store = MemorySchemaStore::unavailable();
    assert_eq!(
        plan_field_settings(&store, &CapabilitySets::default()).unwrap(),
        SyncPlan::Skip
    );

    let store = MemorySchemaStore::new(remote_schema());
    let SyncPlan::Reconciled(reconciliation) = plan_field_settings(&store, &capabilities()).unwrap()
    else {
        panic!("expected a reconciliation");
    };
    let ReconcileOutcome::Update(diff) = reconciliation.outcome else {
        panic!("expected an update");
    };
    assert_eq!(diff.changed_paths, vec!["genre", "title", "year"]);
    assert!(store.applied().is_empty());

    let err = plan_field_settings(&MemorySchemaStore::unavailable(), &capabilities()).unwrap_err();
    assert!(matches!(err, StoreError::Fetch(_)));
}

#[test]
fn file_schema_store_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("schema.json");
    fs::write(&path, serde_json::to_string(&remote_schema()).unwrap()).unwrap();

    let store = FileSchemaStore::new(&path);
    assert_eq!(store.fetch_schema().unwrap(), remote_schema());

    let outcome = sync_field_settings(&store, &store, &capabilities()).unwrap();
    assert!(matches!(outcome, SyncOutcome::Applied(_)));

    let written: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written["properties"]["year"]["dynamicFacetable"], true);

    let again = sync_field_settings(&store, &store, &capabilities()).unwrap();
    assert_eq!(again, SyncOutcome::Unchanged);
}

#[test]
fn file_schema_store_reports_bad_files() {
    let temp_dir = TempDir::new().unwrap();

    let missing = FileSchemaStore::new(temp_dir.path().join("absent.json"));
    assert!(matches!(missing.fetch_schema(), Err(StoreError::Io(_))));

    let broken_path = temp_dir.path().join("broken.json");
    fs::write(&broken_path, "{not json").unwrap();
    let broken = FileSchemaStore::new(&broken_path);
    assert!(matches!(broken.fetch_schema(), Err(StoreError::Json(_))));

    let shapeless_path = temp_dir.path().join("shapeless.json");
    fs::write(&shapeless_path, "[]").unwrap();
    let shapeless = FileSchemaStore::new(&shapeless_path);
    assert!(matches!(shapeless.fetch_schema(), Err(StoreError::Schema(_))));
}

#[test]
fn memory_sink_rejects_malformed_payloads() {
    let store = MemorySchemaStore::new(remote_schema());
    let err = store.apply_schema(&json!({"type": "object"})).unwrap_err();
    assert!(matches!(err, StoreError::Schema(_)));
}

#[test]
fn json_lines_sink_writes_one_document_per_line() {
    let mut sink = JsonDocumentSink::new(Vec::new(), DocumentFormat::JsonLines);
    let written = sink
        .write_documents(&[document("a"), document("b")])
        .unwrap();
    assert_eq!(written, 2);

    let bytes = sink.into_inner().unwrap();
    let text = String::from_utf8(bytes).unwrap();
    let lines: Vec<Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["_id"], "a");
    assert_eq!(lines[1]["id"], "b");
}

#[test]
fn json_array_sink_writes_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("docs.json");

    let mut sink = JsonDocumentSink::create(&path, DocumentFormat::JsonArray).unwrap();
    sink.write_documents(&[document("x")]).unwrap();
    drop(sink.into_inner().unwrap());

    let written: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written.as_array().unwrap().len(), 1);
    assert_eq!(written[0]["uri"], "gs://media-bucket/images/i.jpg");
    assert_eq!(written[0]["available_time"], "2024-01-01T00:00:00Z");
}

#[test]
fn memory_document_sink_collects() {
    let mut sink = MemoryDocumentSink::default();
    assert_eq!(sink.write_documents(&[document("m")]).unwrap(), 1);
    assert_eq!(sink.documents[0].id, "m");
}
