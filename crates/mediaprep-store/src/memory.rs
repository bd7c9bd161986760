//! In-memory collaborators, for tests and dry runs.

use crate::error::StoreError;
use crate::traits::{DocumentSink, SchemaSink, SchemaSource};
use mediaprep_core::CanonicalDocument;
use mediaprep_schema::JsonSchema;
use serde_json::Value;
use std::cell::RefCell;

/// Holds one schema and records every applied payload.
#[derive(Debug, Default)]
pub struct MemorySchemaStore {
    schema: RefCell<Option<JsonSchema>>,
    applied: RefCell<Vec<Value>>,
}

impl MemorySchemaStore {
    /// Starts with `schema` as the current schema.
    pub fn new(schema: JsonSchema) -> Self {
        Self {
            schema: RefCell::new(Some(schema)),
            applied: RefCell::new(Vec::new()),
        }
    }

    /// A store with no schema; every fetch fails.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Payloads applied so far, oldest first.
    pub fn applied(&self) -> Vec<Value> {
        self.applied.borrow().clone()
    }
}

impl SchemaSource for MemorySchemaStore {
    fn fetch_schema(&self) -> Result<JsonSchema, StoreError> {
        self.schema
            .borrow()
            .clone()
            .ok_or_else(|| StoreError::Fetch("no schema loaded".to_string()))
    }
}

impl SchemaSink for MemorySchemaStore {
    fn apply_schema(&self, payload: &Value) -> Result<(), StoreError> {
        let schema = JsonSchema::from_value(payload.clone())?;
        *self.schema.borrow_mut() = Some(schema);
        self.applied.borrow_mut().push(payload.clone());
        Ok(())
    }
}

/// Collects written documents.
#[derive(Debug, Default)]
pub struct MemoryDocumentSink {
    /// Every document written, in order.
    pub documents: Vec<CanonicalDocument>,
}

impl DocumentSink for MemoryDocumentSink {
    fn write_documents(&mut self, documents: &[CanonicalDocument]) -> Result<usize, StoreError> {
        self.documents.extend_from_slice(documents);
        Ok(documents.len())
    }
}
