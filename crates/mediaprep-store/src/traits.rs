//! Collaborator boundaries.

use crate::error::StoreError;
use mediaprep_core::CanonicalDocument;
use mediaprep_schema::JsonSchema;
use serde_json::Value;

/// Something that can return the current search schema.
pub trait SchemaSource {
    /// Fetches the current schema tree.
    fn fetch_schema(&self) -> Result<JsonSchema, StoreError>;
}

/// Something that accepts schema update payloads.
pub trait SchemaSink {
    /// Applies an update payload. The payload is opaque to the caller.
    fn apply_schema(&self, payload: &Value) -> Result<(), StoreError>;
}

/// Something that accepts canonical documents.
pub trait DocumentSink {
    /// Writes a batch and returns how many documents were written.
    fn write_documents(&mut self, documents: &[CanonicalDocument]) -> Result<usize, StoreError>;
}
