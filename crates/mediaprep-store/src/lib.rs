//! Collaborator boundaries for mediaprep.
//!
//! This crate provides:
//! - `SchemaSource`, `SchemaSink` and `DocumentSink` traits
//! - File-backed and in-memory implementations
//! - `sync_field_settings`: fetch the current schema, reconcile it against
//!   a capability configuration and push only a real change
//! - `plan_field_settings`: the same fetch and reconcile, without the push
//!
//! Low-level I/O and JSON errors are mapped to [`StoreError`] here, once.

#![deny(missing_docs)]

/// Error types for store operations.
pub mod error;
/// File-backed collaborators.
pub mod file;
/// In-memory collaborators.
pub mod memory;
/// Field-settings sync.
pub mod sync;
/// Collaborator traits.
pub mod traits;

pub use error::StoreError;
pub use file::{DocumentFormat, FileSchemaStore, JsonDocumentSink};
pub use memory::{MemoryDocumentSink, MemorySchemaStore};
pub use sync::{plan_field_settings, sync_field_settings, SyncOutcome, SyncPlan};
pub use traits::{DocumentSink, SchemaSink, SchemaSource};
