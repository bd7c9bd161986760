//! Search-schema model and field-capability reconciliation.
//!
//! This crate provides:
//! - [`SchemaNode`] / [`JsonSchema`]: one typed deserialization path for
//!   schema documents, preserving every key it does not interpret
//! - [`TypeMap`]: the field-name → declared-type table the normalizer uses
//! - [`flatten_properties`]: schema-side mirror of document flattening
//! - [`CapabilitySets::for_document`]: field settings generated from a sample
//!   document
//! - [`Reconciler`]: computes capability flags from [`CapabilitySets`] and
//!   reports either no change or a minimal [`SchemaDiff`]
//!
//! Core invariants:
//! - A capability flag is only written on nodes whose type can carry it
//! - Title-mapped nodes keep their `searchable`/`indexable` values
//! - Reconciling an already reconciled tree yields [`ReconcileOutcome::NoChange`]
//!
#![deny(missing_docs)]

/// Capability model and configuration sets.
pub mod capability;
/// Error types for schema operations.
pub mod errors;
/// Declared field types.
pub mod field_type;
/// Schema flattening.
pub mod flatten;
/// Schema tree nodes and whole schema documents.
pub mod node;
/// Capability reconciliation and diffing.
pub mod reconcile;
/// Field-name → type tables.
pub mod type_map;

pub use capability::{Capability, CapabilitySets, REQUIRED_FIELDS};
pub use errors::SchemaError;
pub use field_type::{FieldType, TypeDecl};
pub use flatten::{flatten_properties, flatten_schema, FlattenConfig};
pub use node::{JsonSchema, Properties, SchemaNode, SCHEMA_DIALECT};
pub use reconcile::{ReconcileOutcome, Reconciler, Reconciliation, SchemaDiff};
pub use type_map::{TypeMap, TypeScope};
