//! Document preparation for media search ingestion.
//!
//! This crate provides:
//! - [`Normalizer`]: schema-typed repair of raw documents and optional flattening
//! - [`CanonicalMapper`]: source record → [`CanonicalDocument`] with warnings
//! - [`Validator`]: required and optional field contracts for canonical documents
//!
//! Core invariants:
//! - Normalization never fails and is idempotent
//! - A canonical document is never partially built; only a missing title or
//!   uri (or an over-long uri) fails a record
//! - One bad record never aborts a batch
//!
#![deny(missing_docs)]

/// The canonical document model.
pub mod document;
/// Error types for mapping.
pub mod errors;
/// Canonical mapping.
pub mod mapper;
/// Document cleaning and flattening.
pub mod normalize;
/// Field contract validation.
pub mod validator;

pub use document::{CanonicalDocument, Licensing, Person};
pub use errors::MappingError;
pub use mapper::config::{
    FieldSources, MapperConfig, MappingConstants, MappingTables, PersonSource, ValueTransform,
};
pub use mapper::{
    map_batch, map_record, BatchOutcome, CanonicalMapper, MappedRecord, RecordError,
    RecordWarning,
};
pub use normalize::{clean, clean_batch, flatten, prepare, Normalizer};
pub use validator::{
    OptionalReport, RequiredReport, ValidationConfig, ValidationReport, Validator,
    DEFAULT_CATEGORY_ALIASES, DEFAULT_VOCABULARY,
};
