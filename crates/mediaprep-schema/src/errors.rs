use mediaprep_canonical::CanonicalizationError;
use thiserror::Error;

/// Errors raised for malformed schema or capability input.
///
/// There is no field-level recovery from any of these; the operation that
/// hit one is aborted.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The schema document is not a JSON object.
    #[error("schema must be a JSON object")]
    NotAnObject,
    /// The schema document has no `properties` block.
    #[error("schema has no 'properties' block")]
    MissingProperties,
    /// The `properties` block is not an object.
    #[error("schema 'properties' must be an object")]
    InvalidProperties,
    /// A node could not be deserialized.
    #[error("schema deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
    /// Canonical comparison failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),
}
