//! Error types for store operations.

use mediaprep_schema::SchemaError;
use thiserror::Error;

/// Errors that can occur while talking to a collaborator.
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O error during read or write.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// The schema document is malformed.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),
    /// The current schema could not be fetched.
    #[error("failed to fetch current schema: {0}")]
    Fetch(String),
    /// The remote schema has no fields yet.
    #[error("current schema has no properties; import data first")]
    EmptySchema,
}
