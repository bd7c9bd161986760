use thiserror::Error;

/// Blocking per-record mapping failures.
///
/// Only the two fields without a safe fallback can raise.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// A required source value is absent, blank or the sentinel.
    #[error("missing required field: {field}")]
    MissingRequiredField {
        /// Canonical field name.
        field: String,
    },
    /// The built uri is longer than allowed.
    #[error("uri exceeds {max} characters: {len}")]
    UriTooLong {
        /// Actual length in characters.
        len: usize,
        /// Configured maximum.
        max: usize,
    },
}

impl MappingError {
    pub(crate) fn missing(field: &str) -> Self {
        MappingError::MissingRequiredField {
            field: field.to_string(),
        }
    }
}
