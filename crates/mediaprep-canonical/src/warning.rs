use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable warning code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningCode {
    /// The source carried no identifier; a fresh one was generated.
    GeneratedIdentifier,
    /// The title was longer than allowed and was cut.
    TitleTruncated,
    /// A date could not be parsed; the current time was used instead.
    UnparsableDate,
    /// A category is outside the known media vocabulary.
    UnknownCategory,
    /// The uri does not look like a URI.
    InvalidUriShape,
    /// The language is not BCP-47 shaped.
    NonBcp47Language,
    /// A `persons` entry is not an object.
    PersonNotObject,
    /// A `persons` entry lacks `name`.
    PersonMissingName,
    /// An `organizations` entry is not an object.
    OrganizationNotObject,
    /// An `organizations` entry lacks `name`.
    OrganizationMissingName,
    /// A capability was requested for a field whose type cannot carry it.
    IncompatibleCapability,
}

impl WarningCode {
    /// The serialized code.
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningCode::GeneratedIdentifier => "generated_identifier",
            WarningCode::TitleTruncated => "title_truncated",
            WarningCode::UnparsableDate => "unparsable_date",
            WarningCode::UnknownCategory => "unknown_category",
            WarningCode::InvalidUriShape => "invalid_uri_shape",
            WarningCode::NonBcp47Language => "non_bcp47_language",
            WarningCode::PersonNotObject => "person_not_object",
            WarningCode::PersonMissingName => "person_missing_name",
            WarningCode::OrganizationNotObject => "organization_not_object",
            WarningCode::OrganizationMissingName => "organization_missing_name",
            WarningCode::IncompatibleCapability => "incompatible_capability",
        }
    }
}

/// A non-blocking problem found while processing a record or schema.
///
/// Warnings travel next to successful output and never stop processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    /// Stable code.
    pub code: WarningCode,
    /// Field (dotted path) the warning is about.
    pub field: String,
    /// Human readable detail.
    pub message: String,
}

impl Warning {
    /// Creates a warning.
    pub fn new(code: WarningCode, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code.as_str(), self.field, self.message)
    }
}
