use mediaprep_canonical::{DurationSpec, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A person credited on a media item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Display name.
    pub name: String,
    /// Role, e.g. `actor`, `director`, `producer`.
    pub role: String,
}

impl Person {
    /// Creates a person.
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
        }
    }
}

/// Licensing window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Licensing {
    /// Start of the window.
    pub from: Timestamp,
    /// End of the window.
    pub until: Timestamp,
}

/// A media record in the fixed target vocabulary.
///
/// `id` and `_id` always hold the same value. Empty optional fields are
/// left out of the JSON form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalDocument {
    /// Stable identifier.
    pub id: String,
    /// Copy of `id` required by custom-schema imports.
    #[serde(rename = "_id")]
    pub import_id: String,
    /// Trimmed title.
    pub title: String,
    /// Media location.
    pub uri: String,
    /// Media categories; never empty.
    pub categories: Vec<String>,
    /// Availability start, UTC.
    pub available_time: Timestamp,
    /// Estimated running time.
    pub duration: DurationSpec,
    /// Free text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// BCP-47 language tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Content ratings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content_rating: Vec<String>,
    /// Cast and directors.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub persons: Vec<Person>,
    /// Title in the original language, when it differs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_title: Option<String>,
    /// Licensing window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub licensing: Option<Licensing>,
    /// Other credited crew.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_crew: Vec<Person>,
    /// Pass-through fields (`keywords`, `tags`, `distribution_rights`,
    /// extended metadata).
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl CanonicalDocument {
    /// JSON form of the document.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}
