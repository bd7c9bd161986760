use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared type of a schema field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    /// `string`
    String,
    /// `number`
    Number,
    /// `integer`
    Integer,
    /// `boolean`
    Boolean,
    /// `object`
    Object,
    /// `array`
    Array,
    /// `datetime`
    Datetime,
    /// `geolocation`
    Geolocation,
    /// Anything else, kept verbatim.
    Other(String),
}

impl FieldType {
    /// The JSON Schema spelling.
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Integer => "integer",
            FieldType::Boolean => "boolean",
            FieldType::Object => "object",
            FieldType::Array => "array",
            FieldType::Datetime => "datetime",
            FieldType::Geolocation => "geolocation",
            FieldType::Other(name) => name,
        }
    }

    /// `string`, `number`, `integer` or `boolean`.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            FieldType::String | FieldType::Number | FieldType::Integer | FieldType::Boolean
        )
    }
}

impl From<&str> for FieldType {
    fn from(value: &str) -> Self {
        match value {
            "string" => FieldType::String,
            "number" => FieldType::Number,
            "integer" => FieldType::Integer,
            "boolean" => FieldType::Boolean,
            "object" => FieldType::Object,
            "array" => FieldType::Array,
            "datetime" => FieldType::Datetime,
            "geolocation" => FieldType::Geolocation,
            other => FieldType::Other(other.to_string()),
        }
    }
}

impl From<String> for FieldType {
    fn from(value: String) -> Self {
        FieldType::from(value.as_str())
    }
}

impl From<FieldType> for String {
    fn from(value: FieldType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw `type` keyword: a single name or a union such as `["string", "null"]`.
///
/// Kept exactly as received so that an untouched node serializes back to the
/// same bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeDecl {
    /// `"type": "string"`
    Single(String),
    /// `"type": ["string", "null"]`
    Union(Vec<String>),
}

impl TypeDecl {
    /// First declared type that is not `null`.
    pub fn primary(&self) -> Option<FieldType> {
        match self {
            TypeDecl::Single(name) if name == "null" => None,
            TypeDecl::Single(name) => Some(FieldType::from(name.as_str())),
            TypeDecl::Union(names) => names
                .iter()
                .find(|name| name.as_str() != "null")
                .map(|name| FieldType::from(name.as_str())),
        }
    }

    /// Single-name form; unions collapse to their primary type, or `string`.
    pub fn collapsed(&self) -> TypeDecl {
        match self {
            TypeDecl::Single(_) => self.clone(),
            TypeDecl::Union(_) => TypeDecl::Single(
                self.primary()
                    .map(String::from)
                    .unwrap_or_else(|| "string".to_string()),
            ),
        }
    }
}

impl From<FieldType> for TypeDecl {
    fn from(value: FieldType) -> Self {
        TypeDecl::Single(value.into())
    }
}
