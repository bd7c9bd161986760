use crate::capability::Capability;
use crate::errors::SchemaError;
use crate::field_type::{FieldType, TypeDecl};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// JSON Schema dialect written into update payloads.
pub const SCHEMA_DIALECT: &str = "https://json-schema.org/draft/2020-12/schema";

/// Field name → node, in key order.
pub type Properties = BTreeMap<String, SchemaNode>;

/// One field of a search schema.
///
/// Capability flags are tri-state: `None` means the key is absent and stays
/// absent unless the reconciler writes it. Keys this model does not interpret
/// are kept in `extra` and written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    /// Raw `type` keyword.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub declared_type: Option<TypeDecl>,
    /// Element schema, for arrays.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,
    /// Children, for objects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,
    /// Semantic role, e.g. `"title"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_property_mapping: Option<String>,
    /// Returned in results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retrievable: Option<bool>,
    /// Usable in filters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexable: Option<bool>,
    /// Full-text searchable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub searchable: Option<bool>,
    /// Offered as a facet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic_facetable: Option<bool>,
    /// Used for autocomplete.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completable: Option<bool>,
    /// Every other key of the node.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl SchemaNode {
    /// A node declaring a single type and nothing else.
    pub fn of_type(field_type: FieldType) -> Self {
        Self {
            declared_type: Some(field_type.into()),
            ..Self::default()
        }
    }

    /// An array node with the given element schema.
    pub fn array_of(items: SchemaNode) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::of_type(FieldType::Array)
        }
    }

    /// An object node with the given children.
    pub fn object_of(properties: Properties) -> Self {
        Self {
            properties: Some(properties),
            ..Self::of_type(FieldType::Object)
        }
    }

    /// First non-`null` declared type.
    pub fn primary_type(&self) -> Option<FieldType> {
        self.declared_type.as_ref().and_then(TypeDecl::primary)
    }

    /// Whether the node is mapped to the title role.
    pub fn is_title(&self) -> bool {
        self.key_property_mapping.as_deref() == Some("title")
    }

    /// Current value of a capability flag.
    pub fn flag(&self, capability: Capability) -> Option<bool> {
        match capability {
            Capability::Retrievable => self.retrievable,
            Capability::Indexable => self.indexable,
            Capability::Searchable => self.searchable,
            Capability::DynamicFacetable => self.dynamic_facetable,
            Capability::Completable => self.completable,
        }
    }

    /// Writes a capability flag.
    pub fn set_flag(&mut self, capability: Capability, value: bool) {
        let slot = match capability {
            Capability::Retrievable => &mut self.retrievable,
            Capability::Indexable => &mut self.indexable,
            Capability::Searchable => &mut self.searchable,
            Capability::DynamicFacetable => &mut self.dynamic_facetable,
            Capability::Completable => &mut self.completable,
        };
        *slot = Some(value);
    }

    /// Rewrites union `type` declarations to their single primary type, here
    /// and in every descendant.
    pub fn collapse_types(&mut self) {
        if let Some(decl) = self.declared_type.as_mut() {
            *decl = decl.collapsed();
        }
        if let Some(items) = self.items.as_mut() {
            items.collapse_types();
        }
        if let Some(children) = self.properties.as_mut() {
            for child in children.values_mut() {
                child.collapse_types();
            }
        }
    }
}

/// A whole schema document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonSchema {
    /// `$schema` dialect URI.
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub dialect: Option<String>,
    /// Root `type`, normally `"object"`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub declared_type: Option<TypeDecl>,
    /// Top-level fields.
    pub properties: Properties,
    /// Every other root key.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl JsonSchema {
    /// An object schema with the given fields.
    pub fn new(properties: Properties) -> Self {
        Self {
            dialect: Some(SCHEMA_DIALECT.to_string()),
            declared_type: Some(FieldType::Object.into()),
            properties,
            extra: BTreeMap::new(),
        }
    }

    /// Parses a schema document, checking its outer shape first.
    pub fn from_value(value: Value) -> Result<Self, SchemaError> {
        let root = value.as_object().ok_or(SchemaError::NotAnObject)?;
        match root.get("properties") {
            None => return Err(SchemaError::MissingProperties),
            Some(Value::Object(_)) => {}
            Some(_) => return Err(SchemaError::InvalidProperties),
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Parses a schema document from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, SchemaError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Serializes back to a JSON value.
    pub fn to_value(&self) -> Result<Value, SchemaError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Parses a bare `properties` map, as returned by a remote schema fetch.
    pub fn properties_from_value(value: Value) -> Result<Properties, SchemaError> {
        if !value.is_object() {
            return Err(SchemaError::InvalidProperties);
        }
        Ok(serde_json::from_value(value)?)
    }
}
