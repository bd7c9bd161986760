use crate::field_type::{FieldType, TypeDecl};
use crate::node::{JsonSchema, Properties};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Flattening switches shared by document and schema flattening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlattenConfig {
    /// Promote nested object keys into their parent.
    pub flatten_nested_objects: bool,
    /// Join arrays of scalars into one string.
    pub flatten_string_arrays: bool,
    /// Joiner for flattened arrays.
    pub array_delimiter: String,
    /// Joiner between a parent key and a promoted child key.
    pub separator: String,
}

impl Default for FlattenConfig {
    fn default() -> Self {
        Self {
            flatten_nested_objects: false,
            flatten_string_arrays: false,
            array_delimiter: " ".to_string(),
            separator: "_".to_string(),
        }
    }
}

impl FlattenConfig {
    /// Both switches on, default joiners.
    pub fn all() -> Self {
        Self {
            flatten_nested_objects: true,
            flatten_string_arrays: true,
            ..Self::default()
        }
    }

    /// Key of `key` promoted under `parent`.
    pub fn join(&self, parent: &str, key: &str) -> String {
        if parent.is_empty() {
            key.to_string()
        } else {
            format!("{}{}{}", parent, self.separator, key)
        }
    }

    /// True when flattening would change nothing.
    pub fn is_noop(&self) -> bool {
        !self.flatten_nested_objects && !self.flatten_string_arrays
    }
}

/// Flattens a `properties` tree so that its keys match flattened documents.
pub fn flatten_properties(properties: &Properties, config: &FlattenConfig) -> Properties {
    let mut out = Properties::new();
    flatten_into(properties, "", config, &mut out);
    out
}

/// Copy of `schema` with flattened properties; every other key is kept.
pub fn flatten_schema(schema: &JsonSchema, config: &FlattenConfig) -> JsonSchema {
    JsonSchema {
        properties: flatten_properties(&schema.properties, config),
        ..schema.clone()
    }
}

fn flatten_into(properties: &Properties, parent: &str, config: &FlattenConfig, out: &mut Properties) {
    for (key, node) in properties {
        let new_key = config.join(parent, key);
        let field_type = node.primary_type();

        if config.flatten_nested_objects && field_type == Some(FieldType::Object) {
            if let Some(children) = &node.properties {
                debug!(field = %new_key, "flattening schema object");
                flatten_into(children, &new_key, config, out);
                continue;
            }
        }

        let mut node = node.clone();
        if config.flatten_string_arrays && field_type == Some(FieldType::Array) {
            let scalar_items = node
                .items
                .as_ref()
                .and_then(|items| items.primary_type())
                .is_some_and(|t| t.is_scalar());
            if scalar_items {
                debug!(field = %new_key, "flattening schema array to string");
                node.declared_type = Some(TypeDecl::from(FieldType::String));
                node.items = None;
            }
        }

        if out.insert(new_key.clone(), node).is_some() {
            warn!(field = %new_key, "flattened key collides with an existing field; last one wins");
        }
    }
}
