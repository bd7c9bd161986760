use crate::field_type::FieldType;
use crate::node::{JsonSchema, Properties};
use mediaprep_canonical::FieldPath;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How field names are keyed in a [`TypeMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeScope {
    /// Top-level names only; looked up by key name at any depth.
    #[default]
    Flat,
    /// Keyed by dotted path from the root; list elements share the list's path.
    Path,
}

/// Declared types of every named field in a schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeMap {
    scope: TypeScope,
    entries: BTreeMap<String, FieldType>,
}

impl TypeMap {
    /// Flat map of the top-level fields, keyed by name.
    pub fn build(schema: &JsonSchema) -> Self {
        Self::with_scope(schema, TypeScope::Flat)
    }

    /// Path-scoped map keyed by dotted path.
    pub fn build_scoped(schema: &JsonSchema) -> Self {
        Self::with_scope(schema, TypeScope::Path)
    }

    /// Builds with an explicit scope.
    pub fn with_scope(schema: &JsonSchema, scope: TypeScope) -> Self {
        Self::from_properties(&schema.properties, scope)
    }

    /// Builds from a bare `properties` map.
    pub fn from_properties(properties: &Properties, scope: TypeScope) -> Self {
        let mut entries = BTreeMap::new();
        collect(properties, &FieldPath::root(), scope, &mut entries);
        Self { scope, entries }
    }

    /// Flat map from explicit entries.
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, FieldType)>,
        K: Into<String>,
    {
        Self {
            scope: TypeScope::Flat,
            entries: entries.into_iter().map(|(k, t)| (k.into(), t)).collect(),
        }
    }

    /// Keying mode.
    pub fn scope(&self) -> TypeScope {
        self.scope
    }

    /// Raw entry lookup.
    pub fn get(&self, key: &str) -> Option<&FieldType> {
        self.entries.get(key)
    }

    /// Declared type of field `name` found under the object at `parent`.
    pub fn lookup(&self, name: &str, parent: &FieldPath) -> Option<&FieldType> {
        match self.scope {
            TypeScope::Flat => self.entries.get(name),
            TypeScope::Path => self.entries.get(parent.child(name).as_str()),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is typed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldType)> {
        self.entries.iter()
    }
}

fn collect(
    properties: &Properties,
    parent: &FieldPath,
    scope: TypeScope,
    out: &mut BTreeMap<String, FieldType>,
) {
    for (name, node) in properties {
        let path = parent.child(name);
        if let Some(field_type) = node.primary_type() {
            out.insert(path.as_str().to_string(), field_type);
        }
        if scope == TypeScope::Flat {
            continue;
        }
        if let Some(children) = &node.properties {
            collect(children, &path, scope, out);
        }
        if let Some(children) = node.items.as_ref().and_then(|items| items.properties.as_ref()) {
            collect(children, &path, scope, out);
        }
    }
}
