use mediaprep_canonical::{FieldPath, SENTINEL_NULL};
use mediaprep_schema::{FieldType, FlattenConfig, JsonSchema, TypeMap, TypeScope};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Schema-typed document repair plus optional flattening.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    type_map: TypeMap,
    flatten: FlattenConfig,
}

impl Normalizer {
    /// Creates a normalizer from a prebuilt type map.
    pub fn new(type_map: TypeMap, flatten: FlattenConfig) -> Self {
        Self { type_map, flatten }
    }

    /// Builds the type map from `schema` with the given scope.
    pub fn from_schema(schema: &JsonSchema, scope: TypeScope, flatten: FlattenConfig) -> Self {
        Self::new(TypeMap::with_scope(schema, scope), flatten)
    }

    /// The type map in use.
    pub fn type_map(&self) -> &TypeMap {
        &self.type_map
    }

    /// The flattening switches in use.
    pub fn flatten_config(&self) -> &FlattenConfig {
        &self.flatten
    }

    /// See [`clean`].
    pub fn clean(&self, document: Value) -> Value {
        clean(document, &self.type_map)
    }

    /// See [`clean_batch`].
    pub fn clean_batch(&self, documents: Vec<Value>) -> Vec<Value> {
        clean_batch(documents, &self.type_map)
    }

    /// See [`flatten`].
    pub fn flatten(&self, document: Value) -> Value {
        flatten(document, &self.flatten)
    }

    /// See [`prepare`].
    pub fn prepare(&self, document: Value) -> Value {
        prepare(document, &self.type_map, &self.flatten)
    }

    /// Prepares every document of a batch.
    pub fn prepare_batch(&self, documents: Vec<Value>) -> Vec<Value> {
        documents
            .into_iter()
            .map(|document| self.prepare(document))
            .collect()
    }
}

/// Repairs type and sentinel violations for every key the type map knows.
///
/// A list at the root is a list of documents. Scalars are returned as they
/// are. Running it twice gives the same result as running it once.
pub fn clean(document: Value, type_map: &TypeMap) -> Value {
    match document {
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| clean_value(item, &FieldPath::root(), type_map))
                .collect(),
        ),
        other => clean_value(other, &FieldPath::root(), type_map),
    }
}

/// Cleans each document of a list.
pub fn clean_batch(documents: Vec<Value>, type_map: &TypeMap) -> Vec<Value> {
    documents
        .into_iter()
        .map(|document| clean(document, type_map))
        .collect()
}

fn clean_value(value: Value, path: &FieldPath, type_map: &TypeMap) -> Value {
    match value {
        Value::Object(map) => Value::Object(clean_object(map, path, type_map)),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| clean_value(item, path, type_map))
                .collect(),
        ),
        other => other,
    }
}

fn clean_object(map: Map<String, Value>, parent: &FieldPath, type_map: &TypeMap) -> Map<String, Value> {
    let mut out = Map::with_capacity(map.len());
    for (key, value) in map {
        let path = parent.child(&key);
        let repaired = match type_map.lookup(&key, parent) {
            Some(FieldType::Array) if !value.is_array() => {
                debug!(field = %path, "replaced non-list value with []");
                Value::Array(Vec::new())
            }
            Some(declared) if is_sentinel(&value) => {
                if *declared == FieldType::Object {
                    debug!(field = %path, "replaced NULL sentinel with {{}}");
                    Value::Object(Map::new())
                } else {
                    debug!(field = %path, "replaced NULL sentinel with null");
                    Value::Null
                }
            }
            _ => clean_value(value, &path, type_map),
        };
        out.insert(key, repaired);
    }
    out
}

fn is_sentinel(value: &Value) -> bool {
    value.as_str() == Some(SENTINEL_NULL)
}

/// Promotes nested object keys and joins scalar arrays, per `config`.
///
/// A non-object root is returned unchanged.
pub fn flatten(document: Value, config: &FlattenConfig) -> Value {
    match document {
        Value::Object(map) if !config.is_noop() => {
            let mut out = Map::with_capacity(map.len());
            flatten_into(map, "", config, &mut out);
            Value::Object(out)
        }
        other => other,
    }
}

fn flatten_into(map: Map<String, Value>, parent: &str, config: &FlattenConfig, out: &mut Map<String, Value>) {
    for (key, value) in map {
        let new_key = config.join(parent, &key);
        let value = match value {
            Value::Object(children) if config.flatten_nested_objects => {
                flatten_into(children, &new_key, config, out);
                continue;
            }
            Value::Array(items) if config.flatten_string_arrays && items.iter().all(is_scalar) => {
                debug!(field = %new_key, delimiter = %config.array_delimiter, "joined array");
                Value::String(join_scalars(&items, &config.array_delimiter))
            }
            other => other,
        };
        if out.insert(new_key.clone(), value).is_some() {
            warn!(field = %new_key, "flattened key collides with an existing field; last one wins");
        }
    }
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Object(_) | Value::Array(_))
}

fn join_scalars(items: &[Value], delimiter: &str) -> String {
    items
        .iter()
        .filter_map(|item| match item {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        })
        .collect::<Vec<_>>()
        .join(delimiter)
}

/// `flatten(clean(document))`.
pub fn prepare(document: Value, type_map: &TypeMap, config: &FlattenConfig) -> Value {
    match clean(document, type_map) {
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| flatten(item, config))
                .collect(),
        ),
        other => flatten(other, config),
    }
}
