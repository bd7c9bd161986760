use crate::errors::SchemaError;
use crate::field_type::FieldType;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

/// A per-field search capability flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// `retrievable`
    Retrievable,
    /// `indexable` (configured as `filterable`)
    Indexable,
    /// `searchable`
    Searchable,
    /// `dynamicFacetable` (configured as `facetable`)
    DynamicFacetable,
    /// `completable`
    Completable,
}

impl Capability {
    /// Every capability, in application order.
    pub const ALL: [Capability; 5] = [
        Capability::Retrievable,
        Capability::Indexable,
        Capability::Searchable,
        Capability::DynamicFacetable,
        Capability::Completable,
    ];

    /// Whether a node of `field_type` can carry this flag.
    pub fn accepts(&self, field_type: &FieldType) -> bool {
        match self {
            Capability::Retrievable | Capability::Indexable => matches!(
                field_type,
                FieldType::String
                    | FieldType::Number
                    | FieldType::Integer
                    | FieldType::Boolean
                    | FieldType::Datetime
                    | FieldType::Geolocation
            ),
            Capability::Searchable | Capability::Completable => {
                matches!(field_type, FieldType::String)
            }
            Capability::DynamicFacetable => field_type.is_scalar(),
        }
    }

    /// Key of the flag inside a schema node.
    pub fn schema_key(&self) -> &'static str {
        match self {
            Capability::Retrievable => "retrievable",
            Capability::Indexable => "indexable",
            Capability::Searchable => "searchable",
            Capability::DynamicFacetable => "dynamicFacetable",
            Capability::Completable => "completable",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.schema_key())
    }
}

/// Canonical fields every generated field-settings set covers.
pub const REQUIRED_FIELDS: &[&str] = &["title", "uri", "categories", "available_time", "duration"];

/// Dotted field paths assigned to each capability.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapabilitySets {
    /// Fields returned in results.
    pub retrievable: BTreeSet<String>,
    /// Full-text searchable fields.
    pub searchable: BTreeSet<String>,
    /// Filterable fields; drives `indexable`.
    #[serde(alias = "indexable")]
    pub filterable: BTreeSet<String>,
    /// Facet fields; drives `dynamicFacetable`.
    #[serde(alias = "dynamic_facetable")]
    pub facetable: BTreeSet<String>,
    /// Autocomplete fields.
    pub completable: BTreeSet<String>,
}

impl CapabilitySets {
    /// Parses a capability configuration object.
    pub fn from_value(value: Value) -> Result<Self, SchemaError> {
        if !value.is_object() {
            return Err(SchemaError::NotAnObject);
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Fields configured for `capability`.
    pub fn fields(&self, capability: Capability) -> &BTreeSet<String> {
        match capability {
            Capability::Retrievable => &self.retrievable,
            Capability::Indexable => &self.filterable,
            Capability::Searchable => &self.searchable,
            Capability::DynamicFacetable => &self.facetable,
            Capability::Completable => &self.completable,
        }
    }

    fn fields_mut(&mut self, capability: Capability) -> &mut BTreeSet<String> {
        match capability {
            Capability::Retrievable => &mut self.retrievable,
            Capability::Indexable => &mut self.filterable,
            Capability::Searchable => &mut self.searchable,
            Capability::DynamicFacetable => &mut self.facetable,
            Capability::Completable => &mut self.completable,
        }
    }

    /// Field settings for documents shaped like `sample`.
    ///
    /// Searchable fields present in `sample` keep every capability these
    /// sets give them. Required canonical fields not covered that way are
    /// all retrievable; `title` and `categories` are also searchable and
    /// filterable, `title` completable and `categories` facetable.
    pub fn for_document(&self, sample: &Value) -> CapabilitySets {
        let mut generated = CapabilitySets::default();
        let mut covered = BTreeSet::new();

        for field in &self.searchable {
            if lookup(sample, field).is_none() {
                debug!(field = %field, "searchable field absent from sample, skipped");
                continue;
            }
            for capability in Capability::ALL {
                if self.contains(capability, field) {
                    generated.fields_mut(capability).insert(field.clone());
                }
            }
            covered.insert(field.as_str());
        }

        for field in REQUIRED_FIELDS {
            if covered.contains(field) {
                continue;
            }
            let mut grant = |capability| {
                generated.fields_mut(capability).insert(field.to_string());
            };
            grant(Capability::Retrievable);
            if matches!(*field, "title" | "categories") {
                grant(Capability::Searchable);
                grant(Capability::Indexable);
            }
            if *field == "title" {
                grant(Capability::Completable);
            }
            if *field == "categories" {
                grant(Capability::DynamicFacetable);
            }
        }

        debug!(
            retrievable = generated.retrievable.len(),
            searchable = generated.searchable.len(),
            "generated field settings"
        );
        generated
    }

    /// Whether `path` is configured for `capability`.
    pub fn contains(&self, capability: Capability, path: &str) -> bool {
        self.fields(capability).contains(path)
    }

    /// True when no capability names any field.
    pub fn is_empty(&self) -> bool {
        Capability::ALL
            .iter()
            .all(|capability| self.fields(*capability).is_empty())
    }
}

fn lookup<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    if let Some(value) = document.get(path) {
        return Some(value);
    }
    path.split('.')
        .try_fold(document, |current, segment| current.get(segment))
}
