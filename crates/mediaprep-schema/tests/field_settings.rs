use mediaprep_schema::{Capability, CapabilitySets, REQUIRED_FIELDS};
use serde_json::json;
use std::collections::BTreeSet;

fn names(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn configured() -> CapabilitySets {
    CapabilitySets::from_value(json!({
        "searchable": ["description", "keywords", "bio.name", "missing"],
        "retrievable": ["description", "bio.name", "year"],
        "filterable": ["keywords"],
        "facetable": ["keywords"],
        "completable": ["description"]
    }))
    .unwrap()
}

#[test]
fn required_fields_get_defaults() {
    let generated = CapabilitySets::default().for_document(&json!({}));

    assert_eq!(generated.retrievable, names(REQUIRED_FIELDS));
    assert_eq!(generated.searchable, names(&["title", "categories"]));
    assert_eq!(generated.filterable, names(&["title", "categories"]));
    assert_eq!(generated.completable, names(&["title"]));
    assert_eq!(generated.facetable, names(&["categories"]));
}

#[test]
fn searchable_fields_present_in_sample_keep_their_capabilities() {
    let sample = json!({
        "description": "A family saga.",
        "keywords": ["saga"],
        "bio": {"name": "Asha"},
        "year": 2023
    });
    let generated = configured().for_document(&sample);

    assert!(generated.contains(Capability::Searchable, "description"));
    assert!(generated.contains(Capability::Retrievable, "description"));
    assert!(generated.contains(Capability::Completable, "description"));
    assert!(!generated.contains(Capability::Indexable, "description"));

    assert!(generated.contains(Capability::Indexable, "keywords"));
    assert!(generated.contains(Capability::DynamicFacetable, "keywords"));
    assert!(!generated.contains(Capability::Retrievable, "keywords"));

    assert!(generated.contains(Capability::Searchable, "bio.name"));
    assert!(generated.contains(Capability::Retrievable, "bio.name"));

    // Only searchable fields are carried over.
    assert!(!generated.contains(Capability::Retrievable, "year"));
    assert!(!generated.contains(Capability::Searchable, "missing"));
}

#[test]
fn configured_required_field_replaces_defaults() {
    let sets = CapabilitySets::from_value(json!({"searchable": ["title"]})).unwrap();
    let generated = sets.for_document(&json!({"title": "The Long Night"}));

    assert!(generated.contains(Capability::Searchable, "title"));
    assert!(!generated.contains(Capability::Retrievable, "title"));
    assert!(!generated.contains(Capability::Completable, "title"));
    assert!(generated.contains(Capability::DynamicFacetable, "categories"));
}

#[test]
fn absent_required_field_in_sample_still_gets_defaults() {
    let sets = CapabilitySets::from_value(json!({"searchable": ["title"]})).unwrap();
    let generated = sets.for_document(&json!({"uri": "gs://bucket/a.jpg"}));

    assert!(generated.contains(Capability::Completable, "title"));
    assert!(generated.contains(Capability::Retrievable, "uri"));
}
