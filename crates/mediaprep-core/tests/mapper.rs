use mediaprep_canonical::{Timestamp, WarningCode};
use mediaprep_core::{
    map_batch, map_record, CanonicalMapper, MapperConfig, MappingError, Person, ValueTransform,
};
use serde_json::{json, Value};

fn sample_record() -> Value {
    json!({
        "id": 1042,
        "title": "  The Long Night  ",
        "original_title": "Lambi Raat",
        "image": "img_1042",
        "genre": ["Drama", "Teen Drama", "Thriller", 7, "Talk Show"],
        "release_date": "2023-06-01T18:30:00.000Z",
        "episode_count": "14",
        "desc": "A family saga.",
        "audio_lang": "hi,en",
        "age_rating": "U/A 13+",
        "actors": ["Asha Rao:Lead", "NULL", "  ", "Vikram"],
        "directors": ["Meera Nair"],
        "keywords": ["saga"],
        "tags": "not-a-list",
        "extended": {
            "content_category": "series",
            "content_version": "",
            "producers": ["P One", "NULL"],
            "singers": ["S One"]
        },
        "licensing_from": "2023-01-01",
        "licensing_until": "2025-12-31",
        "rights": "worldwide"
    })
}

#[test]
fn maps_full_record() {
    let mapped = map_record(&sample_record(), &MapperConfig::default()).unwrap();
    let doc = &mapped.document;

    assert_eq!(doc.id, "1042");
    assert_eq!(doc.import_id, "1042");
    assert_eq!(doc.title, "The Long Night");
    assert_eq!(doc.uri, "gs://media-bucket/images/img_1042.jpg");
    assert_eq!(doc.categories, vec!["drama", "thriller", "show"]);
    assert_eq!(doc.available_time.as_str(), "2023-06-01T18:30:00Z");
    assert_eq!(doc.duration.as_str(), "1h10m");
    assert_eq!(doc.description.as_deref(), Some("A family saga."));
    assert_eq!(doc.language.as_deref(), Some("hi-IN"));
    assert_eq!(doc.content_rating, vec!["U/A 13+"]);
    assert_eq!(
        doc.persons,
        vec![
            Person::new("Asha Rao", "actor"),
            Person::new("Vikram", "actor"),
            Person::new("Meera Nair", "director"),
        ]
    );
    assert_eq!(doc.original_title.as_deref(), Some("Lambi Raat"));
    let licensing = doc.licensing.as_ref().unwrap();
    assert_eq!(licensing.from.as_str(), "2023-01-01T00:00:00Z");
    assert_eq!(licensing.until.as_str(), "2025-12-31T00:00:00Z");
    assert_eq!(
        doc.additional_crew,
        vec![Person::new("P One", "producer"), Person::new("S One", "singer")]
    );
    assert_eq!(doc.extra["keywords"], json!(["saga"]));
    assert_eq!(doc.extra["tags"], json!([]));
    assert_eq!(doc.extra["content_category"], json!("series"));
    assert!(!doc.extra.contains_key("content_version"));
    assert_eq!(doc.extra["distribution_rights"], json!("worldwide"));
    assert!(mapped.warnings.is_empty(), "{:?}", mapped.warnings);

    let value = doc.to_value().unwrap();
    assert_eq!(value["_id"], "1042");
    assert_eq!(value["tags"], json!([]));
    assert!(value.get("extra").is_none());
}

#[test]
fn missing_id_generates_one_with_a_single_warning() {
    let mut record = sample_record();
    record.as_object_mut().unwrap().remove("id");

    let mapped = map_record(&record, &MapperConfig::default()).unwrap();
    assert!(!mapped.document.id.is_empty());
    assert_eq!(mapped.document.id, mapped.document.import_id);
    assert_eq!(mapped.warnings.len(), 1);
    assert_eq!(mapped.warnings[0].code, WarningCode::GeneratedIdentifier);
}

#[test]
fn missing_title_or_uri_fails() {
    let config = MapperConfig::default();
    for title in [json!(null), json!(""), json!("   "), json!("NULL")] {
        let mut record = sample_record();
        record["title"] = title;
        assert_eq!(
            map_record(&record, &config),
            Err(MappingError::MissingRequiredField {
                field: "title".into()
            })
        );
    }

    let mut record = sample_record();
    record["image"] = json!("NULL");
    assert_eq!(
        map_record(&record, &config),
        Err(MappingError::MissingRequiredField { field: "uri".into() })
    );
}

#[test]
fn uri_rules() {
    let config = MapperConfig::default();
    let mut record = sample_record();
    record["image"] = json!("https://cdn.example.com/a.png");
    assert_eq!(
        map_record(&record, &config).unwrap().document.uri,
        "https://cdn.example.com/a.png"
    );

    record["image"] = json!("x".repeat(5000));
    assert_eq!(
        map_record(&record, &config),
        Err(MappingError::UriTooLong {
            len: 5000 + "gs://media-bucket/images/".len() + ".jpg".len(),
            max: 5000
        })
    );
}

#[test]
fn long_title_is_truncated_with_warning() {
    let mut record = sample_record();
    record["title"] = json!("é".repeat(1200));
    let mapped = map_record(&record, &MapperConfig::default()).unwrap();
    assert_eq!(mapped.document.title.chars().count(), 1000);
    assert!(mapped
        .warnings
        .iter()
        .any(|w| w.code == WarningCode::TitleTruncated));
}

#[test]
fn categories_fall_back_and_accept_single_strings() {
    let config = MapperConfig::default();
    let mut record = sample_record();

    record["genre"] = json!([]);
    assert_eq!(
        map_record(&record, &config).unwrap().document.categories,
        vec!["entertainment"]
    );

    record["genre"] = json!([1, null]);
    assert_eq!(
        map_record(&record, &config).unwrap().document.categories,
        vec!["entertainment"]
    );

    record["genre"] = json!("Comedy");
    assert_eq!(
        map_record(&record, &config).unwrap().document.categories,
        vec!["comedy"]
    );

    let many: Vec<String> = (0..300).map(|i| format!("G{}", i)).collect();
    record["genre"] = json!(many);
    assert_eq!(map_record(&record, &config).unwrap().document.categories.len(), 250);
}

#[test]
fn dates_fall_back_to_now() {
    let config = MapperConfig::default();
    let mut record = sample_record();

    record.as_object_mut().unwrap().remove("release_date");
    let mapped = map_record(&record, &config).unwrap();
    assert!(Timestamp::is_valid(mapped.document.available_time.as_str()));
    assert!(mapped.warnings.is_empty());

    record["release_date"] = json!("sometime in spring");
    let mapped = map_record(&record, &config).unwrap();
    assert!(Timestamp::is_valid(mapped.document.available_time.as_str()));
    assert_eq!(mapped.warnings.len(), 1);
    assert_eq!(mapped.warnings[0].code, WarningCode::UnparsableDate);
    assert_eq!(mapped.warnings[0].field, "available_time");
}

#[test]
fn duration_defaults_to_one_unit() {
    let config = MapperConfig::default();
    let mut record = sample_record();
    for (count, expected) in [
        (json!(null), "5m"),
        (json!("many"), "5m"),
        (json!(0), "5m"),
        (json!(-3), "5m"),
        (json!(11), "55m"),
        (json!(12), "1h"),
        (json!(25.0), "2h5m"),
    ] {
        record["episode_count"] = count;
        assert_eq!(map_record(&record, &config).unwrap().document.duration.as_str(), expected);
    }
}

#[test]
fn language_and_rating_edge_cases() {
    let config = MapperConfig::default();
    let mut record = sample_record();

    record["audio_lang"] = json!("NULL");
    record["age_rating"] = json!("NULL");
    let doc = map_record(&record, &config).unwrap().document;
    assert_eq!(doc.language, None);
    assert!(doc.content_rating.is_empty());

    record["audio_lang"] = json!("fr");
    assert_eq!(
        map_record(&record, &config).unwrap().document.language.as_deref(),
        Some("fr")
    );
}

#[test]
fn original_title_equal_to_title_is_dropped() {
    let mut record = sample_record();
    record["original_title"] = record["title"].clone();
    let doc = map_record(&record, &MapperConfig::default()).unwrap().document;
    assert_eq!(doc.original_title, None);
}

#[test]
fn dotted_sources_reach_nested_values() {
    let mut config = MapperConfig::default();
    config.fields.title = "meta.name".into();
    config.fields.uri = "media.poster".into();

    let record = json!({
        "id": "a1",
        "meta": {"name": "Nested"},
        "media": {"poster": "gs://bucket/p.jpg"}
    });
    let doc = map_record(&record, &config).unwrap().document;
    assert_eq!(doc.title, "Nested");
    assert_eq!(doc.uri, "gs://bucket/p.jpg");
}

#[test]
fn transforms_apply_to_pass_through_fields() {
    let mut config = MapperConfig::default();
    config.transforms.insert(
        "keywords".into(),
        ValueTransform::ToArray {
            separator: ";".into(),
        },
    );
    config
        .transforms
        .insert("media_type".into(), ValueTransform::NormalizeMediaType);
    config
        .transforms
        .insert("distribution_rights".into(), ValueTransform::NormalizeMediaType);

    let mut record = sample_record();
    record["keywords"] = json!("love; loss ;;family");
    record["rights"] = json!("doc");

    let mapped = map_record(&record, &config).unwrap();
    assert_eq!(
        mapped.document.extra["keywords"],
        json!(["love", "loss", "family"])
    );
    assert_eq!(mapped.document.extra["distribution_rights"], json!("DOCUMENT"));
    assert!(!mapped.document.extra.contains_key("media_type"));
    assert!(mapped.warnings.is_empty(), "{:?}", mapped.warnings);
}

#[test]
fn config_problems_are_reported() {
    assert!(MapperConfig::default().problems().is_empty());

    let mut config = MapperConfig::default();
    config.transforms.insert("title".into(), ValueTransform::ToString);
    config.constants.minutes_per_unit = 0;
    let problems = config.problems();
    assert_eq!(problems.len(), 2);
    assert!(problems.iter().any(|p| p.contains("title")));
}

#[test]
fn config_deserializes_from_partial_json() {
    let config: MapperConfig = serde_json::from_value(json!({
        "constants": {"minutes_per_unit": 30},
        "transforms": {"keywords": {"type": "to_array"}}
    }))
    .unwrap();
    assert_eq!(config.constants.minutes_per_unit, 30);
    assert_eq!(config.constants.max_categories, 250);
    assert_eq!(config.fields.uri, "image");
    assert_eq!(
        config.transforms["keywords"],
        ValueTransform::ToArray {
            separator: ",".into()
        }
    );
}

#[test]
fn batch_isolates_failures() {
    let mut bad = sample_record();
    bad.as_object_mut().unwrap().remove("title");
    let mut nameless = sample_record();
    nameless.as_object_mut().unwrap().remove("id");

    let outcome = map_batch(&[bad, sample_record(), nameless], &MapperConfig::default());

    assert_eq!(outcome.documents.len(), 2);
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].index, 0);
    assert_eq!(outcome.errors[0].record_id.as_deref(), Some("1042"));
    assert_eq!(outcome.errors[0].errors, vec!["missing required field: title"]);

    let tagged: Vec<(usize, WarningCode)> = outcome
        .warnings
        .iter()
        .map(|w| (w.index, w.warning.code))
        .collect();
    assert!(tagged.contains(&(2, WarningCode::GeneratedIdentifier)));
}

#[test]
fn batch_reports_unknown_categories_as_warnings() {
    let mut record = sample_record();
    record["genre"] = json!(["Kids"]);
    let outcome = CanonicalMapper::new(MapperConfig::default()).map_batch(&[record]);

    assert_eq!(outcome.documents.len(), 1);
    assert!(outcome
        .warnings
        .iter()
        .any(|w| w.index == 0 && w.warning.code == WarningCode::UnknownCategory));
}

#[test]
fn epoch_millisecond_dates_map_and_survive_the_batch() {
    let mut record = sample_record();
    record["release_date"] = json!(1700000000000u64);

    let mapped = map_record(&record, &MapperConfig::default()).unwrap();
    assert_eq!(mapped.document.available_time.as_str(), "2023-11-14T22:13:20Z");
    assert!(mapped.warnings.is_empty(), "{:?}", mapped.warnings);

    let outcome = map_batch(&[record], &MapperConfig::default());
    assert_eq!(outcome.documents.len(), 1);
    assert!(outcome.errors.is_empty(), "{:?}", outcome.errors);
}

#[test]
fn out_of_range_epoch_falls_back_to_now_and_keeps_the_record() {
    let mut record = sample_record();
    record["release_date"] = json!(99999999999999999u64);

    let outcome = map_batch(&[record], &MapperConfig::default());
    assert_eq!(outcome.documents.len(), 1);
    assert!(outcome.errors.is_empty(), "{:?}", outcome.errors);
    assert!(outcome
        .warnings
        .iter()
        .any(|w| w.warning.code == WarningCode::UnparsableDate
            && w.warning.field == "available_time"));
    assert!(Timestamp::parse_lenient(outcome.documents[0].available_time.as_str()).is_ok());
}

#[test]
fn batch_honours_raised_mapping_limits() {
    let mut config = MapperConfig::default();
    config.constants.max_title_chars = 2000;
    config.constants.max_categories = 300;

    let mut record = sample_record();
    record["title"] = json!("x".repeat(1500));
    let many: Vec<String> = (0..280).map(|i| format!("g{}", i)).collect();
    record["genre"] = json!(many);

    let outcome = CanonicalMapper::new(config).map_batch(&[record]);
    assert!(outcome.errors.is_empty(), "{:?}", outcome.errors);
    assert_eq!(outcome.documents[0].title.chars().count(), 1500);
    assert_eq!(outcome.documents[0].categories.len(), 280);
}

#[test]
fn duration_in_seconds_wins_over_episode_count() {
    let config = MapperConfig::default();
    let mut record = sample_record();

    record["duration_seconds"] = json!(5430);
    assert_eq!(
        map_record(&record, &config).unwrap().document.duration.as_str(),
        "1h30m30s"
    );

    record["duration_seconds"] = json!("45");
    assert_eq!(map_record(&record, &config).unwrap().document.duration.as_str(), "45s");

    record["duration_seconds"] = json!(0);
    assert_eq!(
        map_record(&record, &config).unwrap().document.duration.as_str(),
        "1h10m"
    );
}

#[test]
fn batch_normalizes_category_variants() {
    let mut record = sample_record();
    record["genre"] = json!(["Series", "Film", "Drama", "Kids"]);

    let outcome = map_batch(&[record], &MapperConfig::default());
    assert_eq!(
        outcome.documents[0].categories,
        vec!["show", "movie", "drama", "kids"]
    );
    let unknown: Vec<_> = outcome
        .warnings
        .iter()
        .filter(|w| w.warning.code == WarningCode::UnknownCategory)
        .collect();
    assert_eq!(unknown.len(), 1);
}
