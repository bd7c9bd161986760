use mediaprep_canonical::{
    time::is_parsable, Canonicalizer, Digest, DigestAlg, DurationSpec,
    FieldPath, LanguageTag, Timestamp, ValidationError, Warning, WarningCode,
};
use serde_json::json;

#[test]
fn digest_serializes_to_golden_json() {
    let digest = Digest::sha256(b"");

    assert_eq!(
        serde_json::to_string(&digest).unwrap(),
        r#"{"alg":"sha-256","b64":"47DEQpj8HBSa-_TImW-5JCeuQeRkm5NMpJWZG3hSuFU"}"#
    );
    assert_eq!(Digest::new(DigestAlg::Sha256, digest.b64.clone()).unwrap(), digest);
    assert!(Digest::new(DigestAlg::Sha256, "short").is_err());
}

#[test]
fn canonicalizer_produces_ordered_bytes() {
    let canonicalizer = Canonicalizer::new();
    let value = json!({"b": 1, "a": {"nested": 2}});
    let bytes = canonicalizer.canonicalize(&value).unwrap();
    assert_eq!(bytes, br#"{"a":{"nested":2},"b":1}"#.to_vec());
}

#[test]
fn canonicalizer_ignores_key_order_when_comparing() {
    let canonicalizer = Canonicalizer::new();
    let left = json!({"x": {"type": "string", "searchable": true}, "y": [1, 2]});
    let right = json!({"y": [1, 2], "x": {"searchable": true, "type": "string"}});
    let left_bytes = canonicalizer.canonicalize(&left).unwrap();
    let right_bytes = canonicalizer.canonicalize(&right).unwrap();
    assert_eq!(left_bytes, right_bytes);
    assert_eq!(Digest::sha256(&left_bytes), Digest::sha256(&right_bytes));

    let flipped = json!({"x": {"type": "string", "searchable": false}, "y": [1, 2]});
    assert_ne!(canonicalizer.canonicalize(&flipped).unwrap(), left_bytes);
}

#[test]
fn canonicalize_serialize_accepts_typed_values() {
    let canonicalizer = Canonicalizer::new();
    let warning = Warning::new(WarningCode::TitleTruncated, "title", "cut");
    let bytes = canonicalizer.canonicalize_serialize(&warning).unwrap();
    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        r#"{"code":"title_truncated","field":"title","message":"cut"}"#
    );
}

#[test]
fn lenient_timestamps_normalize_to_utc_seconds() {
    let cases = [
        ("2024-03-01T10:20:30.000Z", "2024-03-01T10:20:30Z"),
        ("2024-03-01T10:20:30.123456+00:00", "2024-03-01T10:20:30Z"),
        ("2024-03-01T10:20:30+05:30", "2024-03-01T04:50:30Z"),
        ("2024-03-01 10:20:30", "2024-03-01T10:20:30Z"),
        ("2024-03-01", "2024-03-01T00:00:00Z"),
        ("2024/03/01", "2024-03-01T00:00:00Z"),
        ("15/08/2023", "2023-08-15T00:00:00Z"),
        ("Tue, 1 Jul 2003 10:52:37 +0200", "2003-07-01T08:52:37Z"),
        ("1700000000", "2023-11-14T22:13:20Z"),
        ("1700000000000", "2023-11-14T22:13:20Z"),
        ("1700000000123", "2023-11-14T22:13:20Z"),
        ("  2024-03-01  ", "2024-03-01T00:00:00Z"),
    ];

    for (input, expected) in cases {
        let ts = Timestamp::parse_lenient(input).unwrap();
        assert_eq!(ts.as_str(), expected, "input {input:?}");
        assert!(Timestamp::is_valid(ts.as_str()));
    }
}

#[test]
fn unparsable_dates_are_reported() {
    assert_eq!(
        Timestamp::parse_lenient("sometime soon"),
        Err(ValidationError::Unparsable("sometime soon".into()))
    );
    assert!(!is_parsable(""));
    assert!(!is_parsable("NULL"));
    assert!(is_parsable("2020-01-01T00:00:00Z"));
}

#[test]
fn instants_outside_four_digit_years_are_unparsable() {
    // Epoch seconds that land in year 33658.
    assert!(!is_parsable("999999999999"));
    // Epoch milliseconds past year 9999.
    assert!(!is_parsable("99999999999999999"));
    assert!(Timestamp::parse_lenient("99999999999999999").is_err());
    assert!(is_parsable("253402300799"));
}

#[test]
fn timestamp_now_is_well_formed() {
    let now = Timestamp::now();
    assert!(Timestamp::is_valid(now.as_str()));
    assert!(now.as_str().ends_with('Z'));
    assert!(now.to_datetime().is_some());
}

#[test]
fn duration_formats_minutes() {
    assert_eq!(DurationSpec::from_minutes(5).as_str(), "5m");
    assert_eq!(DurationSpec::from_minutes(59).as_str(), "59m");
    assert_eq!(DurationSpec::from_minutes(60).as_str(), "1h");
    assert_eq!(DurationSpec::from_minutes(125).as_str(), "2h5m");
    assert!(DurationSpec::is_valid("1h30m"));
    assert!(DurationSpec::is_valid("45s"));
    assert!(!DurationSpec::is_valid("90 minutes"));
    assert!(DurationSpec::parse("PT5M").is_err());
}

#[test]
fn duration_formats_seconds() {
    assert_eq!(DurationSpec::from_seconds(0).as_str(), "0s");
    assert_eq!(DurationSpec::from_seconds(45).as_str(), "45s");
    assert_eq!(DurationSpec::from_seconds(60).as_str(), "1m");
    assert_eq!(DurationSpec::from_seconds(90).as_str(), "1m30s");
    assert_eq!(DurationSpec::from_seconds(3600).as_str(), "1h");
    assert_eq!(DurationSpec::from_seconds(3605).as_str(), "1h5s");
    assert_eq!(DurationSpec::from_seconds(5430).as_str(), "1h30m30s");
    assert!(DurationSpec::is_valid(DurationSpec::from_seconds(7322).as_str()));
}

#[test]
fn language_tags_follow_bcp47_shape() {
    for tag in ["en", "en-US", "hi-IN", "zh-Hant-TW", "es-419"] {
        assert!(LanguageTag::is_valid(tag), "{tag}");
    }
    for tag in ["EN", "english", "en_US", "en-us"] {
        assert!(!LanguageTag::is_valid(tag), "{tag}");
    }
}

#[test]
fn field_paths_join_with_dots() {
    let path = FieldPath::root().child("extended").child("producers");
    assert_eq!(path.as_str(), "extended.producers");
    assert_eq!(FieldPath::root().to_string(), "root");
    assert!(FieldPath::root().is_root());
}

#[test]
fn warning_matches_expected_shape() {
    let warning = Warning::new(
        WarningCode::GeneratedIdentifier,
        "id",
        "missing id in source data",
    );

    let serialized = serde_json::to_value(&warning).unwrap();
    let expected = json!({
        "code": "generated_identifier",
        "field": "id",
        "message": "missing id in source data"
    });

    assert_eq!(serialized, expected);
    assert_eq!(
        warning.to_string(),
        "[generated_identifier] id: missing id in source data"
    );
}
