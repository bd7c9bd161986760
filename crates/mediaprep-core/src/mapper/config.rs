use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Canonical fields produced by dedicated rules; transforms cannot target them.
pub const TYPED_FIELDS: &[&str] = &[
    "id",
    "_id",
    "title",
    "uri",
    "categories",
    "available_time",
    "duration",
    "description",
    "language",
    "content_rating",
    "persons",
    "original_title",
    "licensing",
    "additional_crew",
];

/// Where each canonical field is read from in a source record.
///
/// Values are source keys; dotted paths reach into nested objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSources {
    /// Source of `id`.
    pub id: String,
    /// Source of `title`.
    pub title: String,
    /// Source of `uri`.
    pub uri: String,
    /// Source of `categories`.
    pub categories: String,
    /// Source of `available_time`.
    pub available_time: String,
    /// Source of `duration`, counted in units of `minutes_per_unit`.
    pub duration: String,
    /// Source of `duration` in seconds; a positive value wins over `duration`.
    pub duration_seconds: String,
    /// Source of `description`.
    pub description: String,
    /// Source of `language`.
    pub language: String,
    /// Source of `content_rating`.
    pub content_rating: String,
    /// Source of `original_title`.
    pub original_title: String,
    /// Source of `keywords`.
    pub keywords: String,
    /// Source of `tags`.
    pub tags: String,
    /// Source of `extended`.
    pub extended: String,
    /// Source of `licensing_from`.
    pub licensing_from: String,
    /// Source of `licensing_until`.
    pub licensing_until: String,
    /// Source of `distribution_rights`.
    pub distribution_rights: String,
}

impl Default for FieldSources {
    fn default() -> Self {
        Self {
            id: "id".into(),
            title: "title".into(),
            uri: "image".into(),
            categories: "genre".into(),
            available_time: "release_date".into(),
            duration: "episode_count".into(),
            duration_seconds: "duration_seconds".into(),
            description: "desc".into(),
            language: "audio_lang".into(),
            content_rating: "age_rating".into(),
            original_title: "original_title".into(),
            keywords: "keywords".into(),
            tags: "tags".into(),
            extended: "extended".into(),
            licensing_from: "licensing_from".into(),
            licensing_until: "licensing_until".into(),
            distribution_rights: "rights".into(),
        }
    }
}

/// A source list consolidated into `persons`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonSource {
    /// Source key of the list.
    pub field: String,
    /// Role given to every entry.
    pub role: String,
    /// Keep only the part before the first `:` (`"Name:Character"`).
    #[serde(default)]
    pub strip_detail: bool,
}

impl PersonSource {
    fn new(field: &str, role: &str, strip_detail: bool) -> Self {
        Self {
            field: field.into(),
            role: role.into(),
            strip_detail,
        }
    }
}

/// Lookup tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingTables {
    /// Source genre → media category. Unlisted genres are lower-cased.
    pub genre_categories: BTreeMap<String, String>,
    /// ISO-639 code → BCP-47 tag. Unlisted codes pass through.
    pub languages: BTreeMap<String, String>,
}

impl Default for MappingTables {
    fn default() -> Self {
        let genre_categories = [
            ("Comedy", "comedy"),
            ("Romance", "romance"),
            ("Drama", "drama"),
            ("Horror", "horror"),
            ("Action", "action"),
            ("Animation", "animation"),
            ("Entertainment", "show"),
            ("Family", "family"),
            ("Tragedy", "drama"),
            ("Teen Drama", "drama"),
            ("Talk Show", "show"),
            ("Educational", "educational"),
            ("Technology", "educational"),
            ("Documentary", "documentary"),
            ("Nature", "documentary"),
        ];
        let languages = [
            ("hi", "hi-IN"),
            ("mr", "mr-IN"),
            ("ta", "ta-IN"),
            ("bn", "bn-IN"),
            ("ml", "ml-IN"),
            ("kn", "kn-IN"),
            ("te", "te-IN"),
            ("en", "en-US"),
        ];
        Self {
            genre_categories: genre_categories
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            languages: languages
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

/// Business constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingConstants {
    /// Estimated minutes per counted unit (episode).
    pub minutes_per_unit: u64,
    /// Prepended to bare image identifiers.
    pub uri_prefix: String,
    /// Appended to bare image identifiers.
    pub uri_suffix: String,
    /// Category used when none can be derived.
    pub default_category: String,
    /// Titles are cut to this many characters.
    pub max_title_chars: usize,
    /// Longer uris fail the record.
    pub max_uri_chars: usize,
    /// Categories beyond this count are dropped.
    pub max_categories: usize,
}

impl Default for MappingConstants {
    fn default() -> Self {
        Self {
            minutes_per_unit: 5,
            uri_prefix: "gs://media-bucket/images/".into(),
            uri_suffix: ".jpg".into(),
            default_category: "entertainment".into(),
            max_title_chars: 1000,
            max_uri_chars: 5000,
            max_categories: 250,
        }
    }
}

/// Value rewrite applied to a pass-through field after mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValueTransform {
    /// Splits a string on `separator`, trimming and dropping empty parts.
    ToArray {
        /// Split marker, `,` by default.
        #[serde(default = "default_separator")]
        separator: String,
    },
    /// Any value to its string form.
    ToString,
    /// `video` → `VIDEO`, `doc`/`document` → `DOCUMENT`, otherwise upper-cased.
    NormalizeMediaType,
}

fn default_separator() -> String {
    ",".to_string()
}

impl ValueTransform {
    /// Name used in configuration.
    pub fn name(&self) -> &'static str {
        match self {
            ValueTransform::ToArray { .. } => "to_array",
            ValueTransform::ToString => "to_string",
            ValueTransform::NormalizeMediaType => "normalize_media_type",
        }
    }
}

/// Everything the canonical mapper needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Source keys per canonical field.
    pub fields: FieldSources,
    /// Ordered person sources.
    pub persons: Vec<PersonSource>,
    /// Extended-metadata keys copied to the top level when truthy.
    pub extended_fields: Vec<String>,
    /// Extended-metadata lists folded into `additional_crew`.
    pub crew_fields: Vec<String>,
    /// Lookup tables.
    pub tables: MappingTables,
    /// Business constants.
    pub constants: MappingConstants,
    /// Pass-through field → transform.
    pub transforms: BTreeMap<String, ValueTransform>,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            fields: FieldSources::default(),
            persons: vec![
                PersonSource::new("actors", "actor", true),
                PersonSource::new("directors", "director", false),
            ],
            extended_fields: [
                "content_category",
                "digital_keywords",
                "content_version",
                "content_descriptors",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            crew_fields: [
                "producers",
                "executive_producers",
                "music_directors",
                "lyricists",
                "narrators",
                "singers",
                "storywriters",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            tables: MappingTables::default(),
            constants: MappingConstants::default(),
            transforms: BTreeMap::new(),
        }
    }
}

impl MapperConfig {
    /// Checks the settings that would make every mapping misbehave.
    ///
    /// Returns one message per problem.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let constants = &self.constants;
        if constants.minutes_per_unit == 0 {
            problems.push("mapping.constants.minutes_per_unit must be greater than 0".to_string());
        }
        for (name, value) in [
            ("max_title_chars", constants.max_title_chars),
            ("max_uri_chars", constants.max_uri_chars),
            ("max_categories", constants.max_categories),
        ] {
            if value == 0 {
                problems.push(format!("mapping.constants.{} must be greater than 0", name));
            }
        }
        if constants.default_category.trim().is_empty() {
            problems.push("mapping.constants.default_category must not be empty".to_string());
        }
        for (field, transform) in &self.transforms {
            if TYPED_FIELDS.contains(&field.as_str()) {
                problems.push(format!(
                    "mapping.transforms.{}: {} cannot target a typed canonical field",
                    field,
                    transform.name()
                ));
            }
            if let ValueTransform::ToArray { separator } = transform {
                if separator.is_empty() {
                    problems.push(format!(
                        "mapping.transforms.{}: separator must not be empty",
                        field
                    ));
                }
            }
        }
        problems
    }
}
