use mediaprep_canonical::{time::is_parsable, DurationSpec, LanguageTag, Warning, WarningCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Media categories accepted without a warning.
pub const DEFAULT_VOCABULARY: &[&str] = &[
    "movie",
    "show",
    "podcast",
    "music",
    "news",
    "sports",
    "live",
    "educational",
    "documentary",
    "comedy",
    "drama",
    "action",
    "horror",
    "romance",
    "thriller",
    "animation",
    "family",
    "adventure",
    "fantasy",
    "crime",
    "mystery",
    "western",
    "war",
    "biography",
    "history",
    "entertainment",
];

/// Common category variants and the media category they stand for.
pub const DEFAULT_CATEGORY_ALIASES: &[(&str, &str)] = &[
    ("film", "movie"),
    ("series", "show"),
    ("tv", "show"),
    ("television", "show"),
    ("music video", "music"),
    ("comedy special", "comedy"),
    ("standup", "comedy"),
    ("documentary film", "documentary"),
    ("nature", "documentary"),
];

/// Validator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Known media categories (compared lower-cased).
    pub vocabulary: Vec<String>,
    /// Lower-cased variant → vocabulary category.
    pub category_aliases: BTreeMap<String, String>,
    /// Maximum title length in characters.
    pub max_title_chars: usize,
    /// Maximum uri length in characters.
    pub max_uri_chars: usize,
    /// Maximum number of categories.
    pub max_categories: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            vocabulary: DEFAULT_VOCABULARY.iter().map(|s| s.to_string()).collect(),
            category_aliases: DEFAULT_CATEGORY_ALIASES
                .iter()
                .map(|(variant, category)| (variant.to_string(), category.to_string()))
                .collect(),
            max_title_chars: 1000,
            max_uri_chars: 5000,
            max_categories: 250,
        }
    }
}

/// Outcome of checking the five required fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequiredReport {
    /// No errors.
    pub valid: bool,
    /// Blocking problems.
    pub errors: Vec<String>,
    /// Non-blocking problems.
    pub warnings: Vec<Warning>,
    /// Pass/fail per required field.
    pub field_status: BTreeMap<String, bool>,
}

/// Outcome of checking the optional fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionalReport {
    /// Non-blocking problems.
    pub warnings: Vec<Warning>,
    /// Which optional fields carry data.
    pub fields_found: BTreeMap<String, bool>,
}

/// Both reports combined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// No blocking errors.
    pub valid: bool,
    /// Blocking problems.
    pub errors: Vec<String>,
    /// Required and optional warnings.
    pub warnings: Vec<Warning>,
    /// Pass/fail per required field.
    pub field_status: BTreeMap<String, bool>,
    /// Which optional fields carry data.
    pub fields_found: BTreeMap<String, bool>,
}

/// Checks canonical documents against field contracts.
#[derive(Debug, Clone)]
pub struct Validator {
    vocabulary: BTreeSet<String>,
    config: ValidationConfig,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

impl Validator {
    /// Creates a validator.
    pub fn new(config: ValidationConfig) -> Self {
        let vocabulary = config
            .vocabulary
            .iter()
            .map(|category| category.to_lowercase())
            .collect();
        Self { vocabulary, config }
    }

    /// The settings in use.
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Lower-cases and trims `categories`, replaces known variants with
    /// their vocabulary category and keeps at most `max_categories`.
    ///
    /// Categories that are neither known nor aliased are kept lower-cased;
    /// validation still warns about them.
    pub fn normalize_categories(&self, categories: &[String]) -> Vec<String> {
        categories
            .iter()
            .map(|category| {
                let lower = category.trim().to_lowercase();
                if self.vocabulary.contains(&lower) {
                    return lower;
                }
                match self.config.category_aliases.get(&lower) {
                    Some(mapped) => mapped.to_lowercase(),
                    None => lower,
                }
            })
            .take(self.config.max_categories)
            .collect()
    }

    /// Checks `title`, `uri`, `categories`, `available_time` and `duration`.
    pub fn validate_required(&self, doc: &Value) -> RequiredReport {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let mut field_status = BTreeMap::new();

        let mut check = |field: &str, problems: Vec<String>, errors: &mut Vec<String>| {
            field_status.insert(field.to_string(), problems.is_empty());
            errors.extend(problems);
        };

        check("title", self.check_text(doc, "title", self.config.max_title_chars), &mut errors);

        let uri_problems = self.check_text(doc, "uri", self.config.max_uri_chars);
        if uri_problems.is_empty() {
            if let Some(uri) = doc.get("uri").and_then(Value::as_str) {
                if !looks_like_uri(uri) {
                    warnings.push(Warning::new(
                        WarningCode::InvalidUriShape,
                        "uri",
                        format!("'{}' may not be a valid URI", uri),
                    ));
                }
            }
        }
        check("uri", uri_problems, &mut errors);

        check("categories", self.check_categories(doc, &mut warnings), &mut errors);

        let time_problems = match present(doc, "available_time") {
            None => vec![missing("available_time")],
            Some(Value::String(text)) if is_parsable(text) => Vec::new(),
            Some(Value::String(text)) => vec![format!(
                "field 'available_time' is not a valid timestamp: {}",
                text
            )],
            Some(_) => vec!["field 'available_time' must be a string".to_string()],
        };
        check("available_time", time_problems, &mut errors);

        let duration_problems = match present(doc, "duration") {
            None => vec![missing("duration")],
            Some(Value::String(text)) if DurationSpec::is_valid(text) => Vec::new(),
            Some(Value::String(text)) => vec![format!(
                "field 'duration' must look like '5s', '1m' or '2h30m': {}",
                text
            )],
            Some(_) => vec!["field 'duration' must be a string".to_string()],
        };
        check("duration", duration_problems, &mut errors);

        RequiredReport {
            valid: errors.is_empty(),
            errors,
            warnings,
            field_status,
        }
    }

    /// Checks `language`, `persons` and `organizations`; never blocking.
    pub fn validate_optional(&self, doc: &Value) -> OptionalReport {
        let mut warnings = Vec::new();

        if let Some(language) = doc.get("language").and_then(Value::as_str) {
            if !language.is_empty() && !LanguageTag::is_valid(language) {
                warnings.push(Warning::new(
                    WarningCode::NonBcp47Language,
                    "language",
                    format!("'{}' may not be a valid BCP-47 tag", language),
                ));
            }
        }
        check_named_list(
            doc,
            "persons",
            WarningCode::PersonNotObject,
            WarningCode::PersonMissingName,
            &mut warnings,
        );
        check_named_list(
            doc,
            "organizations",
            WarningCode::OrganizationNotObject,
            WarningCode::OrganizationMissingName,
            &mut warnings,
        );

        let non_empty_list = |field: &str| {
            doc.get(field)
                .and_then(Value::as_array)
                .is_some_and(|items| !items.is_empty())
        };
        let fields_found = BTreeMap::from([
            ("language".to_string(), doc.get("language").is_some()),
            ("persons".to_string(), non_empty_list("persons")),
            ("organizations".to_string(), non_empty_list("organizations")),
            ("rating".to_string(), doc.get("rating").is_some()),
        ]);

        OptionalReport {
            warnings,
            fields_found,
        }
    }

    /// Required and optional checks in one report.
    pub fn validate(&self, doc: &Value) -> ValidationReport {
        let required = self.validate_required(doc);
        let optional = self.validate_optional(doc);
        let mut warnings = required.warnings;
        warnings.extend(optional.warnings);
        ValidationReport {
            valid: required.valid,
            errors: required.errors,
            warnings,
            field_status: required.field_status,
            fields_found: optional.fields_found,
        }
    }

    fn check_text(&self, doc: &Value, field: &str, max: usize) -> Vec<String> {
        match present(doc, field) {
            None => vec![missing(field)],
            Some(Value::String(text)) => {
                let len = text.chars().count();
                if len > max {
                    vec![format!("field '{}' exceeds {} characters: {}", field, max, len)]
                } else {
                    Vec::new()
                }
            }
            Some(_) => vec![format!("field '{}' must be a string", field)],
        }
    }

    fn check_categories(&self, doc: &Value, warnings: &mut Vec<Warning>) -> Vec<String> {
        let items = match present(doc, "categories") {
            None => return vec![missing("categories")],
            Some(Value::Array(items)) => items,
            Some(_) => return vec!["field 'categories' must be a string array".to_string()],
        };
        if items.len() > self.config.max_categories {
            return vec![format!(
                "field 'categories' exceeds {} items: {}",
                self.config.max_categories,
                items.len()
            )];
        }
        let mut problems = Vec::new();
        for (index, item) in items.iter().enumerate() {
            match item.as_str() {
                None => problems.push(format!("category at index {} must be a string", index)),
                Some(category) if !self.vocabulary.contains(&category.to_lowercase()) => {
                    warnings.push(Warning::new(
                        WarningCode::UnknownCategory,
                        format!("categories[{}]", index),
                        format!("'{}' is not a known media category", category),
                    ));
                }
                Some(_) => {}
            }
        }
        problems
    }
}

/// Present and not empty; empty strings and lists count as missing.
fn present<'a>(doc: &'a Value, field: &str) -> Option<&'a Value> {
    match doc.get(field)? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::Array(items) if items.is_empty() => None,
        value => Some(value),
    }
}

fn missing(field: &str) -> String {
    format!("missing required field: {}", field)
}

fn looks_like_uri(uri: &str) -> bool {
    ["http://", "https://", "gs://", "file://"]
        .iter()
        .any(|scheme| uri.starts_with(scheme))
        || uri.contains("://")
}

fn check_named_list(
    doc: &Value,
    field: &str,
    not_object: WarningCode,
    missing_name: WarningCode,
    warnings: &mut Vec<Warning>,
) {
    let Some(items) = doc.get(field).and_then(Value::as_array) else {
        return;
    };
    for (index, item) in items.iter().enumerate() {
        let location = format!("{}[{}]", field, index);
        match item.as_object() {
            None => warnings.push(Warning::new(not_object, location, "entry should be an object")),
            Some(entry) if !entry.contains_key("name") => {
                warnings.push(Warning::new(missing_name, location, "entry has no 'name'"))
            }
            Some(_) => {}
        }
    }
}
