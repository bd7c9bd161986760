//! Per-field mapping rules. Everything here is total except [`title`] and
//! [`uri`].

use super::config::{MappingConstants, MappingTables, PersonSource, ValueTransform};
use crate::document::Person;
use crate::errors::MappingError;
use mediaprep_canonical::{DurationSpec, Timestamp, Warning, WarningCode, SENTINEL_NULL};
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Value at `path` in `record`; an exact key wins over a dotted walk.
pub(crate) fn source_value<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    if let Some(value) = record.get(path) {
        return Some(value);
    }
    if !path.contains('.') {
        return None;
    }
    path.split('.')
        .try_fold(record, |current, segment| current.get(segment))
}

/// Scalar rendered as text; containers and null have none.
pub(crate) fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Text that is neither blank nor the sentinel.
pub(crate) fn meaningful_text(value: Option<&Value>) -> Option<String> {
    let text = as_text(value?)?;
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == SENTINEL_NULL {
        None
    } else {
        Some(text)
    }
}

/// Loose truthiness: null, false, zero and empty containers are false.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

pub(crate) fn title(
    value: Option<&Value>,
    constants: &MappingConstants,
    warnings: &mut Vec<Warning>,
) -> Result<String, MappingError> {
    let raw = meaningful_text(value).ok_or_else(|| MappingError::missing("title"))?;
    let trimmed = raw.trim();
    let length = trimmed.chars().count();
    if length > constants.max_title_chars {
        warn!(length, max = constants.max_title_chars, "title too long, truncating");
        warnings.push(Warning::new(
            WarningCode::TitleTruncated,
            "title",
            format!(
                "title has {} characters, cut to {}",
                length, constants.max_title_chars
            ),
        ));
        return Ok(trimmed.chars().take(constants.max_title_chars).collect());
    }
    Ok(trimmed.to_string())
}

pub(crate) fn uri(value: Option<&Value>, constants: &MappingConstants) -> Result<String, MappingError> {
    let image = meaningful_text(value).ok_or_else(|| MappingError::missing("uri"))?;
    let image = image.trim().to_string();
    let uri = if ["http://", "https://", "gs://"]
        .iter()
        .any(|scheme| image.starts_with(scheme))
    {
        image
    } else {
        format!("{}{}{}", constants.uri_prefix, image, constants.uri_suffix)
    };
    let len = uri.chars().count();
    if len > constants.max_uri_chars {
        return Err(MappingError::UriTooLong {
            len,
            max: constants.max_uri_chars,
        });
    }
    Ok(uri)
}

pub(crate) fn categories(
    value: Option<&Value>,
    tables: &MappingTables,
    constants: &MappingConstants,
) -> Vec<String> {
    let genres: Vec<&str> = match value {
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        Some(Value::String(single)) => vec![single.as_str()],
        _ => Vec::new(),
    };

    let mut seen = HashSet::new();
    let mut categories = Vec::new();
    for genre in genres {
        let category = tables
            .genre_categories
            .get(genre)
            .cloned()
            .unwrap_or_else(|| genre.to_lowercase());
        if category.is_empty() || !seen.insert(category.clone()) {
            continue;
        }
        categories.push(category);
    }
    categories.truncate(constants.max_categories);

    if categories.is_empty() {
        categories.push(constants.default_category.clone());
    }
    debug!(?categories, "mapped categories");
    categories
}

/// Permissive date; absent input is now, unparsable input is now plus a warning.
pub(crate) fn timestamp(value: Option<&Value>, field: &str, warnings: &mut Vec<Warning>) -> Timestamp {
    let Some(text) = meaningful_text(value) else {
        return Timestamp::now();
    };
    match value {
        Some(Value::String(_)) | Some(Value::Number(_)) => {}
        _ => return unparsable(field, &text, warnings),
    }
    match Timestamp::parse_lenient(&text) {
        Ok(ts) => ts,
        Err(_) => unparsable(field, &text, warnings),
    }
}

fn unparsable(field: &str, text: &str, warnings: &mut Vec<Warning>) -> Timestamp {
    warn!(field, value = text, "unparsable date, using current time");
    warnings.push(Warning::new(
        WarningCode::UnparsableDate,
        field,
        format!("could not parse '{}', used current time", text),
    ));
    Timestamp::now()
}

/// A positive `seconds` count wins. Otherwise `units × minutes_per_unit`,
/// where anything that is not a positive count is one unit.
pub(crate) fn duration(
    seconds: Option<&Value>,
    units: Option<&Value>,
    constants: &MappingConstants,
) -> DurationSpec {
    if let Some(seconds) = seconds.and_then(positive_count) {
        return DurationSpec::from_seconds(seconds);
    }
    let units = units.and_then(positive_count).unwrap_or(1);
    DurationSpec::from_minutes(units.saturating_mul(constants.minutes_per_unit))
}

fn positive_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 1.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
    .filter(|count| *count > 0)
}

/// First entry of a comma list, mapped to BCP-47 when known.
pub(crate) fn language(value: Option<&Value>, tables: &MappingTables) -> Option<String> {
    let raw = meaningful_text(value)?;
    let code = raw.split(',').next().unwrap_or_default().trim();
    if code.is_empty() || code == SENTINEL_NULL {
        return None;
    }
    Some(
        tables
            .languages
            .get(code)
            .cloned()
            .unwrap_or_else(|| code.to_string()),
    )
}

pub(crate) fn persons(record: &Value, sources: &[PersonSource]) -> Vec<Person> {
    let mut persons = Vec::new();
    for source in sources {
        let Some(Value::Array(entries)) = source_value(record, &source.field) else {
            continue;
        };
        for entry in entries {
            let Some(text) = meaningful_text(Some(entry)) else {
                continue;
            };
            let name = if source.strip_detail {
                text.split(':').next().unwrap_or_default().trim()
            } else {
                text.trim()
            };
            if !name.is_empty() {
                persons.push(Person::new(name, source.role.clone()));
            }
        }
    }
    persons
}

/// Crew role from a plural list name: `producers` → `producer`.
pub(crate) fn crew_role(field: &str) -> &str {
    field.trim_end_matches('s')
}

pub(crate) fn apply_transform(value: Value, transform: &ValueTransform) -> Value {
    match (transform, value) {
        (ValueTransform::ToArray { separator }, Value::String(text)) => Value::Array(
            text.split(separator.as_str())
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(|part| Value::String(part.to_string()))
                .collect(),
        ),
        (ValueTransform::ToString, Value::String(text)) => Value::String(text),
        (ValueTransform::ToString, other) => Value::String(other.to_string()),
        (ValueTransform::NormalizeMediaType, Value::String(text)) => {
            let normalized = match text.to_lowercase().as_str() {
                "video" => "VIDEO".to_string(),
                "audio" => "AUDIO".to_string(),
                "image" => "IMAGE".to_string(),
                "doc" | "document" => "DOCUMENT".to_string(),
                _ => text.to_uppercase(),
            };
            Value::String(normalized)
        }
        (_, other) => other,
    }
}
