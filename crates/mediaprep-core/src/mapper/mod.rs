//! Source record → [`CanonicalDocument`] mapping.
//!
//! A record either maps with every required field populated or fails with a
//! [`MappingError`]; everything else degrades to a documented fallback and,
//! where the fallback hides a data problem, a [`Warning`].

/// Mapper configuration and default tables.
pub mod config;
mod rules;

use crate::document::{CanonicalDocument, Licensing, Person};
use crate::errors::MappingError;
use crate::validator::{ValidationConfig, Validator};
use config::MapperConfig;
use mediaprep_canonical::{Warning, WarningCode};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// A mapped record and the warnings raised while mapping it.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedRecord {
    /// The canonical document.
    pub document: CanonicalDocument,
    /// Non-blocking problems.
    pub warnings: Vec<Warning>,
}

/// A record excluded from a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordError {
    /// Position in the input.
    pub index: usize,
    /// Identifier found in the source, if any.
    pub record_id: Option<String>,
    /// Why the record was excluded.
    pub errors: Vec<String>,
}

/// A warning tagged with the record it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordWarning {
    /// Position in the input.
    pub index: usize,
    /// The warning.
    #[serde(flatten)]
    pub warning: Warning,
}

/// Result of mapping a batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchOutcome {
    /// Documents that mapped and passed required validation, in input order.
    pub documents: Vec<CanonicalDocument>,
    /// Excluded records.
    pub errors: Vec<RecordError>,
    /// Warnings of every record, excluded or not.
    pub warnings: Vec<RecordWarning>,
}

/// Maps source records to canonical documents.
#[derive(Debug, Clone, Default)]
pub struct CanonicalMapper {
    config: MapperConfig,
    validator: Validator,
}

impl CanonicalMapper {
    /// Creates a mapper.
    ///
    /// Batches are checked with the default vocabulary and the length and
    /// count limits of `config.constants`, so a record the mapper accepts
    /// is never rejected for exceeding them.
    pub fn new(config: MapperConfig) -> Self {
        let constants = &config.constants;
        let validation = ValidationConfig {
            max_title_chars: constants.max_title_chars,
            max_uri_chars: constants.max_uri_chars,
            max_categories: constants.max_categories,
            ..ValidationConfig::default()
        };
        Self {
            validator: Validator::new(validation),
            config,
        }
    }

    /// Replaces the validator used by [`CanonicalMapper::map_batch`].
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    /// The configuration in use.
    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Maps one record.
    pub fn map_record(&self, source: &Value) -> Result<MappedRecord, MappingError> {
        let fields = &self.config.fields;
        let constants = &self.config.constants;
        let tables = &self.config.tables;
        let get = |path: &str| rules::source_value(source, path);
        let mut warnings = Vec::new();

        let title = rules::title(get(&fields.title), constants, &mut warnings)?;
        let uri = rules::uri(get(&fields.uri), constants)?;
        let categories = rules::categories(get(&fields.categories), tables, constants);
        let available_time =
            rules::timestamp(get(&fields.available_time), "available_time", &mut warnings);
        let duration = rules::duration(
            get(&fields.duration_seconds),
            get(&fields.duration),
            constants,
        );

        let id = match get(&fields.id).and_then(rules::as_text) {
            Some(id) if !id.trim().is_empty() => id,
            _ => {
                let generated = Uuid::new_v4().to_string();
                warn!(id = %generated, "missing id in source data, generated one");
                warnings.push(Warning::new(
                    WarningCode::GeneratedIdentifier,
                    "id",
                    format!("missing id in source data, generated {}", generated),
                ));
                generated
            }
        };

        let description = get(&fields.description)
            .filter(|v| rules::is_truthy(v))
            .and_then(rules::as_text);
        let language = rules::language(get(&fields.language), tables);
        let content_rating = rules::meaningful_text(get(&fields.content_rating))
            .map(|rating| vec![rating])
            .unwrap_or_default();
        let persons = rules::persons(source, &self.config.persons);

        let source_title = get(&fields.title).and_then(rules::as_text);
        let original_title = rules::meaningful_text(get(&fields.original_title))
            .filter(|original| Some(original) != source_title.as_ref());

        let licensing = match (get(&fields.licensing_from), get(&fields.licensing_until)) {
            (Some(from), Some(until)) if rules::is_truthy(from) && rules::is_truthy(until) => {
                Some(Licensing {
                    from: rules::timestamp(Some(from), "licensing.from", &mut warnings),
                    until: rules::timestamp(Some(until), "licensing.until", &mut warnings),
                })
            }
            _ => None,
        };

        let mut extra = BTreeMap::new();
        if let Some(keywords) = get(&fields.keywords).filter(|v| rules::is_truthy(v)) {
            extra.insert("keywords".to_string(), keywords.clone());
        }
        if let Some(tags) = get(&fields.tags).filter(|v| rules::is_truthy(v)) {
            let tags = if tags.is_array() {
                tags.clone()
            } else {
                Value::Array(Vec::new())
            };
            extra.insert("tags".to_string(), tags);
        }
        let mut additional_crew = Vec::new();
        if let Some(Value::Object(extended)) = get(&fields.extended) {
            self.extract_extended(extended, &mut extra, &mut additional_crew);
        }
        if let Some(rights) = get(&fields.distribution_rights).filter(|v| rules::is_truthy(v)) {
            extra.insert("distribution_rights".to_string(), rights.clone());
        }
        self.apply_transforms(&mut extra);

        let document = CanonicalDocument {
            import_id: id.clone(),
            id,
            title,
            uri,
            categories,
            available_time,
            duration,
            description,
            language,
            content_rating,
            persons,
            original_title,
            licensing,
            additional_crew,
            extra,
        };
        debug!(id = %document.id, warnings = warnings.len(), "mapped record");
        Ok(MappedRecord { document, warnings })
    }

    /// Maps and validates every record; failures are isolated per record.
    pub fn map_batch(&self, sources: &[Value]) -> BatchOutcome {
        info!(records = sources.len(), "mapping batch");
        let mut outcome = BatchOutcome::default();

        for (index, source) in sources.iter().enumerate() {
            let record_id = rules::source_value(source, &self.config.fields.id).and_then(rules::as_text);
            let mapped = match self.map_record(source) {
                Ok(mapped) => mapped,
                Err(err) => {
                    error!(index, error = %err, "record failed to map");
                    outcome.errors.push(RecordError {
                        index,
                        record_id,
                        errors: vec![err.to_string()],
                    });
                    continue;
                }
            };
            outcome.warnings.extend(
                mapped
                    .warnings
                    .into_iter()
                    .map(|warning| RecordWarning { index, warning }),
            );

            let mut document = mapped.document;
            let categories = self.validator.normalize_categories(&document.categories);
            if categories != document.categories {
                debug!(index, ?categories, "normalized categories");
                document.categories = categories;
            }

            let report = match document.to_value() {
                Ok(value) => self.validator.validate_required(&value),
                Err(err) => {
                    error!(index, error = %err, "mapped record is not serializable");
                    outcome.errors.push(RecordError {
                        index,
                        record_id,
                        errors: vec![err.to_string()],
                    });
                    continue;
                }
            };
            outcome.warnings.extend(
                report
                    .warnings
                    .into_iter()
                    .map(|warning| RecordWarning { index, warning }),
            );
            if report.valid {
                outcome.documents.push(document);
            } else {
                error!(index, errors = ?report.errors, "record failed required validation");
                outcome.errors.push(RecordError {
                    index,
                    record_id,
                    errors: report.errors,
                });
            }
        }

        info!(
            documents = outcome.documents.len(),
            errors = outcome.errors.len(),
            warnings = outcome.warnings.len(),
            "batch mapped"
        );
        outcome
    }

    fn extract_extended(
        &self,
        extended: &Map<String, Value>,
        extra: &mut BTreeMap<String, Value>,
        crew: &mut Vec<Person>,
    ) {
        for field in &self.config.extended_fields {
            if let Some(value) = extended.get(field).filter(|v| rules::is_truthy(v)) {
                extra.insert(field.clone(), value.clone());
            }
        }
        for field in &self.config.crew_fields {
            let Some(Value::Array(entries)) = extended.get(field) else {
                continue;
            };
            let role = rules::crew_role(field);
            crew.extend(
                entries
                    .iter()
                    .filter_map(|entry| rules::meaningful_text(Some(entry)))
                    .map(|name| Person::new(name.trim(), role)),
            );
        }
    }

    fn apply_transforms(&self, extra: &mut BTreeMap<String, Value>) {
        for (field, transform) in &self.config.transforms {
            match extra.remove(field) {
                Some(value) => {
                    debug!(field = %field, transform = transform.name(), "applied transform");
                    extra.insert(field.clone(), rules::apply_transform(value, transform));
                }
                None => {
                    debug!(field = %field, transform = transform.name(), "transform target absent")
                }
            }
        }
    }
}

/// Maps one record with `config`.
pub fn map_record(source: &Value, config: &MapperConfig) -> Result<MappedRecord, MappingError> {
    CanonicalMapper::new(config.clone()).map_record(source)
}

/// Maps a batch with `config` and the default validator.
pub fn map_batch(sources: &[Value], config: &MapperConfig) -> BatchOutcome {
    CanonicalMapper::new(config.clone()).map_batch(sources)
}
