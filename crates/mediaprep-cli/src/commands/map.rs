//! Map command implementation.

use crate::config::Config;
use crate::output::{read_documents, write_json};
use mediaprep_core::{CanonicalMapper, Validator};
use mediaprep_store::{DocumentFormat, DocumentSink, JsonDocumentSink};
use serde_json::json;
use std::io;
use std::path::PathBuf;
use tracing::warn;

pub fn run(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    jsonl: bool,
    report: Option<PathBuf>,
    strict: bool,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let (records, _) = read_documents(input.as_deref())?;
    let mapper = CanonicalMapper::new(config.mapping.clone())
        .with_validator(Validator::new(config.validation.clone()));
    let outcome = mapper.map_batch(&records);

    let format = if jsonl {
        DocumentFormat::JsonLines
    } else {
        DocumentFormat::JsonArray
    };
    match &output {
        Some(path) => {
            let mut sink = JsonDocumentSink::create(path, format)?;
            sink.write_documents(&outcome.documents)?;
            sink.into_inner()?;
        }
        None => {
            let stdout = io::stdout();
            let mut sink = JsonDocumentSink::new(stdout.lock(), format);
            sink.write_documents(&outcome.documents)?;
        }
    }

    for error in &outcome.errors {
        warn!(
            index = error.index,
            record_id = error.record_id.as_deref().unwrap_or("-"),
            "record excluded: {}",
            error.errors.join("; ")
        );
    }

    if let Some(path) = report {
        let summary = json!({
            "records": records.len(),
            "mapped": outcome.documents.len(),
            "errors": outcome.errors,
            "warnings": outcome.warnings,
        });
        write_json(&summary, Some(path.as_path()))?;
    }

    eprintln!(
        "Mapped {} of {} records ({} errors, {} warnings)",
        outcome.documents.len(),
        records.len(),
        outcome.errors.len(),
        outcome.warnings.len()
    );

    if strict && !outcome.errors.is_empty() {
        return Err(format!("{} record(s) could not be mapped", outcome.errors.len()).into());
    }
    Ok(())
}
