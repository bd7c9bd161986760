//! Validate command implementation.

use crate::config::Config;
use crate::output::{read_documents, write_json};
use mediaprep_core::{ValidationReport, Validator};
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;
use tracing::info;

#[derive(Serialize)]
struct DocumentReport<'a> {
    index: usize,
    id: Option<&'a Value>,
    #[serde(flatten)]
    report: ValidationReport,
}

pub fn run(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    strict: bool,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let (documents, _) = read_documents(input.as_deref())?;
    let validator = Validator::new(config.validation.clone());

    let reports: Vec<DocumentReport> = documents
        .iter()
        .enumerate()
        .map(|(index, document)| DocumentReport {
            index,
            id: document.get("id"),
            report: validator.validate(document),
        })
        .collect();

    let invalid = reports.iter().filter(|r| !r.report.valid).count();
    info!(total = reports.len(), invalid, "documents validated");

    write_json(&reports, output.as_deref())?;

    if strict && invalid > 0 {
        return Err(format!("{} document(s) failed validation", invalid).into());
    }
    Ok(())
}
