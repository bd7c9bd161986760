//! Field-settings command implementation.

use crate::config::Config;
use crate::output::{read_documents, write_json};
use std::path::PathBuf;
use tracing::info;

pub fn run(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let (documents, _) = read_documents(input.as_deref())?;
    let sample = documents
        .first()
        .ok_or("No sample document in input")?;

    let generated = config.capabilities.for_document(sample);
    info!(
        retrievable = generated.retrievable.len(),
        searchable = generated.searchable.len(),
        "field settings generated"
    );
    write_json(&generated, output.as_deref())
}
