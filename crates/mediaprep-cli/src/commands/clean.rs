//! Clean command implementation.

use crate::commands::load_schema;
use crate::config::Config;
use crate::output::{read_documents, write_documents};
use mediaprep_core::Normalizer;
use std::path::PathBuf;
use tracing::info;

pub fn run(
    input: Option<PathBuf>,
    schema: PathBuf,
    output: Option<PathBuf>,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let schema = load_schema(&schema)?;
    let normalizer =
        Normalizer::from_schema(&schema, config.normalize.scope, config.flatten.clone());

    let (documents, layout) = read_documents(input.as_deref())?;
    let cleaned = normalizer.clean_batch(documents);
    info!(count = cleaned.len(), "documents cleaned");

    write_documents(&cleaned, layout, output.as_deref())
}
