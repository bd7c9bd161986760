//! Prepare command implementation: clean, then flatten.

use crate::commands::{load_schema, FlattenArgs};
use crate::config::Config;
use crate::output::{read_documents, write_documents};
use mediaprep_core::Normalizer;
use std::path::PathBuf;
use tracing::info;

pub fn run(
    input: Option<PathBuf>,
    schema: PathBuf,
    output: Option<PathBuf>,
    flatten: FlattenArgs,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let schema = load_schema(&schema)?;
    let flatten = flatten.apply(config.flatten.clone())?;
    let normalizer = Normalizer::from_schema(&schema, config.normalize.scope, flatten);

    let (documents, layout) = read_documents(input.as_deref())?;
    let prepared = normalizer.prepare_batch(documents);
    info!(
        count = prepared.len(),
        nested = normalizer.flatten_config().flatten_nested_objects,
        arrays = normalizer.flatten_config().flatten_string_arrays,
        "documents prepared"
    );

    write_documents(&prepared, layout, output.as_deref())
}
