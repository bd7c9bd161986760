//! Flatten-schema command implementation.

use crate::commands::FlattenArgs;
use crate::config::Config;
use crate::output::{read_json, write_json};
use mediaprep_schema::{flatten_schema, JsonSchema};
use std::path::PathBuf;

pub fn run(
    schema: Option<PathBuf>,
    output: Option<PathBuf>,
    flatten: FlattenArgs,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let flatten = flatten.apply(config.flatten.clone())?;
    let value = read_json(schema.as_deref())?;
    let schema = JsonSchema::from_value(value).map_err(|e| format!("Invalid schema: {}", e))?;

    let flattened = flatten_schema(&schema, &flatten);
    write_json(&flattened, output.as_deref())
}
