//! Subcommand implementations.

pub mod clean;
pub mod field_settings;
pub mod flatten_schema;
pub mod map;
pub mod prepare;
pub mod reconcile;
pub mod validate;

use clap::Args;
use mediaprep_schema::{FlattenConfig, JsonSchema};
use std::path::Path;

/// Command-line overrides for the `[flatten]` section.
#[derive(Args, Debug, Clone, Default)]
pub struct FlattenArgs {
    /// Promote nested object keys into their parent
    #[arg(long)]
    pub nested: bool,
    /// Join arrays of scalars into one string
    #[arg(long)]
    pub arrays: bool,
    /// Joiner for flattened arrays
    #[arg(long)]
    pub array_delimiter: Option<String>,
    /// Joiner between parent and child keys
    #[arg(long)]
    pub separator: Option<String>,
}

impl FlattenArgs {
    pub fn apply(&self, mut config: FlattenConfig) -> Result<FlattenConfig, String> {
        config.flatten_nested_objects |= self.nested;
        config.flatten_string_arrays |= self.arrays;
        if let Some(delimiter) = &self.array_delimiter {
            if delimiter.is_empty() {
                return Err("--array-delimiter must not be empty".to_string());
            }
            config.array_delimiter = delimiter.clone();
        }
        if let Some(separator) = &self.separator {
            if separator.is_empty() {
                return Err("--separator must not be empty".to_string());
            }
            config.separator = separator.clone();
        }
        Ok(config)
    }
}

pub fn load_schema(path: &Path) -> Result<JsonSchema, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read schema {}: {}", path.display(), e))?;
    Ok(JsonSchema::from_json_str(&text)
        .map_err(|e| format!("Invalid schema {}: {}", path.display(), e))?)
}
