//! TOML configuration.

use mediaprep_core::{MapperConfig, ValidationConfig};
use mediaprep_schema::{CapabilitySets, FlattenConfig, TypeScope};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "mediaprep.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub normalize: NormalizeConfig,
    pub flatten: FlattenConfig,
    pub mapping: MapperConfig,
    pub validation: ValidationConfig,
    pub capabilities: CapabilitySets,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    /// `flat` keys the type map by top-level name, `path` by dotted path.
    pub scope: TypeScope,
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&content)?;
    debug!(path = %path.display(), "configuration loaded");
    Ok(config)
}

pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// `--config` if given, else `mediaprep.toml` if present, else defaults.
pub fn resolve(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => {
            let fallback = Path::new(DEFAULT_CONFIG_FILE);
            if fallback.is_file() {
                load_config(fallback)
            } else {
                Ok(Config::default())
            }
        }
    }
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.flatten.separator.is_empty() {
        return Err(ConfigError::Invalid(
            "flatten.separator must not be empty".to_string(),
        ));
    }
    if config.flatten.array_delimiter.is_empty() {
        return Err(ConfigError::Invalid(
            "flatten.array_delimiter must not be empty".to_string(),
        ));
    }

    let problems = config.mapping.problems();
    if !problems.is_empty() {
        return Err(ConfigError::Invalid(problems.join("; ")));
    }

    let validation = &config.validation;
    if validation.max_title_chars == 0 {
        return Err(ConfigError::Invalid(
            "validation.max_title_chars must be > 0".to_string(),
        ));
    }
    if validation.max_uri_chars == 0 {
        return Err(ConfigError::Invalid(
            "validation.max_uri_chars must be > 0".to_string(),
        ));
    }
    if validation.max_categories == 0 {
        return Err(ConfigError::Invalid(
            "validation.max_categories must be > 0".to_string(),
        ));
    }

    let constants = &config.mapping.constants;
    let limits = [
        ("max_title_chars", constants.max_title_chars, validation.max_title_chars),
        ("max_uri_chars", constants.max_uri_chars, validation.max_uri_chars),
        ("max_categories", constants.max_categories, validation.max_categories),
    ];
    for (name, mapping, validating) in limits {
        if mapping > validating {
            return Err(ConfigError::Invalid(format!(
                "mapping.constants.{name} ({mapping}) exceeds validation.{name} ({validating}); \
                 mapped records would fail validation"
            )));
        }
    }

    Ok(())
}
