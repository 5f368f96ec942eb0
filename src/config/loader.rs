//! Manifest loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::Manifest;
use crate::config::validation::{validate_manifest, ValidationError};
use crate::routing::RouteError;

/// Error type for manifest loading and compilation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("Route error: {0}")]
    Route(#[from] RouteError),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate a manifest from TOML text.
pub fn parse_manifest(content: &str) -> Result<Manifest, ConfigError> {
    let manifest: Manifest = toml::from_str(content)?;
    validate_manifest(&manifest).map_err(ConfigError::Validation)?;
    Ok(manifest)
}

/// Load and validate a manifest from a TOML file.
pub fn load_manifest(path: &Path) -> Result<Manifest, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_manifest(&content)
}
