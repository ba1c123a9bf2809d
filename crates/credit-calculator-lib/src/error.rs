//! Error types for configuration loading and report export.
//!
//! The calculation engine itself never fails; these only surface at the edges.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Catalog item id must not be empty (section '{section}')")]
    EmptyItemId { section: String },

    #[error("Duplicate catalog item id: {0}")]
    DuplicateItemId(String),

    #[error("Invalid unit multiplier for '{id}': {value} (must be a positive finite number)")]
    InvalidMultiplier { id: String, value: f64 },

    #[error("Invalid pricing: {0}")]
    InvalidPricing(String),

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write report to {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
}
