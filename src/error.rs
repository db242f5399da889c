//! Error types for launch_inventory

use std::{path::PathBuf, time::Duration};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Malformed launch file {file}: {source}")]
    MalformedDescriptor {
        file: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    #[error("Cannot read launch file {file}: {source}")]
    DescriptorRead {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot resolve package '{package}' in '{reference}' (from {file}): {source}")]
    PackageResolution {
        package: String,
        reference: String,
        file: PathBuf,
        #[source]
        source: LocateError,
    },

    #[error("Malformed package reference '{reference}' in {file}")]
    MalformedReference { reference: String, file: PathBuf },

    #[error("Cannot read parameter file {path}: {source}")]
    ExternalFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parameter file {path} is not a key/value mapping: {message}")]
    ExternalFormat { path: PathBuf, message: String },

    #[error("Circular include: {}", format_chain(.chain))]
    CyclicInclude { chain: Vec<PathBuf> },

    #[error("Include depth limit of {limit} exceeded at {file}")]
    DepthExceeded { file: PathBuf, limit: usize },

    #[error("Extraction budget exhausted after {elapsed:?} while entering {file}")]
    Timeout { file: PathBuf, elapsed: Duration },

    #[error("The {format} output format cannot render {kind}")]
    UnsupportedFormat {
        format: &'static str,
        kind: &'static str,
    },

    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ExtractError {
    /// The launch file the error was raised from, when known
    pub fn file(&self) -> Option<&PathBuf> {
        match self {
            ExtractError::MalformedDescriptor { file, .. }
            | ExtractError::DescriptorRead { file, .. }
            | ExtractError::PackageResolution { file, .. }
            | ExtractError::MalformedReference { file, .. }
            | ExtractError::DepthExceeded { file, .. }
            | ExtractError::Timeout { file, .. } => Some(file),
            ExtractError::CyclicInclude { chain } => chain.last(),
            _ => None,
        }
    }
}

fn format_chain(chain: &[PathBuf]) -> String {
    chain
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocateError {
    #[error("Package '{0}' not found. Ensure the package is installed and sourced.")]
    PackageNotFound(String),

    #[error("Command `{command}` failed: {message}")]
    CommandFailed { command: String, message: String },
}

pub type Result<T> = std::result::Result<T, ExtractError>;
