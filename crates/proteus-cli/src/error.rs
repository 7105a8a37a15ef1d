//! Checker errors

use std::path::PathBuf;

use proteus_model::{PropertyError, XmlError};

/// Errors that stop a run before a report exists
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Input file could not be read
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input is not well-formed XML
    #[error(transparent)]
    Xml(#[from] XmlError),

    /// A property element could not be built
    #[error("<{tag}> '{name}': {source}")]
    Property {
        tag: String,
        name: String,
        #[source]
        source: PropertyError,
    },

    /// Report serialization failed
    #[error("cannot serialize report: {0}")]
    Report(#[from] serde_json::Error),
}

/// Result type for checker operations
pub type CliResult<T> = Result<T, CliError>;
