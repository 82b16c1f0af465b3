//! Error types for the envfill library.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for envfill operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving, reading, or assigning configuration values.
#[derive(Error, Debug)]
pub enum Error {
    /// The process working directory could not be determined.
    #[error("Failed to determine the current working directory: {0}")]
    WorkingDirectory(#[source] std::io::Error),

    /// The environment file exists but could not be opened.
    #[error("Failed to open environment file {path}: {source}")]
    FileOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A read error occurred part way through the environment file.
    #[error("Failed to read environment file {path}: {source}")]
    Scan {
        path: PathBuf,
        source: std::io::Error,
    },

    /// No record was supplied to populate.
    #[error("Configuration record reference was absent")]
    NilReference,

    /// The target type is not a struct with named fields.
    #[error("Configuration can only be mapped to a struct, not '{0}'")]
    NotAStruct(String),

    /// A value was found for a field whose type cannot hold a string.
    #[error("Unsupported field type '{type_name}' for field '{field}'")]
    UnsupportedFieldType {
        field: String,
        type_name: String,
    },
}

impl Error {
    /// The field name involved in this error, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Error::UnsupportedFieldType { field, .. } => Some(field),
            _ => None,
        }
    }
}
