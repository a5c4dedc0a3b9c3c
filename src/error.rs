//! Error types for the generation run.
//!
//! Every failure surfaced by the library is terminal for the current run. Callers
//! fix the underlying condition and invoke generation again from scratch.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while resolving metadata, synthesizing sources or
/// publishing artifacts.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// No module code was supplied to the run.
    #[error("moduleCode not set")]
    ModuleCodeNotSet,

    /// The endpoint declares an HTTP method outside GET/POST/PUT/DELETE.
    #[error("endpoint '{endpoint}' uses unsupported HTTP method '{method}'")]
    UnsupportedHttpMethod { endpoint: String, method: String },

    /// A POST or PUT endpoint whose service declares no entity-typed input.
    #[error("endpoint '{endpoint}' ({method}) requires an entity-typed service input")]
    MissingPayloadEntity { endpoint: String, method: String },

    /// Two endpoints of one module resolve to the same resource class.
    #[error("endpoints '{first}' and '{second}' both generate resource class '{class_name}'")]
    DuplicateResourceClass {
        class_name: String,
        first: String,
        second: String,
    },

    #[error("endpoint not found: {0}")]
    EndpointNotFound(String),

    #[error("service not found: {0}")]
    ServiceNotFound(String),

    #[error("metadata error: {0}")]
    Metadata(String),

    #[error("Failed creating file.{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("version control error: {0}")]
    VersionControl(String),

    #[error("render error: {0}")]
    Render(#[from] askama::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl GenerationError {
    /// Wraps an I/O failure together with the path that caused it.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        GenerationError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, GenerationError>;
