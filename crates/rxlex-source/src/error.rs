#![deny(unsafe_code)]

use std::path::PathBuf;

use rxlex_model::ModelError;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("terminology file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read RRF {path}: {source}")]
    RrfRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path}:{line}: expected at least {expected} columns, found {found}")]
    ShortRow {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("{path}:{line}: {source}")]
    InvalidConcept {
        path: PathBuf,
        line: u64,
        #[source]
        source: ModelError,
    },

    #[error("concept lookup failed for {concept}: {message}")]
    Lookup { concept: String, message: String },
}

pub type Result<T> = std::result::Result<T, SourceError>;
