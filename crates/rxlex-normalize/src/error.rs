use thiserror::Error;

use rxlex_model::RecordIndex;
use rxlex_source::SourceError;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("invalid normalization options: {0}")]
    InvalidOptions(String),

    #[error("canonical name {canonical:?} assembled twice (records {first} and {second})")]
    DuplicateCanonical {
        canonical: String,
        first: RecordIndex,
        second: RecordIndex,
    },

    #[error("{variant} lexicon violates its invariants: {details}")]
    Invariant {
        variant: &'static str,
        details: String,
    },

    #[error(transparent)]
    Source(#[from] SourceError),
}

pub type Result<T> = std::result::Result<T, NormalizeError>;
