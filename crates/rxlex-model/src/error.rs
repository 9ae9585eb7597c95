use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid concept id: {0:?}")]
    InvalidConceptId(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
