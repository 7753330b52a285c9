use thiserror::Error;

#[derive(Debug, Error)]
pub enum HepatyxError {
    #[error("Compound not found: {0}")]
    CompoundNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, HepatyxError>;
