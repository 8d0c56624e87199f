use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrError {
    #[error("No eligible model: all {considered} candidates rejected (min context {minimum_context}, required [{required}])")]
    NoEligibleModel { considered: usize, minimum_context: u32, required: String },
    #[error("Invalid catalog entry {key}: {reason}")]
    InvalidCatalog { key: String, reason: String },
    #[error("Duplicate catalog entry: {0}")]
    DuplicateModel(String),
    #[error("Invalid preferences: {0}")]
    InvalidPreferences(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, PrError>;
