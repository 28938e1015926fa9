use thiserror::Error;

#[derive(Error, Debug)]
pub enum BeerGameError {
    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Persistence was attempted without a study / team id.
    #[error("Enter Study ID / Team ID first.")]
    MissingIdentifier,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl BeerGameError {
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    pub fn is_missing_identifier(&self) -> bool {
        matches!(self, Self::MissingIdentifier)
    }
}

pub type Result<T> = std::result::Result<T, BeerGameError>;
