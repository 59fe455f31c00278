//! Error handling and custom error types
//!
//! Every failure a diagnosis can end in maps onto one of three tiers:
//! configuration, transport, or a diagnosis the model declined to give.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Failed to get a diagnosis from the AI: {0}")]
    Transport(String),

    #[error("{0}")]
    DiagnosisUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.to_string())
    }
}

impl Error {
    /// Whether the same request could succeed if the user tries again.
    ///
    /// Only transport failures qualify; a declined diagnosis needs a
    /// different image and a configuration error needs a different setup.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
