//! Persistence errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Transport-level failure talking to the store
    #[error("Store request failed: {0}")]
    Http(String),

    /// The store answered with a non-success status
    #[error("Store returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The store answered with data that is not a collection snapshot
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// The seed export could not be loaded
    #[error("Seed error: {0}")]
    Seed(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PersistenceError {
    /// Short label for metrics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Http(_) => "http",
            Self::Status { .. } => "status",
            Self::InvalidData(_) => "invalid_data",
            Self::Seed(_) => "seed",
            Self::Config(_) => "config",
        }
    }
}

impl From<reqwest::Error> for PersistenceError {
    fn from(err: reqwest::Error) -> Self {
        PersistenceError::Http(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        PersistenceError::InvalidData(format!("JSON error: {}", err))
    }
}

impl From<std::io::Error> for PersistenceError {
    fn from(err: std::io::Error) -> Self {
        PersistenceError::Seed(format!("I/O error: {}", err))
    }
}
