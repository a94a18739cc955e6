//! Agent errors

use std::time::Duration;
use thiserror::Error;
use tourist_webhook_persistence::PersistenceError;

#[derive(Error, Debug)]
pub enum AgentError {
    /// The record store rejected the query
    #[error("Store failure: {0}")]
    Store(#[from] PersistenceError),

    /// The store did not answer within the query deadline
    #[error("Store query timed out after {0:?}")]
    Timeout(Duration),
}

impl AgentError {
    /// Label for the `kind` dimension of the error counter
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Store(_) => "store_failure",
            Self::Timeout(_) => "timeout",
        }
    }
}
