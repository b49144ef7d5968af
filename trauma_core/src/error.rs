//! Error types for the trauma economy

use crate::character::RepositoryError;
use crate::config::ConfigError;
use crate::types::CharacterId;
use thiserror::Error;

/// Errors returned by trauma economy operations
///
/// Expected game-flow refusals (meditating in combat, gaining a full
/// resource) are reported through `ActionOutcome` instead.
#[derive(Error, Debug)]
pub enum TraumaError {
    #[error("Character not found: {0}")]
    NotFound(CharacterId),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Repository error: {0}")]
    Repository(String),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl TraumaError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        TraumaError::InvalidArgument(msg.into())
    }
}

impl From<RepositoryError> for TraumaError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(id) => TraumaError::NotFound(id),
            RepositoryError::Storage(msg) => TraumaError::Repository(msg),
        }
    }
}
