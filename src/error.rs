//! # Query Error Types
//!
//! Errors raised while turning caller input into criteria. Rendering itself
//! cannot fail: builder misuse is rejected at compile time by the builder
//! types, so everything here concerns raw input coming from outside the crate.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// A raw status mask carried bits that map to no public category
    #[error("Unknown status filter bits: {bits:#b}")]
    UnknownStatusFlags { bits: u32 },

    #[error("Unknown status category: {value}")]
    UnknownStatusCategory { value: String },

    #[error("Unknown download status: {value}")]
    UnknownDownloadStatus { value: String },

    /// A criteria without a selection has nothing to embed as a group
    #[error("Cannot embed a criteria with no selection as a group")]
    EmptyCriteria,

    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl QueryError {
    /// Create a configuration error
    pub fn configuration<M: std::fmt::Display>(message: M) -> Self {
        Self::Configuration {
            message: message.to_string(),
        }
    }
}

impl From<config::ConfigError> for QueryError {
    fn from(error: config::ConfigError) -> Self {
        Self::configuration(error)
    }
}

pub type Result<T> = std::result::Result<T, QueryError>;
