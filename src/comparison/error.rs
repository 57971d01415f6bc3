use thiserror::Error;

use crate::core::OddsError;

/// Errors that can occur while comparing decks
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ComparisonError {
    #[error("Invalid deck: {0}")]
    InvalidDeck(#[from] OddsError),

    #[error("Configuration validation error: {0}")]
    ValidationError(String),

    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    #[error("No category named {0}")]
    UnknownCategory(String),
}

/// Result type for comparison operations
pub type Result<T> = std::result::Result<T, ComparisonError>;
