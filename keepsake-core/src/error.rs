//! Error types for the Keepsake core
//!
//! None of the three core components fail on ordinary input: a cache miss,
//! a query with no matches and a degenerate layout are all plain return
//! values. The variants here cover precondition violations caught at
//! construction time and failures surfaced by the serving layer's store.

use thiserror::Error;

/// Main error type for Keepsake operations
#[derive(Error, Debug)]
pub enum KeepsakeError {
    /// A cache was constructed without room for a single entry
    #[error("Invalid cache capacity: {0} (must be greater than 0)")]
    InvalidCapacity(usize),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Serialization/Deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Backing event store failure
    #[error("Store error: {0}")]
    StoreError(String),

    /// Requested record does not exist
    #[error("Event not found: {0}")]
    NotFound(String),

    /// A lock guarding shared state was poisoned by a panicking holder
    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),

    /// Generic error with context
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for Keepsake operations
pub type Result<T> = std::result::Result<T, KeepsakeError>;

impl From<String> for KeepsakeError {
    fn from(s: String) -> Self {
        KeepsakeError::Other(s)
    }
}

impl From<&str> for KeepsakeError {
    fn from(s: &str) -> Self {
        KeepsakeError::Other(s.to_string())
    }
}

impl From<serde_json::Error> for KeepsakeError {
    fn from(e: serde_json::Error) -> Self {
        KeepsakeError::SerializationError(e.to_string())
    }
}
