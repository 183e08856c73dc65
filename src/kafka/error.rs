//! Fetch decoding error types
//!
//! Only conditions the caller must act on live here. Truncated or
//! interrupted message sets are reported as a normal end of set by
//! [`MessageSet::pull`](crate::kafka::MessageSet::pull), never as an error.

use thiserror::Error;

/// Errors that can occur while opening a message set or managing observers
#[derive(Error, Debug)]
pub enum FetchError {
    /// Declared message set size is zero or negative
    #[error("{0} is not a valid message set size")]
    InvalidMessageSetSize(i32),

    /// Declared message set size exceeds the configured ceiling
    #[error("Message set size {size} exceeds maximum of {max} bytes")]
    MessageSetTooLarge { size: i32, max: i32 },

    /// IO error while reading the message set size prefix
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No instance was supplied and no factory is registered for the key
    #[error("Observer not found: {0}")]
    UnresolvedObserver(String),

    /// Observer implements none of the stream/topic/partition capabilities
    #[error("Observer {0} implements no stream, topic or partition capability")]
    ObserverContract(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for fetch operations
pub type Result<T> = std::result::Result<T, FetchError>;
