//! Favorite store error types
//!
//! Errors from persisting favorite scores. The in-memory ranking itself never
//! fails; only reading and writing the backing store can.
//!
//! # Error Types
//!
//! - **`SledError`**: Errors from the underlying sled embedded database
//! - **`DecodeError`**: Failures when deserializing stored keys or scores
//! - **`EncodeError`**: Failures when serializing keys or scores

use thiserror::Error;

/// Favorite store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Represents a sled database error
    #[error("Database error: {0}")]
    SledError(#[from] sled::Error),

    /// Represents a bincode decoding error
    #[error("Error while decoding data: {0}")]
    DecodeError(#[from] bincode::error::DecodeError),

    /// Represents a bincode encoding error
    #[error("Error while encoding data: {0}")]
    EncodeError(#[from] bincode::error::EncodeError),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
