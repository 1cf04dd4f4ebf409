//! Error types for promptkit operations
//!
//! All fallible operations in this crate return [`Result`]. The error surface
//! is deliberately small: prompt formatting is pure data transformation, so
//! almost everything that can go wrong is a validation problem (a template
//! referenced a variable the caller did not supply, an example record is
//! missing a field) and is reported as [`Error::InvalidInput`].
//!
//! Errors are propagated to the caller unchanged; there is no retry or
//! recovery logic in this crate.

use thiserror::Error;

/// Result type alias for promptkit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for promptkit operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    /// Input validation error.
    ///
    /// Raised when a template is formatted without a required variable, an
    /// example record lacks a field the example prompt references, or a role
    /// string is not recognized. Not retryable - fix the input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error.
    ///
    /// Raised when a component is constructed inconsistently (for example a
    /// vector dimension mismatch). Not retryable.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization/deserialization error.
    ///
    /// Raised when a message placeholder value or stored example metadata
    /// cannot be decoded. Not retryable - check the data format.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Not implemented error.
    ///
    /// Returned by optional [`VectorStore`](crate::vector_stores::VectorStore)
    /// methods a backend does not support.
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// Generic error for anything else.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a not-implemented error
    pub fn not_implemented<S: Into<String>>(msg: S) -> Self {
        Self::NotImplemented(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use crate::test_prelude::*;

    #[test]
    fn test_error_constructors() {
        let err = Error::invalid_input("bad input");
        assert!(matches!(err, Error::InvalidInput(_)));

        let err = Error::config("bad config");
        assert!(matches!(err, Error::Configuration(_)));

        let err = Error::not_implemented("delete");
        assert!(matches!(err, Error::NotImplemented(_)));
    }

    #[test]
    fn test_error_display() {
        let err = Error::invalid_input("invalid");
        assert_eq!(err.to_string(), "Invalid input: invalid");

        let err = Error::config("mismatch");
        assert_eq!(err.to_string(), "Configuration error: mismatch");

        let err = Error::other("anything");
        assert_eq!(err.to_string(), "anything");
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err: std::result::Result<serde_json::Value, serde_json::Error> =
            serde_json::from_str("invalid json");
        let err: Error = json_err.unwrap_err().into();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
