//! Callback error types

use thiserror::Error;

/// Errors raised while dispatching or running a callback
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CallbackError {
    /// No registered callback produces the requested output
    #[error("No callback for output: {0}")]
    UnknownOutput(String),

    /// A required input was not supplied and has no layout default
    #[error("Missing input: {0}")]
    MissingInput(String),

    /// Wrong number of inputs handed to a callback
    #[error("Expected {expected} inputs, got {got}")]
    ArgumentCount { expected: usize, got: usize },

    /// Input value has the wrong shape
    #[error("Invalid value for {input}: {reason}")]
    InvalidInput { input: String, reason: String },

    /// Slider index past the end of the table
    #[error("Index {index} out of range for table of {len} rows")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Result type for callback operations
pub type CallbackResult<T> = Result<T, CallbackError>;
