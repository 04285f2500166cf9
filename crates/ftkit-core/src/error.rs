//! Error types for ftkit-core.
//!
//! Every failure the facade can report is a variant of [`FastTextError`].
//! Nothing in this crate terminates the process; callers decide what to do
//! with an error.

use thiserror::Error;

/// Errors that can occur while loading or querying a fastText model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FastTextError {
    /// Magic number or format version did not match
    #[error("Invalid model header: {0}")]
    InvalidModelHeader(String),
    /// Evaluation or input file could not be opened
    #[error("Cannot open input file {path}: {reason}")]
    UnreadableInputFile {
        /// Path that was requested
        path: String,
        /// Underlying I/O failure
        reason: String,
    },
    /// Loss or model code outside the known enumerations
    #[error("Unrecognized {kind} value: {value}")]
    UnrecognizedEnumValue {
        /// Which enumeration was being decoded ("loss" or "model")
        kind: &'static str,
        /// Raw integer found in the model file
        value: i32,
    },
    /// A read operation was invoked while no model is loaded
    #[error("Model not loaded")]
    NotLoaded,
    /// Positional vocabulary lookup outside `[0, len)`
    #[error("Index {index} out of range (len {len})")]
    IndexOutOfRange {
        /// Requested position
        index: usize,
        /// Number of entries available
        len: usize,
    },
    /// I/O or structural failure while parsing a model file
    #[error("Failed to load model: {0}")]
    ModelLoad(String),
    /// Tensor operation failed during inference
    #[error("Inference failed: {0}")]
    Inference(String),
    /// The model does not support the requested operation
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

impl From<FastTextError> for String {
    fn from(err: FastTextError) -> String {
        err.to_string()
    }
}

impl From<candle_core::Error> for FastTextError {
    fn from(err: candle_core::Error) -> Self {
        FastTextError::Inference(err.to_string())
    }
}
