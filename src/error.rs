//! Error types for the LESS scoring library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// `OpenCV` operation failed
    #[error("OpenCV error: {0}")]
    OpenCV(#[from] opencv::Error),

    /// `ONNX` Runtime inference failed
    #[error("ONNX Runtime error: {0}")]
    OnnxRuntime(#[from] ort::OrtError),

    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Model input configuration error
    #[error("Model input error: {0}")]
    ModelInputError(String),

    /// Model output processing error
    #[error("Model output error: {0}")]
    ModelOutputError(String),

    /// Model data shape or format error
    #[error("Model data format error: {0}")]
    ModelDataFormatError(String),

    /// Not enough samples accumulated for the configured smoothing window
    #[error("Insufficient samples: need at least {needed}, have {available}")]
    InsufficientSamples {
        /// Minimum sample count required
        needed: usize,
        /// Samples currently accumulated
        available: usize,
    },

    /// Zero-length limb vector or coincident landmarks
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// All four reference values equal; the distribution has no spread
    #[error("Zero-variance reference distribution: {0}")]
    ZeroVariance(String),

    /// Risk threshold bands are not strictly ordered
    #[error("Invalid thresholds: {0}")]
    InvalidThresholds(String),

    /// Joint has no entry in the requested lookup table
    #[error("Unknown joint: {0}")]
    UnknownJoint(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
