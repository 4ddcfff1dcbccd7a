//! I/O error types
//!
//! Provides a unified error type for image decoding and encoding. The PNG
//! module maps `png` crate errors into `IoError` variants so callers only
//! need to handle one error type.

use thiserror::Error;

/// Error type for image I/O operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// Standard I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The image format is not supported
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The image data is structurally invalid
    #[error("invalid image data: {0}")]
    InvalidData(String),

    /// The decoder rejected the input
    #[error("decode error: {0}")]
    DecodeError(String),

    /// The encoder failed to produce output
    #[error("encode error: {0}")]
    EncodeError(String),

    /// An error from the core library (e.g. empty image)
    #[error("core error: {0}")]
    Core(#[from] stereogram_core::Error),
}

/// Convenience alias for I/O results.
pub type IoResult<T> = Result<T, IoError>;
