//! Error types for stereogram-core
//!
//! Provides a unified error type for buffer construction and pixel access.
//! Each variant captures enough context for diagnostics without exposing
//! internal layout details.

use thiserror::Error;

/// Stereogram core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Zero width or height
    #[error("empty buffer: {width}x{height}")]
    EmptyBuffer { width: u32, height: u32 },

    /// Buffer dimensions differ from the dimensions they are paired with
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Coordinates outside the buffer
    #[error("coordinates ({x}, {y}) out of bounds for {width}x{height} buffer")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
    },

    /// Raw sample data does not match width * height * channels
    #[error("invalid data length: expected {expected} bytes, got {actual}")]
    InvalidDataLength { expected: usize, actual: usize },

    /// Unsupported number of samples per pixel
    #[error("invalid channel count: {0} (expected 3 or 4)")]
    InvalidChannels(u32),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
