//! Error types for stereogram-synth

use thiserror::Error;

/// Errors that can occur during stereogram synthesis
#[derive(Debug, Error)]
pub enum SynthError {
    /// Core library error (dimension mismatch, empty buffer, ...)
    #[error("core error: {0}")]
    Core(#[from] stereogram_core::Error),

    /// Invalid algorithm parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

impl SynthError {
    /// Whether the background and depth map differed in size.
    pub fn is_dimension_mismatch(&self) -> bool {
        matches!(
            self,
            SynthError::Core(stereogram_core::Error::DimensionMismatch { .. })
        )
    }
}

/// Result type for synthesis operations
pub type SynthResult<T> = Result<T, SynthError>;
