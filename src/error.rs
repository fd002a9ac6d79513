//! Error types for palette generation requests.

use thiserror::Error;

/// Result type alias for request handling.
pub type Result<T> = std::result::Result<T, PaletteError>;

/// Conditions that make a generation request unusable.
///
/// Malformed color text is deliberately absent: it degrades to a sentinel
/// color instead of failing the call.
#[derive(Debug, Error)]
pub enum PaletteError {
    /// A field required by the request variant is missing or empty
    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },

    /// RGBA byte length does not match the declared dimensions
    #[error("pixel buffer of {width}x{height} needs {expected} bytes, got {actual}")]
    PixelBufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

impl PaletteError {
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }
}
