use alloc::string::String;
use enough::StopReason;

use crate::pixel::PixelLayout;

/// Errors from PNM decoding and encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PnmError {
    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unrecognized format magic bytes")]
    UnrecognizedFormat,

    #[error("invalid sample data: {0}")]
    InvalidSampleData(String),

    #[error("unsupported color model: {0:?}")]
    UnsupportedColorModel(PixelLayout),

    #[error("invalid image dimensions: {width}x{height}")]
    InvalidImageDimensions { width: u32, height: u32 },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("pixel layout mismatch: expected {expected:?}, got {actual:?}")]
    LayoutMismatch {
        expected: PixelLayout,
        actual: PixelLayout,
    },

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("operation cancelled")]
    Cancelled(StopReason),

    #[cfg(feature = "std")]
    #[error("I/O error: {0}")]
    Io(std::io::Error),
}

impl From<StopReason> for PnmError {
    fn from(r: StopReason) -> Self {
        PnmError::Cancelled(r)
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for PnmError {
    fn from(e: std::io::Error) -> Self {
        PnmError::Io(e)
    }
}
