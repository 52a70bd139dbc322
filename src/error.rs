use crate::Color;
use thiserror::Error;

/// An error when encoding a CCITT bi-level image strip
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum FaxError {
    /// An option bit requires coding that is not implemented
    #[error("unsupported T4 option: {0}")]
    UnsupportedOption(&'static str),

    /// The strip dimensions do not describe a pixel rectangle
    #[error("invalid dimension: {width}x{height} ({pixels} pixel bytes)")]
    InvalidDimension {
        /// Row width in pixels
        width: usize,
        /// Number of rows in the strip
        height: usize,
        /// Length of the supplied pixel buffer
        pixels: usize,
    },

    /// The byte sink failed or reported a short write
    #[error("failed to write to sink")]
    SinkWrite(#[from] std::io::Error),

    /// No code table entry for a legal run; a programmer error, never data-driven
    #[error("no code for a {color:?} run of length {len}")]
    InternalInvariant {
        /// Run color of the failed lookup
        color: Color,
        /// Run length of the failed lookup
        len: usize,
    },
}

/// Type alias for convenience
pub type FaxResult<T> = Result<T, FaxError>;
