#![warn(missing_docs)]
//! # CCITT fax encodings
//!
//! Bit-exact encoders for single-strip, 1-bit-per-pixel TIFF image
//! data: T.4 one-dimensional coding (Group 3), T.6 two-dimensional
//! coding (Group 4) and plain Modified Huffman rows.
//!
//! Input rows are expanded to one byte per pixel (zero = white,
//! non-zero = black); output bytes are packed MSB-first, matching the
//! default TIFF `FillOrder`.
//!
//! ```
//! use ccitt_fax::{FaxEncoder, Scheme};
//!
//! let mut encoder = FaxEncoder::new(8, Scheme::T6);
//! encoder.initialize(1);
//! let mut strip = Vec::new();
//! encoder.compress_strip(&[0, 0, 0, 1, 1, 1, 0, 0], 1, &mut strip)?;
//! # Ok::<(), ccitt_fax::FaxError>(())
//! ```

pub mod bits;
mod color;
mod encoder;
mod error;
pub mod g3;
pub mod g42d;
mod runs;
pub mod tables;

pub use color::Color;
pub use encoder::{FaxEncoder, Scheme};
pub use error::{FaxError, FaxResult};
pub use g3::T4Options;
