//! # Codec facade
//!
//! Owns the per-strip resources (bit sink, reference line) and drives
//! the scheme-specific encoder over the rows of a strip.

use std::io::Write;

use crate::{
    bits::BitSink,
    g3::{G3Encoder, MhEncoder, T4Options},
    g42d::G4Encoder,
    FaxError, FaxResult,
};

/// The coding scheme of a strip
///
/// A closed set: the dispatch is a plain `match`, no trait objects.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Scheme {
    /// T.4 one-dimensional coding with EOL markers (TIFF Compression 3)
    ///
    /// The options word is meaningful for this scheme only.
    T4(T4Options),
    /// T.6 two-dimensional coding (TIFF Compression 4)
    T6,
    /// Modified Huffman rows without markers (TIFF Compression 2)
    ModifiedHuffman,
}

enum Codec {
    G3(G3Encoder),
    G4(G4Encoder),
    Mh(MhEncoder),
}

/// Compresses strips of expanded 1-bit pixels into CCITT fax data
///
/// One instance owns the state for one strip at a time; encoding
/// strips concurrently takes one instance per thread.
pub struct FaxEncoder {
    width: usize,
    sink: BitSink,
    codec: Codec,
}

impl FaxEncoder {
    /// Create an encoder for strips of `width`-pixel rows
    pub fn new(width: usize, scheme: Scheme) -> Self {
        let codec = match scheme {
            Scheme::T4(options) => Codec::G3(G3Encoder::new(width, options)),
            Scheme::T6 => Codec::G4(G4Encoder::new(width)),
            Scheme::ModifiedHuffman => Codec::Mh(MhEncoder::new(width)),
        };
        Self {
            width,
            sink: BitSink::new(),
            codec,
        }
    }

    /// Pre-allocate the output buffer for strips of up to `rows_per_strip` rows
    ///
    /// One byte per input pixel is a loose worst-case bound; the sink
    /// still grows if a pathological strip exceeds it.
    pub fn initialize(&mut self, rows_per_strip: usize) {
        self.sink = BitSink::with_capacity(self.width * rows_per_strip);
    }

    /// Compress one strip of `height` rows and append the bytes to `sink`
    ///
    /// `pixels` holds one byte per pixel (zero = white, non-zero =
    /// black), row-major. Returns the number of bytes written; the
    /// encoder is ready for the next strip afterwards.
    pub fn compress_strip<W: Write + ?Sized>(
        &mut self,
        pixels: &[u8],
        height: usize,
        sink: &mut W,
    ) -> FaxResult<usize> {
        if self.width == 0 || height == 0 || pixels.len() != self.width * height {
            return Err(FaxError::InvalidDimension {
                width: self.width,
                height,
                pixels: pixels.len(),
            });
        }
        self.sink.reset();
        match &mut self.codec {
            Codec::G3(encoder) => encoder.encode_strip(pixels, &mut self.sink)?,
            Codec::G4(encoder) => encoder.encode_strip(pixels, &mut self.sink)?,
            Codec::Mh(encoder) => encoder.encode_strip(pixels, &mut self.sink)?,
        }
        self.sink.pad_to_byte();
        self.sink.flush_to(sink)?;
        let written = self.sink.bytes_written();
        log::debug!("compressed strip of {} rows into {} bytes", height, written);
        Ok(written)
    }

    /// Release the output buffer
    ///
    /// The encoder stays usable; the next strip re-allocates on demand.
    pub fn dispose(&mut self) {
        self.sink.dispose();
    }
}
