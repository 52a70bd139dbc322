//! # CCITT Group 3 1D-encoding
//!
//! Every row is coded independently as alternating white/black runs,
//! each run as zero or more make-up codes followed by one terminating
//! code, and closed with an EOL marker.
//!
//! Spec: ITU-T Recommendation T.4 (07/03) <https://www.itu.int/rec/T-REC-T.4-200307-I/en>

use crate::{bits::BitSink, runs, tables, Color, FaxError, FaxResult};

/// The 12-bit end-of-line marker
pub(crate) const EOL: u32 = 0b0000_0000_0001;
/// Bit length of the EOL marker
pub(crate) const EOL_BITS: u8 = 12;

/// Options carried by the TIFF `T4Options` tag word
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct T4Options {
    /// Insert zero fill bits so that every EOL ends on a byte boundary
    pub fill: bool,
    /// Close the strip with a return-to-control sequence (six EOLs)
    pub eol_rtc: bool,
}

impl T4Options {
    /// T4Options bit 0: two-dimensional coding
    const BIT_2D: u32 = 1;
    /// T4Options bit 1: uncompressed mode
    const BIT_UNCOMPRESSED: u32 = 1 << 1;
    /// T4Options bit 2: fill bits before EOL
    const BIT_FILL: u32 = 1 << 2;

    /// Interpret the raw `T4Options` flag word from a TIFF IFD
    ///
    /// Option bits that require coding not implemented here are
    /// rejected before any output is produced.
    pub fn from_tag_bits(bits: u32) -> FaxResult<Self> {
        if bits & Self::BIT_2D != 0 {
            return Err(FaxError::UnsupportedOption("two-dimensional coding"));
        }
        if bits & Self::BIT_UNCOMPRESSED != 0 {
            return Err(FaxError::UnsupportedOption("uncompressed mode"));
        }
        Ok(Self {
            fill: bits & Self::BIT_FILL != 0,
            eol_rtc: false,
        })
    }

    /// Request a return-to-control sequence at the end of every strip
    pub fn with_eol_rtc(mut self, eol_rtc: bool) -> Self {
        self.eol_rtc = eol_rtc;
        self
    }
}

/// # Group 3 (T.4) Encoder
pub struct G3Encoder {
    width: usize,
    options: T4Options,
}

impl G3Encoder {
    /// Create a new instance
    pub fn new(width: usize, options: T4Options) -> Self {
        Self { width, options }
    }

    /// Encode one strip of rows, appending to `sink`
    pub fn encode_strip(&self, pixels: &[u8], sink: &mut BitSink) -> FaxResult<()> {
        runs::strip_rows(self.width, pixels)?;
        for row in pixels.chunks_exact(self.width) {
            encode_1d_row(row, sink)?;
            self.write_eol(sink);
        }
        if self.options.eol_rtc {
            // the final row's EOL plus five more form the six-EOL RTC
            for _ in 0..5 {
                self.write_eol(sink);
            }
        }
        Ok(())
    }

    fn write_eol(&self, sink: &mut BitSink) {
        if self.options.fill {
            let fill = (12 - sink.bit_pos()) % 8;
            if fill > 0 {
                sink.write_bits(0, fill);
            }
        }
        sink.write_bits(EOL, EOL_BITS);
    }
}

/// Encode a single row as alternating white/black runs
///
/// The first run is white; a row that starts with a black pixel begins
/// with a zero-length white run.
pub(crate) fn encode_1d_row(row: &[u8], sink: &mut BitSink) -> FaxResult<()> {
    let width = row.len();
    let mut color = Color::White;
    let mut column = 0;
    while column < width {
        let len = runs::next_run_length(row, column, color);
        tables::emit_run(sink, color, len)?;
        color.invert();
        column += len;
    }
    Ok(())
}

/// # Modified Huffman Encoder
///
/// TIFF Compression 2: the T.4 one-dimensional run codes without EOL
/// markers, every row padded to a byte boundary.
pub struct MhEncoder {
    width: usize,
}

impl MhEncoder {
    /// Create a new instance
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    /// Encode one strip of rows, appending to `sink`
    pub fn encode_strip(&self, pixels: &[u8], sink: &mut BitSink) -> FaxResult<()> {
        runs::strip_rows(self.width, pixels)?;
        for row in pixels.chunks_exact(self.width) {
            encode_1d_row(row, sink)?;
            sink.pad_to_byte();
        }
        Ok(())
    }
}
