//! # CCITT Group 4 2D-encoding
//!
//! Every row is coded against the previously coded row (the reference
//! line) with pass, vertical and horizontal modes; the strip is closed
//! by an EOFB marker. The reference line before the first row is
//! all-white.
//!
//! Spec: ITU-T Recommendation T.6 (11/88) <https://www.itu.int/rec/T-REC-T.6-198811-I/en>

use crate::{
    bits::BitSink,
    g3::{EOL, EOL_BITS},
    runs, tables, Color, FaxResult,
};

/// # Group 4 (T.6) Encoder
pub struct G4Encoder {
    width: usize,
    reference: Vec<u8>,
}

impl G4Encoder {
    /// Create a new encoder for rows of `width` pixels
    pub fn new(width: usize) -> Self {
        Self {
            width,
            reference: vec![0; width],
        }
    }

    /// Encode one strip of rows, appending to `sink`
    ///
    /// The reference line is reset to all-white first, so every strip
    /// is independent of the ones encoded before it.
    pub fn encode_strip(&mut self, pixels: &[u8], sink: &mut BitSink) -> FaxResult<()> {
        runs::strip_rows(self.width, pixels)?;
        if self.reference.len() != self.width {
            self.reference = vec![0; self.width];
        } else {
            self.reference.fill(0);
        }
        for row in pixels.chunks_exact(self.width) {
            self.encode_row(row, sink)?;
            self.reference.copy_from_slice(row);
        }
        // EOFB: two back-to-back EOLs
        sink.write_bits(EOL, EOL_BITS);
        sink.write_bits(EOL, EOL_BITS);
        Ok(())
    }

    fn encode_row(&self, row: &[u8], sink: &mut BitSink) -> FaxResult<()> {
        let width = self.width;
        // a0 starts on the virtual white pixel left of the row
        let mut a0: isize = -1;
        let mut color = Color::White;
        while a0 < width as isize {
            let start = a0.max(0) as usize;
            let a1 = start + runs::next_run_length(row, start, color);
            let b1 = runs::find_b1(&self.reference, a0, color);
            let b2 = if b1 < width {
                runs::next_changing_element(&self.reference, b1 as isize)
            } else {
                b1
            };

            if b2 < a1 {
                // pass mode
                sink.write_bits(0b0001, 4);
                a0 = b2 as isize;
            } else {
                let delta = a1 as isize - b1 as isize;
                if (-3..=3).contains(&delta) {
                    // vertical mode
                    let (pattern, len) = match delta {
                        -3 => (0b0000010, 7),
                        -2 => (0b000010, 6),
                        -1 => (0b010, 3),
                        0 => (0b1, 1),
                        1 => (0b011, 3),
                        2 => (0b000011, 6),
                        _ => (0b0000011, 7),
                    };
                    sink.write_bits(pattern, len);
                    a0 = a1 as isize;
                    color.invert();
                } else {
                    // horizontal mode: two runs after the prefix
                    let a2 = if a1 < width {
                        a1 + runs::next_run_length(row, a1, color.opposite())
                    } else {
                        a1
                    };
                    sink.write_bits(0b001, 3);
                    tables::emit_run(sink, color, a1 - start)?;
                    tables::emit_run(sink, color.opposite(), a2 - a1)?;
                    a0 = a2 as isize;
                }
            }
        }
        Ok(())
    }
}
