//! # T.4 Modified Huffman code book
//!
//! The terminating and make-up codes from ITU-T Recommendation T.4,
//! laid out as dense arrays indexed by run length so the hot path is a
//! bounds-checked array load. Terminating codes cover run lengths 0..=63,
//! make-up codes cover the multiples of 64 up to 2560; the extended
//! make-up codes (1792..=2560) are shared between both colors and appear
//! in both tables.

use crate::{bits::BitSink, Color, FaxError, FaxResult};

/// A code book entry: `len` bits of `pattern`, emitted MSB-first
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Code {
    /// Number of bits in the pattern, between 2 and 13
    pub len: u8,
    /// The bit pattern, right-aligned
    pub pattern: u16,
}

const fn code(len: u8, pattern: u16) -> Code {
    Code { len, pattern }
}

/// Terminating codes for white runs of length 0..=63
#[rustfmt::skip]
pub const WHITE_TERMINATING: [Code; 64] = [
    code(8, 0b00110101), // 0
    code(6, 0b000111),   // 1
    code(4, 0b0111),     // 2
    code(4, 0b1000),     // 3
    code(4, 0b1011),     // 4
    code(4, 0b1100),     // 5
    code(4, 0b1110),     // 6
    code(4, 0b1111),     // 7
    code(5, 0b10011),    // 8
    code(5, 0b10100),    // 9
    code(5, 0b00111),    // 10
    code(5, 0b01000),    // 11
    code(6, 0b001000),   // 12
    code(6, 0b000011),   // 13
    code(6, 0b110100),   // 14
    code(6, 0b110101),   // 15
    code(6, 0b101010),   // 16
    code(6, 0b101011),   // 17
    code(7, 0b0100111),  // 18
    code(7, 0b0001100),  // 19
    code(7, 0b0001000),  // 20
    code(7, 0b0010111),  // 21
    code(7, 0b0000011),  // 22
    code(7, 0b0000100),  // 23
    code(7, 0b0101000),  // 24
    code(7, 0b0101011),  // 25
    code(7, 0b0010011),  // 26
    code(7, 0b0100100),  // 27
    code(7, 0b0011000),  // 28
    code(8, 0b00000010), // 29
    code(8, 0b00000011), // 30
    code(8, 0b00011010), // 31
    code(8, 0b00011011), // 32
    code(8, 0b00010010), // 33
    code(8, 0b00010011), // 34
    code(8, 0b00010100), // 35
    code(8, 0b00010101), // 36
    code(8, 0b00010110), // 37
    code(8, 0b00010111), // 38
    code(8, 0b00101000), // 39
    code(8, 0b00101001), // 40
    code(8, 0b00101010), // 41
    code(8, 0b00101011), // 42
    code(8, 0b00101100), // 43
    code(8, 0b00101101), // 44
    code(8, 0b00000100), // 45
    code(8, 0b00000101), // 46
    code(8, 0b00001010), // 47
    code(8, 0b00001011), // 48
    code(8, 0b01010010), // 49
    code(8, 0b01010011), // 50
    code(8, 0b01010100), // 51
    code(8, 0b01010101), // 52
    code(8, 0b00100100), // 53
    code(8, 0b00100101), // 54
    code(8, 0b01011000), // 55
    code(8, 0b01011001), // 56
    code(8, 0b01011010), // 57
    code(8, 0b01011011), // 58
    code(8, 0b01001010), // 59
    code(8, 0b01001011), // 60
    code(8, 0b00110010), // 61
    code(8, 0b00110011), // 62
    code(8, 0b00110100), // 63
];

/// Terminating codes for black runs of length 0..=63
#[rustfmt::skip]
pub const BLACK_TERMINATING: [Code; 64] = [
    code(10, 0b0000110111),   // 0
    code(3,  0b010),          // 1
    code(2,  0b11),           // 2
    code(2,  0b10),           // 3
    code(3,  0b011),          // 4
    code(4,  0b0011),         // 5
    code(4,  0b0010),         // 6
    code(5,  0b00011),        // 7
    code(6,  0b000101),       // 8
    code(6,  0b000100),       // 9
    code(7,  0b0000100),      // 10
    code(7,  0b0000101),      // 11
    code(7,  0b0000111),      // 12
    code(8,  0b00000100),     // 13
    code(8,  0b00000111),     // 14
    code(9,  0b000011000),    // 15
    code(10, 0b0000010111),   // 16
    code(10, 0b0000011000),   // 17
    code(10, 0b0000001000),   // 18
    code(11, 0b00001100111),  // 19
    code(11, 0b00001101000),  // 20
    code(11, 0b00001101100),  // 21
    code(11, 0b00000110111),  // 22
    code(11, 0b00000101000),  // 23
    code(11, 0b00000010111),  // 24
    code(11, 0b00000011000),  // 25
    code(12, 0b000011001010), // 26
    code(12, 0b000011001011), // 27
    code(12, 0b000011001100), // 28
    code(12, 0b000011001101), // 29
    code(12, 0b000001101000), // 30
    code(12, 0b000001101001), // 31
    code(12, 0b000001101010), // 32
    code(12, 0b000001101011), // 33
    code(12, 0b000011010010), // 34
    code(12, 0b000011010011), // 35
    code(12, 0b000011010100), // 36
    code(12, 0b000011010101), // 37
    code(12, 0b000011010110), // 38
    code(12, 0b000011010111), // 39
    code(12, 0b000001101100), // 40
    code(12, 0b000001101101), // 41
    code(12, 0b000011011010), // 42
    code(12, 0b000011011011), // 43
    code(12, 0b000001010100), // 44
    code(12, 0b000001010101), // 45
    code(12, 0b000001010110), // 46
    code(12, 0b000001010111), // 47
    code(12, 0b000001100100), // 48
    code(12, 0b000001100101), // 49
    code(12, 0b000001010010), // 50
    code(12, 0b000001010011), // 51
    code(12, 0b000000100100), // 52
    code(12, 0b000000110111), // 53
    code(12, 0b000000111000), // 54
    code(12, 0b000000100111), // 55
    code(12, 0b000000101000), // 56
    code(12, 0b000001011000), // 57
    code(12, 0b000001011001), // 58
    code(12, 0b000000101011), // 59
    code(12, 0b000000101100), // 60
    code(12, 0b000001011010), // 61
    code(12, 0b000001100110), // 62
    code(12, 0b000001100111), // 63
];

/// Make-up codes for white runs; index `i` encodes length `64 * (i + 1)`
#[rustfmt::skip]
pub const WHITE_MAKE_UP: [Code; 40] = [
    code(5,  0b11011),        // 64
    code(5,  0b10010),        // 128
    code(6,  0b010111),       // 192
    code(7,  0b0110111),      // 256
    code(8,  0b00110110),     // 320
    code(8,  0b00110111),     // 384
    code(8,  0b01100100),     // 448
    code(8,  0b01100101),     // 512
    code(8,  0b01101000),     // 576
    code(8,  0b01100111),     // 640
    code(9,  0b011001100),    // 704
    code(9,  0b011001101),    // 768
    code(9,  0b011010010),    // 832
    code(9,  0b011010011),    // 896
    code(9,  0b011010100),    // 960
    code(9,  0b011010101),    // 1024
    code(9,  0b011010110),    // 1088
    code(9,  0b011010111),    // 1152
    code(9,  0b011011000),    // 1216
    code(9,  0b011011001),    // 1280
    code(9,  0b011011010),    // 1344
    code(9,  0b011011011),    // 1408
    code(9,  0b010011000),    // 1472
    code(9,  0b010011001),    // 1536
    code(9,  0b010011010),    // 1600
    code(6,  0b011000),       // 1664
    code(9,  0b010011011),    // 1728
    code(11, 0b00000001000),  // 1792
    code(11, 0b00000001100),  // 1856
    code(11, 0b00000001101),  // 1920
    code(12, 0b000000010010), // 1984
    code(12, 0b000000010011), // 2048
    code(12, 0b000000010100), // 2112
    code(12, 0b000000010101), // 2176
    code(12, 0b000000010110), // 2240
    code(12, 0b000000010111), // 2304
    code(12, 0b000000011100), // 2368
    code(12, 0b000000011101), // 2432
    code(12, 0b000000011110), // 2496
    code(12, 0b000000011111), // 2560
];

/// Make-up codes for black runs; index `i` encodes length `64 * (i + 1)`
#[rustfmt::skip]
pub const BLACK_MAKE_UP: [Code; 40] = [
    code(10, 0b0000001111),    // 64
    code(12, 0b000011001000),  // 128
    code(12, 0b000011001001),  // 192
    code(12, 0b000001011011),  // 256
    code(12, 0b000000110011),  // 320
    code(12, 0b000000110100),  // 384
    code(12, 0b000000110101),  // 448
    code(13, 0b0000001101100), // 512
    code(13, 0b0000001101101), // 576
    code(13, 0b0000001001010), // 640
    code(13, 0b0000001001011), // 704
    code(13, 0b0000001001100), // 768
    code(13, 0b0000001001101), // 832
    code(13, 0b0000001110010), // 896
    code(13, 0b0000001110011), // 960
    code(13, 0b0000001110100), // 1024
    code(13, 0b0000001110101), // 1088
    code(13, 0b0000001110110), // 1152
    code(13, 0b0000001110111), // 1216
    code(13, 0b0000001010010), // 1280
    code(13, 0b0000001010011), // 1344
    code(13, 0b0000001010100), // 1408
    code(13, 0b0000001010101), // 1472
    code(13, 0b0000001011010), // 1536
    code(13, 0b0000001011011), // 1600
    code(13, 0b0000001100100), // 1664
    code(13, 0b0000001100101), // 1728
    code(11, 0b00000001000),   // 1792
    code(11, 0b00000001100),   // 1856
    code(11, 0b00000001101),   // 1920
    code(12, 0b000000010010),  // 1984
    code(12, 0b000000010011),  // 2048
    code(12, 0b000000010100),  // 2112
    code(12, 0b000000010101),  // 2176
    code(12, 0b000000010110),  // 2240
    code(12, 0b000000010111),  // 2304
    code(12, 0b000000011100),  // 2368
    code(12, 0b000000011101),  // 2432
    code(12, 0b000000011110),  // 2496
    code(12, 0b000000011111),  // 2560
];

/// The run lengths that have a make-up code, in ascending order
#[rustfmt::skip]
pub const MAKE_UP_LENGTHS: [usize; 40] = [
      64,  128,  192,  256,  320,  384,  448,  512,
     576,  640,  704,  768,  832,  896,  960, 1024,
    1088, 1152, 1216, 1280, 1344, 1408, 1472, 1536,
    1600, 1664, 1728, 1792, 1856, 1920, 1984, 2048,
    2112, 2176, 2240, 2304, 2368, 2432, 2496, 2560,
];

/// The longest run length a single make-up code can express
pub const MAX_MAKE_UP: usize = 2560;

/// Terminating code for a run of `len` (0..=63) pixels of `color`
pub fn terminating(color: Color, len: usize) -> Option<Code> {
    let table = match color {
        Color::White => &WHITE_TERMINATING,
        Color::Black => &BLACK_TERMINATING,
    };
    table.get(len).copied()
}

/// Make-up code for a run of `len` pixels of `color`
///
/// `len` must be a positive multiple of 64, at most [`MAX_MAKE_UP`].
pub fn make_up(color: Color, len: usize) -> Option<Code> {
    if len == 0 || len % 64 != 0 {
        return None;
    }
    let table = match color {
        Color::White => &WHITE_MAKE_UP,
        Color::Black => &BLACK_MAKE_UP,
    };
    table.get(len / 64 - 1).copied()
}

/// Emit the code words for one run of `len` pixels of `color`
///
/// Zero or more make-up codes followed by exactly one terminating code;
/// runs longer than [`MAX_MAKE_UP`] repeat the 2560 make-up code until
/// the remainder fits.
pub(crate) fn emit_run(sink: &mut BitSink, color: Color, mut len: usize) -> FaxResult<()> {
    while len > MAX_MAKE_UP {
        let repeat = make_up(color, MAX_MAKE_UP)
            .ok_or(FaxError::InternalInvariant { color, len: MAX_MAKE_UP })?;
        sink.write_bits(repeat.pattern.into(), repeat.len);
        len -= MAX_MAKE_UP;
    }
    if len >= 64 {
        let rounded = len & !63;
        let makeup = make_up(color, rounded)
            .ok_or(FaxError::InternalInvariant { color, len: rounded })?;
        sink.write_bits(makeup.pattern.into(), makeup.len);
        len -= rounded;
    }
    let term = terminating(color, len).ok_or(FaxError::InternalInvariant { color, len })?;
    sink.write_bits(term.pattern.into(), term.len);
    Ok(())
}
