//! Shared decoding support for the integration tests
//!
//! A deliberately plain T.4 / T.6 / Modified Huffman decoder. It reads
//! the encoder output the way a conformant container reader would, so
//! the round-trip tests fail on any misplaced bit.

use std::collections::HashMap;

use ccitt_fax::tables::{
    Code, BLACK_MAKE_UP, BLACK_TERMINATING, MAKE_UP_LENGTHS, WHITE_MAKE_UP, WHITE_TERMINATING,
};
use ccitt_fax::Color;

/// MSB-first bit reader over a byte slice
pub struct BitReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn read_bit(&mut self) -> Option<bool> {
        let byte = *self.data.get(self.pos / 8)?;
        let bit = byte >> (7 - self.pos % 8) & 1 != 0;
        self.pos += 1;
        Some(bit)
    }

    pub fn align_to_byte(&mut self) {
        self.pos = (self.pos + 7) / 8 * 8;
    }
}

/// Reverse maps from (bit count, pattern) to run length, per color
pub struct RunCodes {
    white: HashMap<(u8, u16), usize>,
    black: HashMap<(u8, u16), usize>,
}

impl RunCodes {
    pub fn new() -> Self {
        fn reverse(term: &[Code; 64], make_up: &[Code; 40]) -> HashMap<(u8, u16), usize> {
            let runs = (0..64).chain(MAKE_UP_LENGTHS);
            term.iter()
                .chain(make_up)
                .zip(runs)
                .map(|(code, run)| ((code.len, code.pattern), run))
                .collect()
        }
        Self {
            white: reverse(&WHITE_TERMINATING, &WHITE_MAKE_UP),
            black: reverse(&BLACK_TERMINATING, &BLACK_MAKE_UP),
        }
    }

    fn read_code(&self, reader: &mut BitReader, color: Color) -> usize {
        let map = match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        };
        let mut acc: u16 = 0;
        let mut n: u8 = 0;
        loop {
            let bit = reader.read_bit().expect("bit stream ended inside a code word");
            acc = acc << 1 | u16::from(bit);
            n += 1;
            if let Some(&run) = map.get(&(n, acc)) {
                return run;
            }
            assert!(n < 14, "no {:?} code word within 13 bits", color);
        }
    }

    /// Decode one full run: make-up codes accumulate until a
    /// terminating code closes the run
    pub fn read_run(&self, reader: &mut BitReader, color: Color) -> usize {
        let mut total = 0;
        loop {
            let value = self.read_code(reader, color);
            total += value;
            if value < 64 {
                return total;
            }
        }
    }
}

fn pixel(color: Color) -> u8 {
    match color {
        Color::White => 0,
        Color::Black => 1,
    }
}

fn decode_1d_row(reader: &mut BitReader, codes: &RunCodes, width: usize, image: &mut Vec<u8>) {
    let mut color = Color::White;
    let mut column = 0;
    while column < width {
        let run = codes.read_run(reader, color);
        image.extend(std::iter::repeat(pixel(color)).take(run));
        column += run;
        color = color.opposite();
    }
    assert_eq!(column, width, "runs overflow the row");
}

/// Read zero bits up to the terminating one-bit of an EOL marker
pub fn expect_eol(reader: &mut BitReader) {
    let mut zeros = 0;
    loop {
        match reader.read_bit() {
            Some(false) => zeros += 1,
            Some(true) => break,
            None => panic!("bit stream ended while looking for an EOL"),
        }
    }
    assert!(zeros >= 11, "EOL marker has only {} zero bits", zeros);
}

/// Decode a T.4 one-dimensional strip; `rtc` also consumes the five
/// extra EOLs of a return-to-control sequence
pub fn decode_t4(data: &[u8], width: usize, height: usize, rtc: bool) -> Vec<u8> {
    let codes = RunCodes::new();
    let mut reader = BitReader::new(data);
    let mut image = Vec::with_capacity(width * height);
    for _ in 0..height {
        decode_1d_row(&mut reader, &codes, width, &mut image);
        expect_eol(&mut reader);
    }
    if rtc {
        for _ in 0..5 {
            expect_eol(&mut reader);
        }
    }
    image
}

/// Decode a Modified Huffman strip (byte-aligned rows, no markers)
pub fn decode_mh(data: &[u8], width: usize, height: usize) -> Vec<u8> {
    let codes = RunCodes::new();
    let mut reader = BitReader::new(data);
    let mut image = Vec::with_capacity(width * height);
    for _ in 0..height {
        decode_1d_row(&mut reader, &codes, width, &mut image);
        reader.align_to_byte();
    }
    image
}

enum Mode {
    Pass,
    Horizontal,
    Vertical(isize),
}

fn read_mode(reader: &mut BitReader) -> Mode {
    let mut zeros = 0;
    while !reader.read_bit().expect("bit stream ended inside a mode code") {
        zeros += 1;
        assert!(zeros <= 6, "unexpected marker or extension code");
    }
    match zeros {
        0 => Mode::Vertical(0),
        1 | 4 | 5 => {
            let right = reader.read_bit().expect("bit stream ended inside a mode code");
            let distance = match zeros {
                1 => 1,
                4 => 2,
                _ => 3,
            };
            Mode::Vertical(if right { distance } else { -distance })
        }
        2 => Mode::Horizontal,
        3 => Mode::Pass,
        _ => panic!("invalid mode code with {} leading zeros", zeros),
    }
}

fn pixel_at(row: &[u8], i: isize) -> u8 {
    if i < 0 {
        0
    } else {
        u8::from(row[i as usize] != 0)
    }
}

fn next_change(row: &[u8], from: isize) -> usize {
    let prev = pixel_at(row, from);
    let mut c = (from + 1) as usize;
    while c < row.len() && u8::from(row[c] != 0) == prev {
        c += 1;
    }
    c
}

fn find_b1(reference: &[u8], a0: isize, color: Color) -> usize {
    let coding_black = color == Color::Black;
    let mut b1 = next_change(reference, a0);
    while b1 < reference.len() && (reference[b1] != 0) == coding_black {
        b1 = next_change(reference, b1 as isize);
    }
    b1
}

fn decode_2d_row(reader: &mut BitReader, codes: &RunCodes, reference: &[u8]) -> Vec<u8> {
    let width = reference.len();
    let mut row = vec![0u8; width];
    let mut a0: isize = -1;
    let mut color = Color::White;
    while a0 < width as isize {
        let start = a0.max(0) as usize;
        match read_mode(reader) {
            Mode::Pass => {
                let b1 = find_b1(reference, a0, color);
                let b2 = if b1 < width {
                    next_change(reference, b1 as isize)
                } else {
                    b1
                };
                for p in &mut row[start..b2] {
                    *p = pixel(color);
                }
                a0 = b2 as isize;
            }
            Mode::Vertical(delta) => {
                let b1 = find_b1(reference, a0, color);
                let a1 = b1 as isize + delta;
                assert!(a1 >= start as isize && a1 <= width as isize);
                for p in &mut row[start..a1 as usize] {
                    *p = pixel(color);
                }
                a0 = a1;
                color = color.opposite();
            }
            Mode::Horizontal => {
                let n1 = codes.read_run(reader, color);
                let n2 = codes.read_run(reader, color.opposite());
                for p in &mut row[start..start + n1] {
                    *p = pixel(color);
                }
                for p in &mut row[start + n1..start + n1 + n2] {
                    *p = pixel(color.opposite());
                }
                a0 = (start + n1 + n2) as isize;
            }
        }
    }
    row
}

/// Decode a T.6 strip and its closing EOFB
pub fn decode_t6(data: &[u8], width: usize, height: usize) -> Vec<u8> {
    let codes = RunCodes::new();
    let mut reader = BitReader::new(data);
    let mut reference = vec![0u8; width];
    let mut image = Vec::with_capacity(width * height);
    for _ in 0..height {
        let row = decode_2d_row(&mut reader, &codes, &reference);
        image.extend_from_slice(&row);
        reference = row;
    }
    expect_eol(&mut reader);
    expect_eol(&mut reader);
    image
}
