//! Variable-width LZW codec
//!
//! Stream layout:
//! - literals are 8 bits wide, so codes 0..=255 stand for themselves
//! - code 256 clears the table, code 257 ends the stream
//! - codes start 9 bits wide and widen as the table grows, up to 12 bits
//! - codes are packed least-significant-bit first; the last byte is zero-padded
//!
//! The encoder always starts with a clear code and emits another one when the
//! table would exceed 4095 entries. This is the LSB, 8-bit-literal variant used
//! by GIF and by `compress/lzw`-style libraries, so streams interoperate with
//! them.

use duplex_common::{Result, TransformError};
use std::collections::HashMap;

const LITERAL_WIDTH: u32 = 8;
const CLEAR: u16 = 1 << LITERAL_WIDTH;
const END: u16 = CLEAR + 1;
const MAX_WIDTH: u32 = 12;
const MAX_CODE: u16 = (1 << MAX_WIDTH) - 1;
const TABLE_SIZE: usize = 1 << MAX_WIDTH;

/// Packs codes into bytes, least-significant bit first
struct BitWriter {
    out: Vec<u8>,
    bits: u32,
    n_bits: u32,
}

impl BitWriter {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            out: Vec::with_capacity(capacity),
            bits: 0,
            n_bits: 0,
        }
    }

    fn write(&mut self, code: u16, width: u32) {
        self.bits |= u32::from(code) << self.n_bits;
        self.n_bits += width;
        while self.n_bits >= 8 {
            self.out.push(self.bits.to_le_bytes()[0]);
            self.bits >>= 8;
            self.n_bits -= 8;
        }
    }

    fn finish(mut self) -> Vec<u8> {
        if self.n_bits > 0 {
            self.out.push(self.bits.to_le_bytes()[0]);
        }
        self.out
    }
}

/// Unpacks codes from bytes, least-significant bit first
struct BitReader<'a> {
    input: &'a [u8],
    pos: usize,
    bits: u32,
    n_bits: u32,
}

impl<'a> BitReader<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            bits: 0,
            n_bits: 0,
        }
    }

    /// Next code of `width` bits, or `None` once the input runs dry
    fn read(&mut self, width: u32) -> Option<u16> {
        while self.n_bits < width {
            let byte = *self.input.get(self.pos)?;
            self.pos += 1;
            self.bits |= u32::from(byte) << self.n_bits;
            self.n_bits += 8;
        }
        let mask = (1u32 << width) - 1;
        let code = u16::try_from(self.bits & mask).ok()?;
        self.bits >>= width;
        self.n_bits -= width;
        Some(code)
    }
}

/// Encoder state: code width, next free code and the string table
struct Encoder {
    writer: BitWriter,
    width: u32,
    hi: u16,
    overflow: u16,
    table: HashMap<u32, u16>,
}

impl Encoder {
    fn new(input_len: usize) -> Self {
        Self {
            writer: BitWriter::with_capacity(input_len / 2 + 4),
            width: LITERAL_WIDTH + 1,
            hi: END,
            overflow: CLEAR << 1,
            table: HashMap::new(),
        }
    }

    fn emit(&mut self, code: u16) {
        self.writer.write(code, self.width);
    }

    /// Advance to the next code. Returns `true` when the table was exhausted
    /// and has just been reset with a clear code.
    fn next_code(&mut self) -> bool {
        self.hi += 1;
        if self.hi == self.overflow {
            self.width += 1;
            self.overflow <<= 1;
        }
        if self.hi == MAX_CODE {
            self.emit(CLEAR);
            self.width = LITERAL_WIDTH + 1;
            self.hi = END;
            self.overflow = CLEAR << 1;
            self.table.clear();
            return true;
        }
        false
    }
}

/// Compress `input` into an LZW stream
///
/// Empty input produces a valid stream holding only the clear and end codes.
#[must_use]
pub fn encode(input: &[u8]) -> Vec<u8> {
    let mut enc = Encoder::new(input.len());
    enc.emit(CLEAR);

    let Some((&first, rest)) = input.split_first() else {
        enc.emit(END);
        return enc.writer.finish();
    };

    let mut code = u16::from(first);
    for &byte in rest {
        let key = (u32::from(code) << 8) | u32::from(byte);
        if let Some(&known) = enc.table.get(&key) {
            code = known;
            continue;
        }
        enc.emit(code);
        code = u16::from(byte);
        if enc.next_code() {
            continue;
        }
        enc.table.insert(key, enc.hi);
    }

    enc.emit(code);
    enc.next_code();
    enc.emit(END);
    enc.writer.finish()
}

/// Decoder state mirroring [`Encoder`]
struct Decoder {
    width: u32,
    hi: u16,
    overflow: u16,
    last: Option<u16>,
    prefix: Vec<u16>,
    suffix: Vec<u8>,
    scratch: Vec<u8>,
}

impl Decoder {
    fn new() -> Self {
        Self {
            width: LITERAL_WIDTH + 1,
            hi: END,
            overflow: CLEAR << 1,
            last: None,
            prefix: vec![0; TABLE_SIZE],
            suffix: vec![0; TABLE_SIZE],
            scratch: Vec::with_capacity(TABLE_SIZE),
        }
    }

    fn reset(&mut self) {
        self.width = LITERAL_WIDTH + 1;
        self.hi = END;
        self.overflow = CLEAR << 1;
        self.last = None;
    }

    /// Write the string for `code` into the scratch buffer, in order
    fn expand(&mut self, code: u16) -> Result<()> {
        self.scratch.clear();
        let mut c = code;
        while c > END {
            self.scratch.push(self.suffix[usize::from(c)]);
            c = self.prefix[usize::from(c)];
        }
        let literal = u8::try_from(c).map_err(|_| {
            TransformError::corrupt(format!("LZW code {code} references a control code"))
        })?;
        self.scratch.push(literal);
        self.scratch.reverse();
        Ok(())
    }

    /// Decode one data code into the scratch buffer and grow the table
    fn step(&mut self, code: u16) -> Result<()> {
        if code < CLEAR {
            self.scratch.clear();
            self.scratch.push(code.to_le_bytes()[0]);
        } else if code < self.hi {
            self.expand(code)?;
        } else if let (true, Some(last)) = (code == self.hi, self.last) {
            // The code being defined right now: previous string plus its own head.
            self.expand(last)?;
            let head = self.scratch[0];
            self.scratch.push(head);
        } else {
            return Err(TransformError::corrupt(format!(
                "invalid LZW code {code} (next free code {})",
                self.hi
            )));
        }

        if let Some(last) = self.last {
            let slot = usize::from(self.hi);
            self.suffix[slot] = self.scratch[0];
            self.prefix[slot] = last;
        }
        self.last = Some(code);
        self.hi += 1;

        if self.hi >= self.overflow {
            if self.width == MAX_WIDTH {
                // Table full: keep `hi` in range and stop defining codes until a clear.
                self.last = None;
                self.hi -= 1;
            } else {
                self.width += 1;
                self.overflow <<= 1;
            }
        }
        Ok(())
    }
}

/// Decompress an LZW stream produced by [`encode`]
///
/// Bytes following the end code are ignored.
///
/// # Errors
///
/// Returns [`TransformError::Corrupt`] if the stream ends before its end code
/// or contains a code that is not defined at that point.
pub fn decode(input: &[u8]) -> Result<Vec<u8>> {
    let mut reader = BitReader::new(input);
    let mut dec = Decoder::new();
    let mut out = Vec::with_capacity(input.len().saturating_mul(2));

    loop {
        let code = reader
            .read(dec.width)
            .ok_or_else(|| TransformError::corrupt("LZW stream ended before its end code"))?;
        match code {
            CLEAR => dec.reset(),
            END => return Ok(out),
            _ => {
                dec.step(code)?;
                out.extend_from_slice(&dec.scratch);
            }
        }
    }
}
