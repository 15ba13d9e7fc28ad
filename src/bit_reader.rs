//! Forward-only bit reader with exponential-Golomb decoding
//!
//! Bits are addressed MSB-first: bit 0 is the high bit of the first byte.
//! The reader never moves past the last bit of its view, and an operation
//! that fails leaves the position where it was.

use crate::error::{Error, Result};
use crate::MAX_READ_BITS;

/// Sequential bit reader over a borrowed byte slice
#[derive(Debug, Clone, Copy)]
pub struct BitReader<'a> {
    data: &'a [u8],
    bit_pos: usize,
}

impl<'a> BitReader<'a> {
    /// Create a reader positioned at the first bit of `data`
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, bit_pos: 0 }
    }

    /// Current position in bits from the start of the view
    #[inline]
    pub const fn position(&self) -> usize {
        self.bit_pos
    }

    /// Total number of bits in the view
    #[inline]
    pub const fn bit_len(&self) -> usize {
        self.data.len() * 8
    }

    /// Bits left before the end of the view
    #[inline]
    pub const fn remaining_bits(&self) -> usize {
        self.bit_len() - self.bit_pos
    }

    /// Check if the position falls on a byte boundary
    #[inline]
    pub const fn is_byte_aligned(&self) -> bool {
        self.bit_pos % 8 == 0
    }

    /// Read the next `n` bits (at most 32) as an unsigned value
    ///
    /// A span crossing byte boundaries is assembled piecewise: the bits left
    /// in the current byte form the high-order part and the following bytes
    /// supply the rest.
    pub fn read_bits(&mut self, n: u32) -> Result<u32> {
        if n > MAX_READ_BITS {
            return Err(Error::TooManyBits(n));
        }
        if n as usize > self.remaining_bits() {
            return Err(Error::EndOfStream);
        }

        let mut value = 0u64;
        let mut needed = n as usize;

        while needed > 0 {
            let available = 8 - self.bit_pos % 8;
            let take = available.min(needed);
            let byte = self.data[self.bit_pos / 8];
            let chunk = (byte >> (available - take)) & (0xFF >> (8 - take));

            value = (value << take) | u64::from(chunk);
            self.bit_pos += take;
            needed -= take;
        }

        Ok(value as u32)
    }

    /// Read `n` bits without consuming them
    #[inline]
    pub fn peek_bits(&self, n: u32) -> Result<u32> {
        let mut probe = *self;
        probe.read_bits(n)
    }

    /// Read a single bit as a flag
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        Ok(self.read_bits(1)? == 1)
    }

    /// Read 8 bits
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bits(8)? as u8)
    }

    /// Read 16 bits
    #[inline]
    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(self.read_bits(16)? as u16)
    }

    /// Read 32 bits
    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_bits(32)
    }

    /// Advance by `n` bits
    #[inline]
    pub fn skip_bits(&mut self, n: usize) -> Result<()> {
        if n > self.remaining_bits() {
            return Err(Error::EndOfStream);
        }
        self.bit_pos += n;
        Ok(())
    }

    /// Advance to the next byte boundary, if not already on one
    #[inline]
    pub fn align_to_byte(&mut self) {
        let rem = self.bit_pos % 8;
        if rem != 0 {
            self.bit_pos += 8 - rem;
        }
    }

    /// Count and consume the run of 0 bits at the position
    ///
    /// The terminating 1 bit is left unread. Fails with
    /// [`Error::EndOfStream`] if the view ends before a 1 bit is found.
    pub fn skip_zeros(&mut self) -> Result<usize> {
        let mut pos = self.bit_pos;

        while pos < self.bit_len() {
            let offset = pos % 8;
            let byte = self.data[pos / 8] << offset;

            if byte != 0 {
                pos += byte.leading_zeros() as usize;
                let count = pos - self.bit_pos;
                self.bit_pos = pos;
                return Ok(count);
            }

            pos += 8 - offset;
        }

        Err(Error::EndOfStream)
    }

    /// Decode an unsigned exponential-Golomb codeword
    ///
    /// `k` zero bits, a 1 marker and `k` information bits decode to
    /// `2^k + info - 1`. Prefixes of 32 or more zeros fail with
    /// [`Error::CodewordTooLong`].
    pub fn read_exp_golomb(&mut self) -> Result<u32> {
        let start = self.bit_pos;
        let zeros = self.skip_zeros()?;

        if zeros >= MAX_READ_BITS as usize {
            self.bit_pos = start;
            return Err(Error::CodewordTooLong(
                u32::try_from(zeros).unwrap_or(u32::MAX),
            ));
        }

        match self.read_bits(zeros as u32 + 1) {
            Ok(code) => Ok(code - 1),
            Err(e) => {
                self.bit_pos = start;
                Err(e)
            }
        }
    }

    /// Decode a signed exponential-Golomb codeword
    ///
    /// Odd codewords map to positive values, even ones to zero or negative:
    /// 0, 1, -1, 2, -2, ...
    pub fn read_signed_exp_golomb(&mut self) -> Result<i32> {
        let code = u64::from(self.read_exp_golomb()?);
        let magnitude = ((code + 1) / 2) as i32;

        if code & 1 == 1 {
            Ok(magnitude)
        } else {
            Ok(-magnitude)
        }
    }
}
