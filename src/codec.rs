//! Value formats and stateless encode/decode helpers
//!
//! [`IntFormat`] and [`FloatFormat`] describe how a single value is laid out on
//! the wire. The free functions here turn one value into its bytes and back;
//! [`crate::ByteBuffer`] builds on the same routines.

use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::float::{self, FloatLayout};
use crate::range::BitRange;

/// Size of the scratch space for one encoded value
const MAX_VALUE_BYTES: usize = 8;

/// Byte order of multi-byte values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Endian {
    /// Most significant byte first
    #[default]
    Big,
    /// Least significant byte first
    Little,
}

/// Width, signedness and byte order of an exact-width integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntFormat {
    /// Width in bits, a multiple of 8
    pub width: u32,
    /// Two's-complement signed when true
    pub signed: bool,
    /// Byte order
    pub endian: Endian,
}

impl IntFormat {
    /// Unsigned 8-bit
    pub const U8: Self = Self::unsigned(8);
    /// Signed 8-bit
    pub const I8: Self = Self::signed(8);
    /// Unsigned 16-bit, big-endian
    pub const U16: Self = Self::unsigned(16);
    /// Signed 16-bit, big-endian
    pub const I16: Self = Self::signed(16);
    /// Unsigned 32-bit, big-endian
    pub const U32: Self = Self::unsigned(32);
    /// Signed 32-bit, big-endian
    pub const I32: Self = Self::signed(32);
    /// Unsigned 64-bit, big-endian
    pub const U64: Self = Self::unsigned(64);
    /// Signed 64-bit, big-endian
    pub const I64: Self = Self::signed(64);

    /// Create a format from all three parameters
    #[inline]
    pub const fn new(width: u32, signed: bool, endian: Endian) -> Self {
        Self {
            width,
            signed,
            endian,
        }
    }

    /// Big-endian unsigned integer of `width` bits
    #[inline]
    pub const fn unsigned(width: u32) -> Self {
        Self::new(width, false, Endian::Big)
    }

    /// Big-endian signed integer of `width` bits
    #[inline]
    pub const fn signed(width: u32) -> Self {
        Self::new(width, true, Endian::Big)
    }

    /// Same format with a different byte order
    #[inline]
    pub const fn with_endian(self, endian: Endian) -> Self {
        Self { endian, ..self }
    }

    /// Same format, little-endian
    #[inline]
    pub const fn little_endian(self) -> Self {
        self.with_endian(Endian::Little)
    }

    /// Representable range; validates the width
    #[inline]
    pub const fn range(&self) -> Result<BitRange> {
        BitRange::new(self.width, self.signed)
    }

    /// Encoded size in bytes
    #[inline]
    pub const fn byte_len(&self) -> usize {
        (self.width / 8) as usize
    }
}

/// Width and byte order of a binary float
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FloatFormat {
    /// Width in bits: 16, 32 or 64
    pub width: u32,
    /// Byte order
    pub endian: Endian,
}

impl FloatFormat {
    /// Half precision, big-endian
    pub const HALF: Self = Self::new(16, Endian::Big);
    /// Single precision, big-endian
    pub const SINGLE: Self = Self::new(32, Endian::Big);
    /// Double precision, big-endian
    pub const DOUBLE: Self = Self::new(64, Endian::Big);

    /// Create a float format
    #[inline]
    pub const fn new(width: u32, endian: Endian) -> Self {
        Self { width, endian }
    }

    /// Same format with a different byte order
    #[inline]
    pub const fn with_endian(self, endian: Endian) -> Self {
        Self { endian, ..self }
    }

    /// Field layout; validates the width
    #[inline]
    pub const fn layout(&self) -> Result<FloatLayout> {
        FloatLayout::for_width(self.width)
    }

    /// Integer format the raw bit pattern is stored with
    #[inline]
    pub const fn bits_format(&self) -> IntFormat {
        IntFormat::new(self.width, false, self.endian)
    }
}

/// Encoded bytes of a single integer, most significant first unless
/// little-endian. Only the first `format.byte_len()` bytes are meaningful.
#[inline]
pub(crate) fn encode_int_raw(value: i128, format: IntFormat) -> Result<[u8; MAX_VALUE_BYTES]> {
    let range = format.range()?;
    let pattern = range.to_pattern(range.check(value)?);
    let len = format.byte_len();

    let mut out = [0u8; MAX_VALUE_BYTES];
    for (i, byte) in out[..len].iter_mut().enumerate() {
        *byte = (pattern >> (8 * (len - 1 - i))) as u8;
    }
    if format.endian == Endian::Little {
        out[..len].reverse();
    }

    Ok(out)
}

/// Reassemble the unsigned pattern stored in `bytes`
#[inline]
pub(crate) fn pattern_from_bytes(bytes: &[u8], endian: Endian) -> u64 {
    let weighted = |acc: u64, &byte: &u8| (acc << 8) | u64::from(byte);
    match endian {
        Endian::Big => bytes.iter().fold(0, weighted),
        Endian::Little => bytes.iter().rev().fold(0, weighted),
    }
}

/// Encode an integer into a freshly allocated byte vector
///
/// Fails with [`Error::OutOfRange`] if `value` does not fit the format.
pub fn encode_int(value: i128, format: IntFormat) -> Result<Vec<u8>> {
    let raw = encode_int_raw(value, format)?;
    Ok(raw[..format.byte_len()].to_vec())
}

/// Decode an integer from the start of `bytes`
///
/// Trailing bytes beyond the format width are ignored.
pub fn decode_int(bytes: &[u8], format: IntFormat) -> Result<i128> {
    let range = format.range()?;
    let bytes = bytes
        .get(..format.byte_len())
        .ok_or(Error::EndOfStream)?;
    Ok(range.from_pattern(pattern_from_bytes(bytes, format.endian)))
}

/// Encode a float into a freshly allocated byte vector
pub fn encode_float(value: f64, format: FloatFormat) -> Result<Vec<u8>> {
    let bits = float::encode_bits(value, format.width)?;
    encode_int(i128::from(bits), format.bits_format())
}

/// Decode a float from the start of `bytes`
pub fn decode_float(bytes: &[u8], format: FloatFormat) -> Result<f64> {
    format.layout()?;
    let bits = decode_int(bytes, format.bits_format())?;
    float::decode_bits(bits as u64, format.width)
}
