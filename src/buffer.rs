//! Growable byte buffer with exact-width integer and float codecs
//!
//! Every `write_*` call takes an optional offset: `None` appends, `Some(n)`
//! overwrites starting at `n`, zero-filling any gap between the current end
//! and `n`. Every `read_*` call without an offset reads at the internal cursor
//! and advances it; `read_*_at` variants leave the cursor alone.
//!
//! Failed operations never modify the buffer or the cursor.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::codec::{self, Endian, FloatFormat, IntFormat};
use crate::error::{Error, Result};
use crate::float::{self, FloatLayout};

/// Ordered, growable byte sequence with a sequential read cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteBuffer {
    data: Vec<u8>,
    cursor: usize,
}

macro_rules! int_accessors {
    ($($ty:ident: $width:literal, $signed:literal,
        $write:ident, $write_at:ident, $read:ident, $read_at:ident;)*) => {$(
        #[doc = concat!("Append a `", stringify!($ty), "` value")]
        #[inline]
        pub fn $write(&mut self, value: $ty, endian: Endian) -> Result<usize> {
            self.write_int(i128::from(value), IntFormat::new($width, $signed, endian), None)
        }

        #[doc = concat!("Write a `", stringify!($ty), "` value at `offset`")]
        #[inline]
        pub fn $write_at(&mut self, offset: usize, value: $ty, endian: Endian) -> Result<usize> {
            self.write_int(
                i128::from(value),
                IntFormat::new($width, $signed, endian),
                Some(offset),
            )
        }

        #[doc = concat!("Read a `", stringify!($ty), "` value at the cursor")]
        #[inline]
        pub fn $read(&mut self, endian: Endian) -> Result<$ty> {
            let value = self.read_int(None, IntFormat::new($width, $signed, endian))?;
            Ok(value as $ty)
        }

        #[doc = concat!("Read a `", stringify!($ty), "` value at `offset`")]
        #[inline]
        pub fn $read_at(&mut self, offset: usize, endian: Endian) -> Result<$ty> {
            let value = self.read_int(Some(offset), IntFormat::new($width, $signed, endian))?;
            Ok(value as $ty)
        }
    )*};
}

macro_rules! float_accessors {
    ($($name:literal: $width:literal,
        $write:ident, $write_at:ident, $read:ident, $read_at:ident;)*) => {$(
        #[doc = concat!("Append a ", $name, " precision float")]
        #[inline]
        pub fn $write(&mut self, value: f32, endian: Endian) -> Result<usize> {
            self.write_float(f64::from(value), FloatFormat::new($width, endian), None)
        }

        #[doc = concat!("Write a ", $name, " precision float at `offset`")]
        #[inline]
        pub fn $write_at(&mut self, offset: usize, value: f32, endian: Endian) -> Result<usize> {
            self.write_float(f64::from(value), FloatFormat::new($width, endian), Some(offset))
        }

        #[doc = concat!("Read a ", $name, " precision float at the cursor")]
        #[inline]
        pub fn $read(&mut self, endian: Endian) -> Result<f32> {
            Ok(self.read_float(None, FloatFormat::new($width, endian))? as f32)
        }

        #[doc = concat!("Read a ", $name, " precision float at `offset`")]
        #[inline]
        pub fn $read_at(&mut self, offset: usize, endian: Endian) -> Result<f32> {
            Ok(self.read_float(Some(offset), FloatFormat::new($width, endian))? as f32)
        }
    )*};
}

impl ByteBuffer {
    /// Create an empty buffer
    #[inline]
    pub const fn new() -> Self {
        Self {
            data: Vec::new(),
            cursor: 0,
        }
    }

    /// Create an empty buffer with room for `capacity` bytes
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            cursor: 0,
        }
    }

    /// Number of stored bytes
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the buffer holds no bytes
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow the stored bytes
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer, returning its bytes
    #[inline]
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Current read cursor
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Bytes between the cursor and the end
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.cursor)
    }

    /// Advance the cursor without decoding
    #[inline]
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.span(self.cursor, n)?;
        self.cursor += n;
        Ok(())
    }

    /// Bounds-checked `start..start + len`
    #[inline]
    fn span(&self, start: usize, len: usize) -> Result<core::ops::Range<usize>> {
        let end = start.checked_add(len).ok_or(Error::Overflow)?;
        if end > self.data.len() {
            return Err(Error::EndOfStream);
        }
        Ok(start..end)
    }

    /// Copy `bytes` to `offset` (append when `None`), growing and zero-filling
    /// as needed. Returns the offset written at.
    fn put(&mut self, offset: Option<usize>, bytes: &[u8]) -> Result<usize> {
        let start = offset.unwrap_or(self.data.len());
        let end = start.checked_add(bytes.len()).ok_or(Error::Overflow)?;

        if end > self.data.len() {
            self.data
                .try_reserve(end - self.data.len())
                .map_err(|_| Error::Overflow)?;
            self.data.resize(end, 0);
        }
        self.data[start..end].copy_from_slice(bytes);

        Ok(start)
    }

    /// Resolve an optional offset against the cursor and return the slice,
    /// advancing the cursor only for cursor reads
    fn take(&mut self, offset: Option<usize>, len: usize) -> Result<&[u8]> {
        let range = match offset {
            Some(offset) => self.span(offset, len)?,
            None => {
                let range = self.span(self.cursor, len)?;
                self.cursor = range.end;
                range
            }
        };
        Ok(&self.data[range])
    }

    /// Encode an integer of the given format
    ///
    /// The value is validated before any byte is touched: an out-of-range
    /// value fails with [`Error::OutOfRange`] and leaves the buffer unchanged.
    /// Returns the offset the value was written at.
    pub fn write_int(
        &mut self,
        value: i128,
        format: IntFormat,
        offset: Option<usize>,
    ) -> Result<usize> {
        let raw = codec::encode_int_raw(value, format)?;
        self.put(offset, &raw[..format.byte_len()])
    }

    /// Decode an integer of the given format
    ///
    /// Reads at the cursor (advancing it) when `offset` is `None`.
    pub fn read_int(&mut self, offset: Option<usize>, format: IntFormat) -> Result<i128> {
        let range = format.range()?;
        let bytes = self.take(offset, format.byte_len())?;
        Ok(range.from_pattern(codec::pattern_from_bytes(bytes, format.endian)))
    }

    /// Encode a 16, 32 or 64-bit float
    pub fn write_float(
        &mut self,
        value: f64,
        format: FloatFormat,
        offset: Option<usize>,
    ) -> Result<usize> {
        let bits = float::encode_bits(value, format.width)?;
        self.write_int(i128::from(bits), format.bits_format(), offset)
    }

    /// Decode a 16, 32 or 64-bit float
    pub fn read_float(&mut self, offset: Option<usize>, format: FloatFormat) -> Result<f64> {
        FloatLayout::for_width(format.width)?;
        let bits = self.read_int(offset, format.bits_format())?;
        float::decode_bits(bits as u64, format.width)
    }

    /// Append a `u8` value
    #[inline]
    pub fn write_u8(&mut self, value: u8) -> Result<usize> {
        self.write_int(i128::from(value), IntFormat::U8, None)
    }

    /// Write a `u8` value at `offset`
    #[inline]
    pub fn write_u8_at(&mut self, offset: usize, value: u8) -> Result<usize> {
        self.write_int(i128::from(value), IntFormat::U8, Some(offset))
    }

    /// Append an `i8` value
    #[inline]
    pub fn write_i8(&mut self, value: i8) -> Result<usize> {
        self.write_int(i128::from(value), IntFormat::I8, None)
    }

    /// Write an `i8` value at `offset`
    #[inline]
    pub fn write_i8_at(&mut self, offset: usize, value: i8) -> Result<usize> {
        self.write_int(i128::from(value), IntFormat::I8, Some(offset))
    }

    /// Read a `u8` value at the cursor
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_int(None, IntFormat::U8)? as u8)
    }

    /// Read a `u8` value at `offset`
    #[inline]
    pub fn read_u8_at(&mut self, offset: usize) -> Result<u8> {
        Ok(self.read_int(Some(offset), IntFormat::U8)? as u8)
    }

    /// Read an `i8` value at the cursor
    #[inline]
    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_int(None, IntFormat::I8)? as i8)
    }

    /// Read an `i8` value at `offset`
    #[inline]
    pub fn read_i8_at(&mut self, offset: usize) -> Result<i8> {
        Ok(self.read_int(Some(offset), IntFormat::I8)? as i8)
    }

    int_accessors! {
        u16: 16, false, write_u16, write_u16_at, read_u16, read_u16_at;
        i16: 16, true, write_i16, write_i16_at, read_i16, read_i16_at;
        u32: 32, false, write_u32, write_u32_at, read_u32, read_u32_at;
        i32: 32, true, write_i32, write_i32_at, read_i32, read_i32_at;
        u64: 64, false, write_u64, write_u64_at, read_u64, read_u64_at;
        i64: 64, true, write_i64, write_i64_at, read_i64, read_i64_at;
    }

    float_accessors! {
        "half": 16, write_f16, write_f16_at, read_f16, read_f16_at;
        "single": 32, write_f32, write_f32_at, read_f32, read_f32_at;
    }

    /// Append a double precision float
    #[inline]
    pub fn write_f64(&mut self, value: f64, endian: Endian) -> Result<usize> {
        self.write_float(value, FloatFormat::new(64, endian), None)
    }

    /// Write a double precision float at `offset`
    #[inline]
    pub fn write_f64_at(&mut self, offset: usize, value: f64, endian: Endian) -> Result<usize> {
        self.write_float(value, FloatFormat::new(64, endian), Some(offset))
    }

    /// Read a double precision float at the cursor
    #[inline]
    pub fn read_f64(&mut self, endian: Endian) -> Result<f64> {
        self.read_float(None, FloatFormat::new(64, endian))
    }

    /// Read a double precision float at `offset`
    #[inline]
    pub fn read_f64_at(&mut self, offset: usize, endian: Endian) -> Result<f64> {
        self.read_float(Some(offset), FloatFormat::new(64, endian))
    }

    /// Write raw bytes (append when `offset` is `None`)
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8], offset: Option<usize>) -> Result<usize> {
        self.put(offset, bytes)
    }

    /// Write the UTF-8 encoding of `text`
    #[inline]
    pub fn write_str(&mut self, text: &str, offset: Option<usize>) -> Result<usize> {
        self.put(offset, text.as_bytes())
    }

    /// Read `len` raw bytes at the cursor
    ///
    /// Fails with [`Error::EndOfStream`] rather than returning a short slice.
    #[inline]
    pub fn read_bytes(&mut self, len: usize) -> Result<&[u8]> {
        self.take(None, len)
    }

    /// Read `len` raw bytes at `offset`
    #[inline]
    pub fn read_bytes_at(&self, offset: usize, len: usize) -> Result<&[u8]> {
        let range = self.span(offset, len)?;
        Ok(&self.data[range])
    }

    /// Insert `bytes` before `offset`, shifting the tail right
    ///
    /// Offsets past the end append. The cursor is not adjusted.
    pub fn insert(&mut self, offset: usize, bytes: &[u8]) -> &mut Self {
        let at = offset.min(self.data.len());
        self.data.splice(at..at, bytes.iter().copied());
        self
    }

    /// Remove up to `length` bytes starting at `offset`, shifting the tail left
    ///
    /// The removed span is clipped to the buffer; offsets past the end are a
    /// no-op. The cursor is not adjusted.
    pub fn delete(&mut self, offset: usize, length: usize) -> &mut Self {
        let start = offset.min(self.data.len());
        let end = start.saturating_add(length).min(self.data.len());
        self.data.drain(start..end);
        self
    }

    /// Interpret the whole buffer as UTF-8 text
    #[inline]
    pub fn as_str(&self) -> Result<&str> {
        core::str::from_utf8(&self.data).map_err(|_| Error::InvalidUtf8)
    }

    /// Lowercase hex dump, two digits per byte
    #[inline]
    pub fn to_hex(&self) -> String {
        alloc::format!("{self:x}")
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(data: Vec<u8>) -> Self {
        Self { data, cursor: 0 }
    }
}

impl From<&[u8]> for ByteBuffer {
    fn from(data: &[u8]) -> Self {
        Self::from(data.to_vec())
    }
}

impl FromIterator<u8> for ByteBuffer {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<u8>>())
    }
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::LowerHex for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.data {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::UpperHex for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.data {
            write!(f, "{byte:02X}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_write_appends_by_default() {
        let mut buf = ByteBuffer::new();
        assert_eq!(buf.write_u16(0x1234, Endian::Big).unwrap(), 0);
        assert_eq!(buf.write_u16(0x1234, Endian::Little).unwrap(), 2);
        assert_eq!(buf.as_slice(), &[0x12, 0x34, 0x34, 0x12]);
    }

    #[test]
    fn test_write_at_overwrites_and_extends() {
        let mut buf = ByteBuffer::from(vec![1, 2, 3]);
        buf.write_u32_at(2, 0xAABBCCDD, Endian::Big).unwrap();
        assert_eq!(buf.as_slice(), &[1, 2, 0xAA, 0xBB, 0xCC, 0xDD]);

        buf.write_u8_at(0, 9).unwrap();
        assert_eq!(buf.as_slice(), &[9, 2, 0xAA, 0xBB, 0xCC, 0xDD]);
    }

    #[test]
    fn test_write_past_end_zero_fills() {
        let mut buf = ByteBuffer::from(vec![1]);
        assert_eq!(buf.write_u16_at(4, 0xFFEE, Endian::Big).unwrap(), 4);
        assert_eq!(buf.as_slice(), &[1, 0, 0, 0, 0xFF, 0xEE]);
    }

    #[test]
    fn test_failed_write_is_atomic() {
        let mut buf = ByteBuffer::from(vec![7, 7]);
        let before = buf.clone();

        assert!(buf.write_int(256, IntFormat::U8, None).is_err());
        assert!(buf.write_int(-129, IntFormat::I8, Some(10)).is_err());
        assert_eq!(
            buf.write_int(1, IntFormat::unsigned(20), None),
            Err(Error::InvalidWidth(20))
        );
        assert_eq!(buf, before);
    }

    #[test]
    fn test_sequential_cursor() {
        let mut buf = ByteBuffer::from(vec![0x00, 0x01, 0x00, 0x02]);
        assert_eq!(buf.read_u16(Endian::Big).unwrap(), 1);
        assert_eq!(buf.cursor(), 2);
        assert_eq!(buf.read_u16(Endian::Big).unwrap(), 2);
        assert_eq!(buf.cursor(), 4);
        assert_eq!(buf.read_u8(), Err(Error::EndOfStream));
        assert_eq!(buf.cursor(), 4);
    }

    #[test]
    fn test_offset_reads_keep_cursor() {
        let mut buf = ByteBuffer::from(vec![0xFF, 0x80, 0x00, 0x01]);
        assert_eq!(buf.read_i8_at(0).unwrap(), -1);
        assert_eq!(buf.read_i16_at(1, Endian::Big).unwrap(), -32768);
        assert_eq!(buf.read_u16_at(2, Endian::Little).unwrap(), 0x0100);
        assert_eq!(buf.cursor(), 0);

        // Offset zero is a real offset, not "use the cursor"
        buf.skip(2).unwrap();
        assert_eq!(buf.read_u8_at(0).unwrap(), 0xFF);
        assert_eq!(buf.cursor(), 2);
    }

    #[test]
    fn test_read_past_end() {
        let mut buf = ByteBuffer::from(vec![1, 2, 3]);
        assert_eq!(buf.read_u32(Endian::Big), Err(Error::EndOfStream));
        assert_eq!(buf.read_u16_at(2, Endian::Big), Err(Error::EndOfStream));
        assert_eq!(buf.read_u8_at(usize::MAX), Err(Error::Overflow));
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn test_write_at_unallocatable_offset() {
        let mut buf = ByteBuffer::from(vec![1, 2, 3]);
        assert_eq!(buf.write_u8_at(usize::MAX - 1, 0), Err(Error::Overflow));
        assert_eq!(
            buf.write_u16_at(isize::MAX as usize, 1, Endian::Big),
            Err(Error::Overflow)
        );
        assert_eq!(buf.write_bytes(&[], Some(usize::MAX)), Err(Error::Overflow));
        assert_eq!(buf.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_signed_wrappers() {
        let mut buf = ByteBuffer::new();
        buf.write_i8(-1).unwrap();
        buf.write_i16(-2, Endian::Little).unwrap();
        buf.write_i32(i32::MIN, Endian::Big).unwrap();
        buf.write_i64(-3, Endian::Little).unwrap();

        assert_eq!(buf.read_i8().unwrap(), -1);
        assert_eq!(buf.read_i16(Endian::Little).unwrap(), -2);
        assert_eq!(buf.read_i32(Endian::Big).unwrap(), i32::MIN);
        assert_eq!(buf.read_i64(Endian::Little).unwrap(), -3);
        assert_eq!(buf.remaining(), 0);
    }

    #[test]
    fn test_unsigned_64bit() {
        let mut buf = ByteBuffer::new();
        buf.write_u64(u64::MAX - 1, Endian::Big).unwrap();
        assert_eq!(buf.read_u64(Endian::Big).unwrap(), u64::MAX - 1);
        assert_eq!(buf.read_i64_at(0, Endian::Big).unwrap(), -2);
    }

    #[test]
    fn test_float_roundtrips() {
        let mut buf = ByteBuffer::new();
        let at = buf.write_f32(1.5, Endian::Big).unwrap();
        assert_eq!(buf.read_f32_at(at, Endian::Big).unwrap(), 1.5);
        assert_eq!(buf.as_slice(), &[0x3F, 0xC0, 0x00, 0x00]);

        let at = buf.write_f64(0.1, Endian::Little).unwrap();
        assert_eq!(buf.read_f64_at(at, Endian::Little).unwrap(), 0.1);

        let at = buf.write_f16(-2.5, Endian::Big).unwrap();
        assert_eq!(buf.read_bytes_at(at, 2).unwrap(), &[0xC1, 0x00]);
        assert_eq!(buf.read_f16_at(at, Endian::Big).unwrap(), -2.5);
    }

    #[test]
    fn test_float_width_checked_before_read() {
        let mut buf = ByteBuffer::from(vec![0; 8]);
        assert_eq!(
            buf.read_float(None, FloatFormat::new(24, Endian::Big)),
            Err(Error::UnsupportedFloatWidth(24))
        );
        assert_eq!(buf.cursor(), 0);
        assert_eq!(
            buf.write_float(1.0, FloatFormat::new(8, Endian::Big), None),
            Err(Error::UnsupportedFloatWidth(8))
        );
        assert_eq!(buf.len(), 8);
    }

    #[test]
    fn test_insert_and_delete() {
        let mut buf = ByteBuffer::from(vec![1, 2, 3, 4]);
        buf.insert(2, &[9, 9]);
        assert_eq!(buf.as_slice(), &[1, 2, 9, 9, 3, 4]);

        let mut buf = ByteBuffer::from(vec![1, 2, 3, 4]);
        buf.delete(1, 2);
        assert_eq!(buf.as_slice(), &[1, 4]);
    }

    #[test]
    fn test_edits_out_of_range() {
        let mut buf = ByteBuffer::from(vec![1, 2]);
        buf.insert(10, &[3]);
        assert_eq!(buf.as_slice(), &[1, 2, 3]);

        buf.delete(1, usize::MAX);
        assert_eq!(buf.as_slice(), &[1]);

        buf.delete(5, 1);
        assert_eq!(buf.as_slice(), &[1]);
    }

    #[test]
    fn test_raw_bytes_and_text() {
        let mut buf = ByteBuffer::new();
        buf.write_str("hello", None).unwrap();
        buf.write_bytes(b" world", None).unwrap();
        assert_eq!(buf.as_str().unwrap(), "hello world");

        assert_eq!(buf.read_bytes(5).unwrap(), b"hello");
        assert_eq!(buf.cursor(), 5);
        assert_eq!(buf.read_bytes(100), Err(Error::EndOfStream));
        assert_eq!(buf.cursor(), 5);

        buf.write_u8(0xFF).unwrap();
        assert_eq!(buf.as_str(), Err(Error::InvalidUtf8));
    }

    #[test]
    fn test_skip() {
        let mut buf = ByteBuffer::from(vec![1, 2, 3]);
        buf.skip(2).unwrap();
        assert_eq!(buf.read_u8().unwrap(), 3);
        assert_eq!(buf.skip(1), Err(Error::EndOfStream));
    }

    #[test]
    fn test_hex() {
        let buf: ByteBuffer = [0x00u8, 0xAB, 0x10].into_iter().collect();
        assert_eq!(buf.to_hex(), "00ab10");
        assert_eq!(alloc::format!("{buf:X}"), "00AB10");
    }
}
