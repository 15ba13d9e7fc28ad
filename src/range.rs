//! Representable ranges of exact-width integers
//!
//! A [`BitRange`] is recomputed for every integer encode/decode; it carries the
//! bounds used for validation and the modulus used for two's-complement
//! conversion.

use crate::error::{Error, Result};
use crate::MAX_INT_WIDTH;

/// Bounds of an integer of a given width and signedness
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitRange {
    /// Smallest representable value
    pub min: i128,
    /// Largest representable value
    pub max: i128,
    /// 2^width
    pub modulus: i128,
}

impl BitRange {
    /// Compute the range for `width` bits
    ///
    /// Fails with [`Error::InvalidWidth`] unless `width` is a non-zero multiple
    /// of 8 no larger than [`MAX_INT_WIDTH`].
    #[inline]
    pub const fn new(width: u32, signed: bool) -> Result<Self> {
        if width == 0 || width % 8 != 0 || width > MAX_INT_WIDTH {
            return Err(Error::InvalidWidth(width));
        }

        let modulus = 1i128 << width;
        let range = if signed {
            let half = 1i128 << (width - 1);
            Self {
                min: -half,
                max: half - 1,
                modulus,
            }
        } else {
            Self {
                min: 0,
                max: modulus - 1,
                modulus,
            }
        };

        Ok(range)
    }

    /// Check whether `value` lies within `[min, max]`
    #[inline]
    pub const fn contains(&self, value: i128) -> bool {
        value >= self.min && value <= self.max
    }

    /// Validate `value`, returning it unchanged on success
    #[inline]
    pub const fn check(&self, value: i128) -> Result<i128> {
        if self.contains(value) {
            Ok(value)
        } else {
            Err(Error::OutOfRange {
                value,
                min: self.min,
                max: self.max,
            })
        }
    }

    /// Two's-complement bit pattern of an in-range value
    #[inline]
    pub const fn to_pattern(&self, value: i128) -> u64 {
        value.rem_euclid(self.modulus) as u64
    }

    /// Interpret a raw pattern, mapping the upper half to negatives when signed
    #[inline]
    pub const fn from_pattern(&self, pattern: u64) -> i128 {
        let magnitude = pattern as i128;
        if magnitude > self.max {
            magnitude - self.modulus
        } else {
            magnitude
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsigned_ranges() {
        let r8 = BitRange::new(8, false).unwrap();
        assert_eq!((r8.min, r8.max, r8.modulus), (0, 255, 256));

        let r64 = BitRange::new(64, false).unwrap();
        assert_eq!(r64.max, u64::MAX as i128);
        assert_eq!(r64.modulus, 1i128 << 64);
    }

    #[test]
    fn test_signed_ranges() {
        let r8 = BitRange::new(8, true).unwrap();
        assert_eq!((r8.min, r8.max), (-128, 127));

        let r32 = BitRange::new(32, true).unwrap();
        assert_eq!((r32.min, r32.max), (i32::MIN as i128, i32::MAX as i128));

        let r64 = BitRange::new(64, true).unwrap();
        assert_eq!((r64.min, r64.max), (i64::MIN as i128, i64::MAX as i128));
    }

    #[test]
    fn test_invalid_widths() {
        assert_eq!(BitRange::new(0, false), Err(Error::InvalidWidth(0)));
        assert_eq!(BitRange::new(12, true), Err(Error::InvalidWidth(12)));
        assert_eq!(BitRange::new(72, false), Err(Error::InvalidWidth(72)));
    }

    #[test]
    fn test_check() {
        let r = BitRange::new(8, true).unwrap();
        assert_eq!(r.check(-128), Ok(-128));
        assert_eq!(
            r.check(-129),
            Err(Error::OutOfRange {
                value: -129,
                min: -128,
                max: 127
            })
        );
        assert!(!r.contains(128));
    }

    #[test]
    fn test_twos_complement_patterns() {
        let r16 = BitRange::new(16, true).unwrap();
        assert_eq!(r16.to_pattern(-1), 0xFFFF);
        assert_eq!(r16.to_pattern(-32768), 0x8000);
        assert_eq!(r16.from_pattern(0xFFFF), -1);
        assert_eq!(r16.from_pattern(0x7FFF), 32767);

        let u16r = BitRange::new(16, false).unwrap();
        assert_eq!(u16r.from_pattern(0xFFFF), 65535);

        let r64 = BitRange::new(64, true).unwrap();
        assert_eq!(r64.to_pattern(i64::MIN as i128), 0x8000_0000_0000_0000);
        assert_eq!(r64.from_pattern(u64::MAX), -1);
    }
}
