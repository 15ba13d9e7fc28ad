//! IEEE-754 style field layouts and manual float assembly
//!
//! Single and double precision go through the native bit patterns. Half
//! precision has no native type, so it is assembled by hand from the binary
//! expansion `1.m × 2^e` of the input: the leading 1 is implicit, the next
//! `mantissa_bits` bits are kept and the following bit rounds the result to
//! nearest (ties away from zero). The rounding carry is added to the packed
//! fields, so a mantissa overflow moves into the exponent.
//!
//! The 32-bit path narrows an `f64` with a native `as f32` cast, which rounds
//! ties to even. Only the half precision assembler rounds ties away from zero.

use crate::error::{Error, Result};

/// Fraction bits of an `f64`
const F64_FRACTION_BITS: u32 = 52;

/// Exponent bias of an `f64`
const F64_BIAS: i32 = 1023;

/// Fraction field mask of an `f64`
const F64_FRACTION_MASK: u64 = (1 << F64_FRACTION_BITS) - 1;

/// Bit layout of a binary floating-point format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloatLayout {
    /// Total width in bits
    pub width: u32,
    /// Width of the biased exponent field
    pub exponent_bits: u32,
    /// Width of the stored mantissa (without the implicit leading 1)
    pub mantissa_bits: u32,
    /// Exponent bias, `2^(exponent_bits - 1) - 1`
    pub bias: i32,
}

impl FloatLayout {
    /// IEEE half precision (1 + 5 + 10)
    pub const HALF: Self = Self::from_exponent_bits(16, 5);

    /// IEEE single precision (1 + 8 + 23)
    pub const SINGLE: Self = Self::from_exponent_bits(32, 8);

    /// IEEE double precision (1 + 11 + 52)
    pub const DOUBLE: Self = Self::from_exponent_bits(64, 11);

    const fn from_exponent_bits(width: u32, exponent_bits: u32) -> Self {
        Self {
            width,
            exponent_bits,
            mantissa_bits: width - 1 - exponent_bits,
            bias: (1 << (exponent_bits - 1)) - 1,
        }
    }

    /// Layout for a total width of 16, 32 or 64 bits
    #[inline]
    pub const fn for_width(width: u32) -> Result<Self> {
        match width {
            16 => Ok(Self::HALF),
            32 => Ok(Self::SINGLE),
            64 => Ok(Self::DOUBLE),
            _ => Err(Error::UnsupportedFloatWidth(width)),
        }
    }

    /// All-ones exponent field, reserved for infinities and NaN
    #[inline]
    const fn max_exponent(&self) -> u64 {
        (1 << self.exponent_bits) - 1
    }

    #[inline]
    const fn mantissa_mask(&self) -> u64 {
        (1 << self.mantissa_bits) - 1
    }

    #[inline]
    const fn sign_shift(&self) -> u32 {
        self.width - 1
    }
}

/// Assemble the bit pattern of `value` in the given layout
pub fn pack(value: f64, layout: &FloatLayout) -> u64 {
    let sign = u64::from(value.is_sign_negative()) << layout.sign_shift();
    let infinity = layout.max_exponent() << layout.mantissa_bits;

    if value.is_nan() {
        return sign | infinity | (1 << (layout.mantissa_bits - 1));
    }
    if value.is_infinite() {
        return sign | infinity;
    }
    if value == 0.0 {
        return sign;
    }

    let (exponent, significand) = decompose(value);
    let biased = exponent + layout.bias;

    if biased >= layout.max_exponent() as i32 {
        return sign | infinity;
    }

    let dropped = F64_FRACTION_BITS - layout.mantissa_bits;

    if biased <= 0 {
        // Subnormal: no implicit bit, exponent pinned at 1 - bias.
        let shift = dropped + (1 - biased) as u32;
        return sign | round_shift(significand, shift);
    }

    let mantissa = round_shift(significand & F64_FRACTION_MASK, dropped);
    sign | (((biased as u64) << layout.mantissa_bits) + mantissa)
}

/// Reconstruct the value stored in `bits` under the given layout
pub fn unpack(bits: u64, layout: &FloatLayout) -> f64 {
    let negative = (bits >> layout.sign_shift()) & 1 == 1;
    let biased = (bits >> layout.mantissa_bits) & layout.max_exponent();
    let mantissa = bits & layout.mantissa_mask();
    let mantissa_bits = layout.mantissa_bits as i32;

    let magnitude = if biased == layout.max_exponent() {
        if mantissa == 0 {
            f64::INFINITY
        } else {
            f64::NAN
        }
    } else if biased == 0 {
        mantissa as f64 * exp2i(1 - layout.bias - mantissa_bits)
    } else {
        let significand = (1u64 << layout.mantissa_bits) | mantissa;
        significand as f64 * exp2i(biased as i32 - layout.bias - mantissa_bits)
    };

    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Encode `value` as the raw pattern of a 16, 32 or 64-bit float
#[inline]
pub fn encode_bits(value: f64, width: u32) -> Result<u64> {
    match width {
        16 => Ok(pack(value, &FloatLayout::HALF)),
        32 => Ok(u64::from((value as f32).to_bits())),
        64 => Ok(value.to_bits()),
        _ => Err(Error::UnsupportedFloatWidth(width)),
    }
}

/// Decode the raw pattern of a 16, 32 or 64-bit float
#[inline]
pub fn decode_bits(bits: u64, width: u32) -> Result<f64> {
    match width {
        16 => Ok(unpack(bits, &FloatLayout::HALF)),
        32 => Ok(f64::from(f32::from_bits(bits as u32))),
        64 => Ok(f64::from_bits(bits)),
        _ => Err(Error::UnsupportedFloatWidth(width)),
    }
}

/// Split a finite non-zero value into `(exponent, significand)` with
/// `|value| == significand × 2^(exponent - 52)` and bit 52 of the significand set
fn decompose(value: f64) -> (i32, u64) {
    let bits = value.to_bits() & !(1 << 63);
    let exponent_field = (bits >> F64_FRACTION_BITS) as i32;
    let fraction = bits & F64_FRACTION_MASK;

    if exponent_field == 0 {
        let shift = fraction.leading_zeros() - (63 - F64_FRACTION_BITS);
        (1 - F64_BIAS - shift as i32, fraction << shift)
    } else {
        (
            exponent_field - F64_BIAS,
            fraction | (1 << F64_FRACTION_BITS),
        )
    }
}

/// Shift right by `shift` bits, rounding on the last bit shifted out
#[inline]
fn round_shift(value: u64, shift: u32) -> u64 {
    match shift {
        0 => value,
        1..=64 => ((value >> (shift - 1)) + 1) >> 1,
        _ => 0,
    }
}

/// Exact power of two as an `f64`
fn exp2i(exponent: i32) -> f64 {
    if exponent > F64_BIAS {
        f64::INFINITY
    } else if exponent >= 1 - F64_BIAS {
        f64::from_bits(((exponent + F64_BIAS) as u64) << F64_FRACTION_BITS)
    } else if exponent >= 1 - F64_BIAS - F64_FRACTION_BITS as i32 {
        f64::from_bits(1 << (exponent - (1 - F64_BIAS - F64_FRACTION_BITS as i32)))
    } else {
        0.0
    }
}
