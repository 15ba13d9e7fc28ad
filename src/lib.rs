//! bitwire: bit-precision binary codec primitives
//!
//! This crate provides the building blocks binary formats are parsed from and
//! emitted with: exact-width integer and float encoding with selectable byte
//! order, and a forward-only bit reader with exponential-Golomb decoding.
//!
//! # Wire Layout
//!
//! ```text
//! integer  : width/8 bytes, two's complement when signed, big-endian default
//! float    : sign(1) | biased exponent | mantissa     (16 / 32 / 64 bits)
//!            exponent width 5 / 8 / 11, bias 2^(e-1) - 1
//! exp-golomb: k zeros | 1 | k info bits   ->  2^k + info - 1
//! ```
//!
//! # Features
//!
//! - Validate-before-mutate writes: a rejected value never touches the buffer
//! - Offset writes past the end zero-fill the gap
//! - Native bit reinterpretation for 32/64-bit floats, manual assembly for half
//! - Bounded bit scanning, every overrun is an [`Error::EndOfStream`]
//! - `no_std` support with `alloc`
//!
//! # Example
//!
//! ```rust
//! use bitwire::{BitReader, ByteBuffer, Endian};
//!
//! let mut buf = ByteBuffer::new();
//! buf.write_u16(0x1234, Endian::Big)?;
//! buf.write_i32(-2, Endian::Little)?;
//! buf.write_f32(1.5, Endian::Big)?;
//!
//! assert_eq!(&buf.as_slice()[..2], &[0x12, 0x34]);
//! assert_eq!(buf.read_u16(Endian::Big)?, 0x1234);
//! assert_eq!(buf.read_i32(Endian::Little)?, -2);
//! assert_eq!(buf.read_f32(Endian::Big)?, 1.5);
//!
//! // 1 010 011 -> 0, 1, 2
//! let mut bits = BitReader::new(&[0b1010_0110]);
//! assert_eq!(bits.read_exp_golomb()?, 0);
//! assert_eq!(bits.read_exp_golomb()?, 1);
//! assert_eq!(bits.read_exp_golomb()?, 2);
//! # Ok::<(), bitwire::Error>(())
//! ```

#![no_std]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod bit_reader;
pub mod buffer;
pub mod codec;
pub mod error;
pub mod float;
pub mod range;

// Re-export main types
pub use bit_reader::BitReader;
pub use buffer::ByteBuffer;
pub use codec::{decode_float, decode_int, encode_float, encode_int};
pub use codec::{Endian, FloatFormat, IntFormat};
pub use error::{Error, ErrorKind, Result};
pub use float::FloatLayout;
pub use range::BitRange;

/// Widest exact integer supported by the codec, in bits
pub const MAX_INT_WIDTH: u32 = 64;

/// Widest single read supported by [`BitReader::read_bits`], in bits
pub const MAX_READ_BITS: u32 = 32;
