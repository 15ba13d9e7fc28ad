//! Error types for the bitwire codec

use thiserror::Error;

/// Errors that can occur while encoding, decoding or reading bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Value is not representable in the requested width/signedness
    #[error("value {value} out of range, must be between {min} and {max}")]
    OutOfRange {
        /// Rejected value
        value: i128,
        /// Smallest representable value
        min: i128,
        /// Largest representable value
        max: i128,
    },
    /// Integer width is zero, not a multiple of 8, or wider than 64 bits
    #[error("invalid integer width {0}, must be a multiple of 8 between 8 and 64")]
    InvalidWidth(u32),
    /// Float width other than 16, 32 or 64
    #[error("unsupported float width {0}, must be 16, 32 or 64")]
    UnsupportedFloatWidth(u32),
    /// Read requested beyond the available data
    #[error("unexpected end of stream")]
    EndOfStream,
    /// More bits requested in a single read than supported
    #[error("cannot read {0} bits at once, at most 32")]
    TooManyBits(u32),
    /// Exponential-Golomb prefix too long for a 32-bit value
    #[error("exp-golomb codeword with {0} leading zeros does not fit in 32 bits")]
    CodewordTooLong(u32),
    /// Integer overflow in offset calculations
    #[error("integer overflow in offset calculation")]
    Overflow,
    /// Buffer contents are not valid UTF-8
    #[error("buffer contents are not valid utf-8")]
    InvalidUtf8,
}

/// Coarse classification of [`Error`] values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Value outside the representable range
    Range,
    /// Malformed request: bad width, bad encoding
    Format,
    /// Read past the end of the data
    EndOfStream,
}

impl Error {
    /// Returns the category this error belongs to
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Error::OutOfRange { .. } | Error::Overflow => ErrorKind::Range,
            Error::InvalidWidth(_)
            | Error::UnsupportedFloatWidth(_)
            | Error::TooManyBits(_)
            | Error::CodewordTooLong(_)
            | Error::InvalidUtf8 => ErrorKind::Format,
            Error::EndOfStream => ErrorKind::EndOfStream,
        }
    }
}

/// Result type alias for bitwire operations
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_error_kinds() {
        let range = Error::OutOfRange {
            value: 256,
            min: 0,
            max: 255,
        };
        assert_eq!(range.kind(), ErrorKind::Range);
        assert_eq!(Error::InvalidWidth(12).kind(), ErrorKind::Format);
        assert_eq!(Error::UnsupportedFloatWidth(24).kind(), ErrorKind::Format);
        assert_eq!(Error::EndOfStream.kind(), ErrorKind::EndOfStream);
    }

    #[test]
    fn test_error_display() {
        let err = Error::OutOfRange {
            value: -129,
            min: -128,
            max: 127,
        };
        assert_eq!(
            err.to_string(),
            "value -129 out of range, must be between -128 and 127"
        );
        assert_eq!(Error::EndOfStream.to_string(), "unexpected end of stream");
    }
}
