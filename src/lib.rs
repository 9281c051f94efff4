#![forbid(unsafe_code)]
//! LEB128 (Little Endian Base 128) codec for safe integers.
//!
//! Every encoded byte carries 7 payload bits, least-significant group first,
//! and a continuation flag in bit 7 that is clear only on the final byte.
//! Values are restricted to the range `-(2^53 - 1)..=2^53 - 1`.
//!
//! - [`UnsignedLeb128`] encodes non-negative values and owns the boundary scanner.
//! - [`SignedLeb128`] encodes negative values as a bit-width-aligned bias on top
//!   of [`UnsignedLeb128`].
//! - [`Leb128`] picks one of the two by sign.
//!
//! The wire format does not record the sign: a decoder must be told whether
//! a position holds a signed or an unsigned varint.
//!
//! ```
//! use lebcodec::Leb128;
//!
//! let encoded = Leb128::encode(-5)?;
//! assert_eq!(Leb128::decode(&encoded, 0, true)?, -5);
//!
//! let encoded = Leb128::encode(300)?;
//! assert_eq!(encoded, [0xAC, 0x02]);
//! assert_eq!(Leb128::decode(&encoded, 0, false)?, 300);
//! # Ok::<(), lebcodec::LebError>(())
//! ```

use std::fmt;

use thiserror::Error;

mod signed;
mod stream;
mod unsigned;

pub use signed::SignedLeb128;
pub use stream::{VarintReader, VarintWriter};
pub use unsigned::UnsignedLeb128;

/// Largest magnitude accepted by the codec (`2^53 - 1`).
pub const MAX_SAFE_INTEGER: i64 = (1 << 53) - 1;

/// Longest varint produced for any safe integer, signed or unsigned.
pub const MAX_ENCODED_LEN: usize = 8;

pub(crate) const PAYLOAD_MASK: u8 = 0b0111_1111;
pub(crate) const CONTINUATION_BIT: u8 = 0b1000_0000;
pub(crate) const PAYLOAD_BITS: u32 = 7;

/// Which encoder domain a value was expected to fall in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// Zero or positive.
    NonNegative,
    /// Strictly negative.
    Negative,
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sign::NonNegative => f.write_str("non-negative"),
            Sign::Negative => f.write_str("negative"),
        }
    }
}

/// Errors emitted by the LEB128 codecs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LebError {
    #[error("{0} is not a safe integer")]
    InvalidInput(String),
    #[error("expected a {expected} value, got {value}")]
    SignMismatch { value: i64, expected: Sign },
    #[error("offset {offset} is out of bounds for a buffer of {len} bytes")]
    BufferBounds { offset: usize, len: usize },
    #[error("no terminating byte found scanning from offset {offset} to the end of a {len} byte buffer")]
    UnterminatedSequence { offset: usize, len: usize },
    #[error("varint at offset {offset} exceeds the safe integer range")]
    Overflow { offset: usize },
}

pub type Result<T> = std::result::Result<T, LebError>;

/// Returns `true` when `value` fits in `-(2^53 - 1)..=2^53 - 1`.
pub fn is_safe_integer(value: i64) -> bool {
    (-MAX_SAFE_INTEGER..=MAX_SAFE_INTEGER).contains(&value)
}

pub(crate) fn check_safe(value: i64) -> Result<()> {
    if is_safe_integer(value) {
        Ok(())
    } else {
        Err(LebError::InvalidInput(value.to_string()))
    }
}

/// Converts a float into a safe integer, rejecting NaN, infinities,
/// fractional values and magnitudes above [`MAX_SAFE_INTEGER`].
pub fn safe_integer_from_f64(value: f64) -> Result<i64> {
    if !value.is_finite() || value.fract() != 0.0 || value.abs() > MAX_SAFE_INTEGER as f64 {
        return Err(LebError::InvalidInput(value.to_string()));
    }
    Ok(value as i64)
}

/// Parses a decimal integer, rejecting anything that is not a safe integer.
pub fn parse_safe_integer(text: &str) -> Result<i64> {
    let trimmed = text.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| LebError::InvalidInput(format!("{trimmed:?}")))?;
    check_safe(value)?;
    Ok(value)
}

/// Sign-dispatching facade over [`UnsignedLeb128`] and [`SignedLeb128`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Leb128;

impl Leb128 {
    /// Encode with the unsigned scheme when `value >= 0`, the signed one otherwise.
    pub fn encode(value: i64) -> Result<Vec<u8>> {
        if value >= 0 {
            UnsignedLeb128::encode(value)
        } else {
            SignedLeb128::encode(value)
        }
    }

    /// Validate a float as a safe integer, then [`Leb128::encode`] it.
    pub fn encode_f64(value: f64) -> Result<Vec<u8>> {
        Self::encode(safe_integer_from_f64(value)?)
    }

    /// Decode the varint at `offset`. `signed` must match how it was encoded.
    pub fn decode(buf: &[u8], offset: usize, signed: bool) -> Result<i64> {
        if signed {
            SignedLeb128::decode(buf, offset)
        } else {
            // Unsigned decode never exceeds MAX_SAFE_INTEGER.
            UnsignedLeb128::decode(buf, offset).map(|value| value as i64)
        }
    }

    /// Byte count of the varint at `offset`; identical for both schemes.
    pub fn get_length(buf: &[u8], offset: usize) -> Result<usize> {
        UnsignedLeb128::get_length(buf, offset)
    }
}
