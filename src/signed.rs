use tracing::trace;

use crate::unsigned::{decode_raw, encode_padded};
use crate::{check_safe, LebError, Result, Sign, MAX_ENCODED_LEN, MAX_SAFE_INTEGER, PAYLOAD_BITS};

/// Signed LEB128 codec for strictly negative values.
///
/// A value `-m` is stored as the biased magnitude `2^b - m`, where `b` is
/// `ceil(log2(m))` rounded up to a whole number of 7-bit groups (at least
/// one). The biased magnitude is written through [`crate::UnsignedLeb128`]'s
/// byte layout padded to exactly `b / 7` bytes, so the decoder recovers `b`
/// from the byte count instead of from the magnitude itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignedLeb128;

impl SignedLeb128 {
    /// Encode a strictly negative safe integer.
    pub fn encode(value: i64) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(MAX_ENCODED_LEN);
        Self::encode_into(value, &mut out)?;
        Ok(out)
    }

    /// Append the encoding of `value` to `out`, returning the number of bytes written.
    pub fn encode_into(value: i64, out: &mut Vec<u8>) -> Result<usize> {
        check_safe(value)?;
        if value >= 0 {
            return Err(LebError::SignMismatch {
                value,
                expected: Sign::Negative,
            });
        }
        let magnitude = value.unsigned_abs();
        let width = aligned_width(magnitude);
        let biased = (1u64 << width) - magnitude;
        let len = (width / PAYLOAD_BITS) as usize;
        encode_padded(biased, len, out);
        Ok(len)
    }

    /// Number of bytes [`SignedLeb128::encode`] produces for the negative `value`.
    pub fn encoded_len(value: i64) -> usize {
        (aligned_width(value.unsigned_abs()) / PAYLOAD_BITS) as usize
    }

    /// Decode the signed varint starting at `offset`.
    pub fn decode(buf: &[u8], offset: usize) -> Result<i64> {
        Self::decode_with_len(buf, offset).map(|(value, _)| value)
    }

    /// Decode the signed varint starting at `offset`, also returning how many bytes it spans.
    pub fn decode_with_len(buf: &[u8], offset: usize) -> Result<(i64, usize)> {
        let (biased, len) = decode_raw(buf, offset)?;
        if len > MAX_ENCODED_LEN {
            trace!(offset, len, "signed varint wider than any safe integer");
            return Err(LebError::Overflow { offset });
        }
        let width = len as u32 * PAYLOAD_BITS;
        let magnitude = (1u64 << width) - biased;
        if magnitude > MAX_SAFE_INTEGER as u64 {
            trace!(offset, magnitude, "signed varint exceeds safe range");
            return Err(LebError::Overflow { offset });
        }
        Ok((-(magnitude as i64), len))
    }
}

/// `ceil(log2(magnitude))` rounded up to a multiple of 7, never below 7.
fn aligned_width(magnitude: u64) -> u32 {
    let bits = u64::BITS - magnitude.saturating_sub(1).leading_zeros();
    bits.div_ceil(PAYLOAD_BITS).max(1) * PAYLOAD_BITS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UnsignedLeb128;
    use proptest::prelude::*;

    fn round_trip(value: i64) {
        let encoded = SignedLeb128::encode(value).unwrap();
        assert_eq!(
            SignedLeb128::decode(&encoded, 0).unwrap(),
            value,
            "failed for {value} encoded as {encoded:02x?}"
        );
        assert_eq!(encoded.len(), SignedLeb128::encoded_len(value));
    }

    proptest! {
        #[test]
        fn round_trip_proptest(value in -MAX_SAFE_INTEGER..=-1i64) {
            let encoded = SignedLeb128::encode(value).unwrap();
            prop_assert_eq!(SignedLeb128::decode(&encoded, 0).unwrap(), value);
            prop_assert_eq!(
                UnsignedLeb128::get_length(&encoded, 0).unwrap(),
                encoded.len()
            );
        }
    }

    #[test]
    fn power_of_two_boundaries() {
        for k in 0..=53u32 {
            let pow = 1i64 << k;
            for magnitude in [pow - 1, pow, pow + 1] {
                if (1..=MAX_SAFE_INTEGER).contains(&magnitude) {
                    round_trip(-magnitude);
                }
            }
        }
        round_trip(-MAX_SAFE_INTEGER);
    }

    #[test]
    fn small_values_exhaustive() {
        for value in -20_000i64..0 {
            round_trip(value);
        }
    }

    #[test]
    fn known_encodings() {
        assert_eq!(SignedLeb128::encode(-1).unwrap(), vec![0x7F]);
        assert_eq!(SignedLeb128::encode(-5).unwrap(), vec![0x7B]);
        assert_eq!(SignedLeb128::encode(-64).unwrap(), vec![0x40]);
        assert_eq!(SignedLeb128::encode(-100).unwrap(), vec![0x1C]);
        assert_eq!(SignedLeb128::encode(-128).unwrap(), vec![0x00]);
        assert_eq!(SignedLeb128::encode(-129).unwrap(), vec![0xFF, 0x7E]);
        assert_eq!(SignedLeb128::encode(-16_384).unwrap(), vec![0x80, 0x00]);
        assert_eq!(SignedLeb128::encode(-MAX_SAFE_INTEGER).unwrap().len(), 8);
    }

    #[test]
    fn width_grows_per_seven_bits() {
        assert_eq!(SignedLeb128::encoded_len(-128), 1);
        assert_eq!(SignedLeb128::encoded_len(-129), 2);
        assert_eq!(SignedLeb128::encoded_len(-16_384), 2);
        assert_eq!(SignedLeb128::encoded_len(-16_385), 3);
    }

    #[test]
    fn rejects_non_negative_and_unsafe() {
        for value in [0, 1] {
            assert_eq!(
                SignedLeb128::encode(value).unwrap_err(),
                LebError::SignMismatch {
                    value,
                    expected: Sign::Negative
                }
            );
        }
        assert!(matches!(
            SignedLeb128::encode(-MAX_SAFE_INTEGER - 1),
            Err(LebError::InvalidInput(_))
        ));
    }

    #[test]
    fn decodes_at_offset() {
        let mut buf = vec![0x01, 0x02, 0x03];
        buf.extend(SignedLeb128::encode(-300_000).unwrap());
        buf.push(0xFF);
        assert_eq!(SignedLeb128::decode(&buf, 3).unwrap(), -300_000);
    }

    #[test]
    fn decode_errors() {
        assert_eq!(
            SignedLeb128::decode(&[0xFF, 0x80, 0xE8], 0).unwrap_err(),
            LebError::UnterminatedSequence { offset: 0, len: 3 }
        );
        assert_eq!(
            SignedLeb128::decode(&[0x7F], 2).unwrap_err(),
            LebError::BufferBounds { offset: 2, len: 1 }
        );
        // Eight zero groups decode to -2^56.
        let mut buf = vec![0x80; 7];
        buf.push(0x00);
        assert_eq!(
            SignedLeb128::decode(&buf, 0).unwrap_err(),
            LebError::Overflow { offset: 0 }
        );
        let mut buf = vec![0xFF; 8];
        buf.push(0x7F);
        assert_eq!(
            SignedLeb128::decode(&buf, 0).unwrap_err(),
            LebError::Overflow { offset: 0 }
        );
    }
}
