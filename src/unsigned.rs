use tracing::trace;

use crate::{
    check_safe, LebError, Result, Sign, CONTINUATION_BIT, MAX_SAFE_INTEGER, PAYLOAD_BITS,
    PAYLOAD_MASK,
};

/// Unsigned LEB128 codec.
///
/// Values are split into 7-bit groups, least-significant group first. Every
/// byte except the last has its top bit set.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsignedLeb128;

impl UnsignedLeb128 {
    /// Encode a non-negative safe integer using the minimum number of bytes.
    pub fn encode(value: i64) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(crate::MAX_ENCODED_LEN);
        Self::encode_into(value, &mut out)?;
        Ok(out)
    }

    /// Append the encoding of `value` to `out`, returning the number of bytes written.
    pub fn encode_into(value: i64, out: &mut Vec<u8>) -> Result<usize> {
        check_safe(value)?;
        if value < 0 {
            return Err(LebError::SignMismatch {
                value,
                expected: Sign::NonNegative,
            });
        }
        let start = out.len();
        let mut remaining = value as u64;
        loop {
            let mut byte = (remaining as u8) & PAYLOAD_MASK;
            remaining >>= PAYLOAD_BITS;
            if remaining != 0 {
                byte |= CONTINUATION_BIT;
            }
            out.push(byte);
            if remaining == 0 {
                break;
            }
        }
        Ok(out.len() - start)
    }

    /// Number of bytes [`UnsignedLeb128::encode`] produces for `value`.
    pub fn encoded_len(value: u64) -> usize {
        let bits = (u64::BITS - value.leading_zeros()) as usize;
        bits.div_ceil(PAYLOAD_BITS as usize).max(1)
    }

    /// Decode the varint starting at `offset`. Bytes after the terminator are ignored.
    pub fn decode(buf: &[u8], offset: usize) -> Result<u64> {
        Self::decode_with_len(buf, offset).map(|(value, _)| value)
    }

    /// Decode the varint starting at `offset`, also returning how many bytes it spans.
    pub fn decode_with_len(buf: &[u8], offset: usize) -> Result<(u64, usize)> {
        let (value, len) = decode_raw(buf, offset)?;
        if value > MAX_SAFE_INTEGER as u64 {
            trace!(offset, value, "unsigned varint exceeds safe range");
            return Err(LebError::Overflow { offset });
        }
        Ok((value, len))
    }

    /// Number of bytes making up the varint at `offset`, terminator included.
    pub fn get_length(buf: &[u8], offset: usize) -> Result<usize> {
        Ok(scan_terminator(buf, offset)? - offset + 1)
    }
}

/// Index of the first byte at or after `offset` whose continuation bit is clear.
pub(crate) fn scan_terminator(buf: &[u8], offset: usize) -> Result<usize> {
    let len = buf.len();
    if offset >= len {
        trace!(offset, len, "varint offset out of bounds");
        return Err(LebError::BufferBounds { offset, len });
    }
    match buf[offset..]
        .iter()
        .position(|byte| byte & CONTINUATION_BIT == 0)
    {
        Some(distance) => Ok(offset + distance),
        None => {
            trace!(offset, len, "varint has no terminating byte");
            Err(LebError::UnterminatedSequence { offset, len })
        }
    }
}

/// Reassemble the payload at `offset` without the safe-range check. Fails with
/// `Overflow` only when set payload bits would fall outside a `u64`.
pub(crate) fn decode_raw(buf: &[u8], offset: usize) -> Result<(u64, usize)> {
    let end = scan_terminator(buf, offset)?;
    let mut value = 0u64;
    for (i, &byte) in buf[offset..=end].iter().enumerate() {
        let payload = u64::from(byte & PAYLOAD_MASK);
        if payload == 0 {
            continue;
        }
        let shift = i * PAYLOAD_BITS as usize;
        if shift >= u64::BITS as usize || (payload << shift) >> shift != payload {
            trace!(offset, index = i, "varint payload does not fit in 64 bits");
            return Err(LebError::Overflow { offset });
        }
        value |= payload << shift;
    }
    Ok((value, end - offset + 1))
}

/// Emit `value` as exactly `len` bytes, padding with continuation bytes.
/// `value` must be below `2^(7 * len)`.
pub(crate) fn encode_padded(mut value: u64, len: usize, out: &mut Vec<u8>) {
    debug_assert!(len >= 1);
    for i in 0..len {
        let mut byte = (value as u8) & PAYLOAD_MASK;
        value >>= PAYLOAD_BITS;
        if i + 1 < len {
            byte |= CONTINUATION_BIT;
        }
        out.push(byte);
    }
    debug_assert_eq!(value, 0);
}
