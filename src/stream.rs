use crate::{Result, SignedLeb128, UnsignedLeb128};

/// Appends varints to an owned buffer.
#[derive(Debug, Default, Clone)]
pub struct VarintWriter {
    buffer: Vec<u8>,
}

impl VarintWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_unsigned(&mut self, value: i64) -> Result<usize> {
        UnsignedLeb128::encode_into(value, &mut self.buffer)
    }

    pub fn write_signed(&mut self, value: i64) -> Result<usize> {
        SignedLeb128::encode_into(value, &mut self.buffer)
    }

    /// Write with the scheme [`crate::Leb128::encode`] would pick for `value`.
    pub fn write(&mut self, value: i64) -> Result<usize> {
        if value >= 0 {
            self.write_unsigned(value)
        } else {
            self.write_signed(value)
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }
}

/// Reads consecutive varints from a byte slice.
///
/// The position only advances on a successful read, so a caller can retry
/// with the other sign flag after an `Overflow`.
#[derive(Clone, Debug)]
pub struct VarintReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> VarintReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::with_offset(bytes, 0)
    }

    pub fn with_offset(bytes: &'a [u8], offset: usize) -> Self {
        Self { bytes, pos: offset }
    }

    pub fn read_unsigned(&mut self) -> Result<u64> {
        let (value, len) = UnsignedLeb128::decode_with_len(self.bytes, self.pos)?;
        self.pos += len;
        Ok(value)
    }

    pub fn read_signed(&mut self) -> Result<i64> {
        let (value, len) = SignedLeb128::decode_with_len(self.bytes, self.pos)?;
        self.pos += len;
        Ok(value)
    }

    /// Read with the same dispatch as [`crate::Leb128::decode`].
    pub fn read(&mut self, signed: bool) -> Result<i64> {
        if signed {
            self.read_signed()
        } else {
            self.read_unsigned().map(|value| value as i64)
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> &'a [u8] {
        self.bytes.get(self.pos..).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.bytes.len()
    }
}
