use byteorder::{BigEndian, ByteOrder};
use crate::{Error, Result};

/// Bounded big-endian cursor over a borrowed byte slice.
///
/// Reads never partially consume a field: if fewer bytes remain than the field
/// needs, the cursor stays where it was and a truncation error is returned.
pub struct ByteBuffer<'a> {
    buffer: &'a [u8],
    cursor: usize,
}

impl<'a> ByteBuffer<'a> {
    /// Create a new ByteBuffer over bytes
    pub fn new(data: &'a [u8]) -> Self {
        ByteBuffer {
            buffer: data,
            cursor: 0,
        }
    }

    /// Get current cursor position
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Get remaining bytes from current position
    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.cursor)
    }

    /// Check if buffer has at least n bytes remaining
    pub fn has_remaining(&self, n: usize) -> bool {
        self.remaining() >= n
    }

    /// Unread part of the buffer
    pub fn remaining_slice(&self) -> &'a [u8] {
        let buffer: &'a [u8] = self.buffer;
        &buffer[self.cursor..]
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if !self.has_remaining(len) {
            return Err(Error::truncated(format!(
                "need {} bytes at offset {}, only {} available",
                len,
                self.cursor,
                self.remaining()
            )));
        }
        let buffer: &'a [u8] = self.buffer;
        let bytes = &buffer[self.cursor..self.cursor + len];
        self.cursor += len;
        Ok(bytes)
    }

    /// Read a slice of `len` bytes
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        self.take(len)
    }

    /// Read u8
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    /// Read u16 (big endian)
    pub fn read_u16_be(&mut self) -> Result<u16> {
        Ok(BigEndian::read_u16(self.take(2)?))
    }

    /// Read i16 (big endian)
    pub fn read_i16_be(&mut self) -> Result<i16> {
        Ok(BigEndian::read_i16(self.take(2)?))
    }

    /// Read unsigned 24-bit integer (big endian)
    pub fn read_u24_be(&mut self) -> Result<u32> {
        Ok(BigEndian::read_u24(self.take(3)?))
    }

    /// Read signed 24-bit integer (big endian), e.g. AVC composition time
    pub fn read_i24_be(&mut self) -> Result<i32> {
        Ok(BigEndian::read_i24(self.take(3)?))
    }

    /// Read u32 (big endian)
    pub fn read_u32_be(&mut self) -> Result<u32> {
        Ok(BigEndian::read_u32(self.take(4)?))
    }

    /// Read f64 (big endian)
    pub fn read_f64_be(&mut self) -> Result<f64> {
        Ok(BigEndian::read_f64(self.take(8)?))
    }

    /// Get length of buffer
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}
