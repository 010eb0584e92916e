// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Byte cursor for sequential decoding.
//!
//! The cursor borrows an immutable buffer and owns a read offset that only
//! moves forward, except through an explicit [`ByteCursor::seek`]. Failed
//! reads leave the offset untouched.
//!
//! # Example
//!
//! ```
//! use cyclecodec::encoding::cursor::ByteCursor;
//! use cyclecodec::encoding::field::U16;
//! use cyclecodec::FieldValue;
//!
//! let data = [b'O', b'K', 0x2A, 0x00];
//! let mut cursor = ByteCursor::new(&data);
//! cursor.expect(b"OK").unwrap();
//! assert_eq!(cursor.read_fixed(U16).unwrap(), FieldValue::UInt16(42));
//! assert!(cursor.is_at_end());
//! ```

use crate::core::{CodecError, FieldValue, Result};

use super::field::{decode_field, FieldSpec};

/// Forward-only read position over a borrowed buffer.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor at offset 0.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Create a cursor at a given offset.
    pub fn at(data: &'a [u8], offset: usize) -> Self {
        Self { data, offset }
    }

    /// The underlying buffer.
    #[inline]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Current read position.
    #[inline]
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Bytes left from the current position.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    /// Check if at end of buffer.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.data.len()
    }

    /// Move to an absolute offset (may be at most the buffer length).
    pub fn seek(&mut self, offset: usize) -> Result<()> {
        if offset > self.data.len() {
            return Err(CodecError::truncated(
                "seek",
                self.data.len(),
                offset - self.data.len(),
                0,
            ));
        }
        self.offset = offset;
        Ok(())
    }

    fn take(&mut self, count: usize, context: &str) -> Result<&'a [u8]> {
        if count > self.remaining() {
            return Err(CodecError::truncated(
                context,
                self.offset,
                count,
                self.remaining(),
            ));
        }
        let start = self.offset;
        self.offset += count;
        Ok(&self.data[start..self.offset])
    }

    /// Read a fixed-width field and advance by its size.
    pub fn read_fixed(&mut self, spec: FieldSpec) -> Result<FieldValue> {
        let bytes = self.take(spec.byte_size(), spec.ty.as_str())?;
        Ok(decode_field(bytes, spec))
    }

    /// Read `count` raw bytes.
    pub fn read_raw(&mut self, count: usize) -> Result<&'a [u8]> {
        self.take(count, "raw bytes")
    }

    /// Skip `count` bytes.
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.take(count, "skip").map(|_| ())
    }

    /// Peek at the next byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.data.get(self.offset).copied()
    }

    /// Consume `literal` or fail with `FormatMismatch` without advancing.
    pub fn expect(&mut self, literal: &[u8]) -> Result<()> {
        let end = (self.offset + literal.len()).min(self.data.len());
        let actual = self.data.get(self.offset..end).unwrap_or(&[]);
        if actual != literal {
            return Err(CodecError::format_mismatch(self.offset, literal, actual));
        }
        self.offset += literal.len();
        Ok(())
    }

    /// Read a byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1, "u8")?[0])
    }

    /// Read a little-endian u16.
    pub fn read_u16(&mut self) -> Result<u16> {
        let bytes = self.take(2, "u16")?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// Read a little-endian u32.
    pub fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.take(4, "u32")?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a little-endian i32.
    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(self.read_u32()? as i32)
    }

    /// Advance past the first occurrence of `sentinel`.
    ///
    /// The bytes before the sentinel have no declared length, so the scan is
    /// linear. Fails with `TruncatedFile` when the buffer ends first.
    pub fn skip_past(&mut self, sentinel: u8) -> Result<usize> {
        let start = self.offset;
        match self.data[start.min(self.data.len())..]
            .iter()
            .position(|&b| b == sentinel)
        {
            Some(pos) => {
                self.offset = start + pos + 1;
                Ok(pos)
            }
            None => Err(CodecError::truncated(
                format!("scan for sentinel 0x{sentinel:02x}"),
                start,
                1,
                0,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::field::{F64, I32, U16, U32};

    #[test]
    fn test_read_sequence() {
        let mut data = vec![0x07];
        data.extend_from_slice(&0x0102u16.to_le_bytes());
        data.extend_from_slice(&1.5f64.to_le_bytes());
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.read_u8().unwrap(), 7);
        assert_eq!(cursor.read_fixed(U16).unwrap(), FieldValue::UInt16(0x0102));
        assert_eq!(cursor.read_fixed(F64).unwrap(), FieldValue::Float64(1.5));
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_read_past_end_does_not_advance() {
        let data = [1u8, 2, 3];
        let mut cursor = ByteCursor::new(&data);
        cursor.skip(1).unwrap();
        assert!(cursor.read_fixed(U32).is_err());
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.remaining(), 2);
    }

    #[test]
    fn test_expect_match() {
        let data = b"MODULEdata";
        let mut cursor = ByteCursor::new(data);
        cursor.expect(b"MODULE").unwrap();
        assert_eq!(cursor.position(), 6);
    }

    #[test]
    fn test_expect_mismatch_reports_offset() {
        let data = b"XXMODXLE";
        let mut cursor = ByteCursor::at(data, 2);
        let err = cursor.expect(b"MODULE").unwrap_err();
        assert_eq!(
            err,
            CodecError::FormatMismatch {
                offset: 2,
                expected: b"MODULE".to_vec(),
                actual: b"MODXLE".to_vec(),
            }
        );
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn test_expect_short_buffer() {
        let data = b"MOD";
        let mut cursor = ByteCursor::new(data);
        let err = cursor.expect(b"MODULE").unwrap_err();
        assert!(matches!(err, CodecError::FormatMismatch { ref actual, .. } if actual == b"MOD"));
    }

    #[test]
    fn test_seek_and_raw() {
        let data = b"0123456789";
        let mut cursor = ByteCursor::new(data);
        cursor.seek(4).unwrap();
        assert_eq!(cursor.read_raw(3).unwrap(), b"456");
        assert!(cursor.seek(11).is_err());
        cursor.seek(10).unwrap();
        assert!(cursor.is_at_end());
        assert_eq!(cursor.peek(), None);
    }

    #[test]
    fn test_skip_past_sentinel() {
        let data = [0x00, 0x05, 0x00, 0x01, 0xAB];
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.skip_past(0x01).unwrap(), 3);
        assert_eq!(cursor.position(), 4);
        assert_eq!(cursor.read_u8().unwrap(), 0xAB);
    }

    #[test]
    fn test_skip_past_missing_sentinel() {
        let data = [0x00, 0x05, 0x00];
        let mut cursor = ByteCursor::new(&data);
        let err = cursor.skip_past(0x01).unwrap_err();
        assert!(matches!(err, CodecError::TruncatedFile { .. }));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_read_i32() {
        let data = (-5i32).to_le_bytes();
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.read_i32().unwrap(), -5);
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.read_fixed(I32).unwrap(), FieldValue::Int32(-5));
    }
}
