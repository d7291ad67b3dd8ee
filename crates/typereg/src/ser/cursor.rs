// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Little-endian read/write cursors over caller-owned buffers.
//!

use super::{SerError, SerResult};

/// Generate little-endian write methods for fixed-width integers.
macro_rules! impl_write_le {
    ($name:ident, $type:ty) => {
        pub fn $name(&mut self, value: $type) -> SerResult<()> {
            self.write_bytes(&value.to_le_bytes())
        }
    };
}

/// Generate little-endian read methods for fixed-width integers.
macro_rules! impl_read_le {
    ($name:ident, $type:ty, $size:expr) => {
        pub fn $name(&mut self) -> SerResult<$type> {
            let mut bytes = [0u8; $size];
            bytes.copy_from_slice(self.read_bytes($size)?);
            Ok(<$type>::from_le_bytes(bytes))
        }
    };
}

/// Mutable cursor for writing (bounds-checked, no reallocation)
pub struct CursorMut<'a> {
    buffer: &'a mut [u8],
    offset: usize,
}

impl<'a> CursorMut<'a> {
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self { buffer, offset: 0 }
    }

    impl_write_le!(write_u8, u8);
    impl_write_le!(write_u16_le, u16);
    impl_write_le!(write_u32_le, u32);
    impl_write_le!(write_u64_le, u64);
    impl_write_le!(write_i8, i8);
    impl_write_le!(write_i16_le, i16);
    impl_write_le!(write_i32_le, i32);
    impl_write_le!(write_i64_le, i64);

    pub fn write_f32_le(&mut self, value: f32) -> SerResult<()> {
        self.write_u32_le(value.to_bits())
    }

    pub fn write_f64_le(&mut self, value: f64) -> SerResult<()> {
        self.write_u64_le(value.to_bits())
    }

    pub fn write_bytes(&mut self, data: &[u8]) -> SerResult<()> {
        if data.len() > self.remaining() {
            return Err(SerError::WriteFailed {
                offset: self.offset,
                reason: "buffer too small".into(),
            });
        }
        self.buffer[self.offset..self.offset + data.len()].copy_from_slice(data);
        self.offset += data.len();
        Ok(())
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.offset)
    }
}

/// Immutable cursor for reading (bounds-checked, zero-copy)
pub struct Cursor<'a> {
    buffer: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, offset: 0 }
    }

    impl_read_le!(read_u8, u8, 1);
    impl_read_le!(read_u16_le, u16, 2);
    impl_read_le!(read_u32_le, u32, 4);
    impl_read_le!(read_u64_le, u64, 8);
    impl_read_le!(read_i8, i8, 1);
    impl_read_le!(read_i16_le, i16, 2);
    impl_read_le!(read_i32_le, i32, 4);
    impl_read_le!(read_i64_le, i64, 8);

    pub fn read_f32_le(&mut self) -> SerResult<f32> {
        Ok(f32::from_bits(self.read_u32_le()?))
    }

    pub fn read_f64_le(&mut self) -> SerResult<f64> {
        Ok(f64::from_bits(self.read_u64_le()?))
    }

    pub fn read_bytes(&mut self, len: usize) -> SerResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(SerError::ReadFailed {
                offset: self.offset,
                reason: "unexpected end of buffer".into(),
            });
        }
        let slice = &self.buffer[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.offset)
    }

    pub fn is_eof(&self) -> bool {
        self.offset >= self.buffer.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_U16: u16 = 0xCDEF;
    const TEST_U32: u32 = 0x1234_5678;
    const TEST_U64: u64 = 0x1122_3344_5566_7788;

    #[test]
    fn test_cursor_mut_write_overflow_reports_offset() {
        let mut buffer = [0u8; 2];
        let mut cursor = CursorMut::new(&mut buffer);
        cursor.write_u16_le(TEST_U16).expect("write u16 should succeed");

        let err = cursor.write_u8(0xFF).unwrap_err();
        assert_eq!(
            err,
            SerError::WriteFailed {
                offset: 2,
                reason: "buffer too small".into(),
            }
        );
    }

    #[test]
    fn test_cursor_read_overflow_reports_offset() {
        let buffer = [0u8; 5];
        let mut cursor = Cursor::new(&buffer);
        assert_eq!(cursor.read_u32_le().expect("read u32 should succeed"), 0);

        let err = cursor.read_u16_le().unwrap_err();
        assert_eq!(
            err,
            SerError::ReadFailed {
                offset: 4,
                reason: "unexpected end of buffer".into(),
            }
        );
        // A failed read does not move the cursor.
        assert_eq!(cursor.offset(), 4);
        assert_eq!(cursor.remaining(), 1);
    }

    #[test]
    fn test_little_endian_layout() {
        let mut buffer = [0u8; 14];
        let mut cursor = CursorMut::new(&mut buffer);
        cursor.write_u32_le(TEST_U32).expect("write u32");
        cursor.write_u64_le(TEST_U64).expect("write u64");
        cursor.write_i16_le(-2).expect("write i16");
        assert_eq!(cursor.offset(), 14);
        assert_eq!(cursor.remaining(), 0);

        assert_eq!(&buffer[..4], &[0x78, 0x56, 0x34, 0x12]);
        assert_eq!(&buffer[4..12], &[0x88, 0x77, 0x66, 0x55, 0x44, 0x33, 0x22, 0x11]);
        assert_eq!(&buffer[12..], &[0xFE, 0xFF]);

        let mut reader = Cursor::new(&buffer);
        assert_eq!(reader.read_u32_le().expect("read u32"), TEST_U32);
        assert_eq!(reader.read_u64_le().expect("read u64"), TEST_U64);
        assert_eq!(reader.read_i16_le().expect("read i16"), -2);
        assert!(reader.is_eof());
    }

    #[test]
    fn test_float_bits_preserved() {
        let mut buffer = [0u8; 12];
        let mut cursor = CursorMut::new(&mut buffer);
        cursor.write_f32_le(1.5).expect("write f32");
        cursor.write_f64_le(std::f64::consts::PI).expect("write f64");

        let mut reader = Cursor::new(&buffer);
        assert_eq!(reader.read_f32_le().expect("read f32").to_bits(), 1.5f32.to_bits());
        assert_eq!(
            reader.read_f64_le().expect("read f64").to_bits(),
            std::f64::consts::PI.to_bits()
        );
    }
}
