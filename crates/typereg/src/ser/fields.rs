// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field encoding contract.
//!
//! Each serializable type writes and reads its own fields. The polymorphic
//! codec only adds the identifier in front; everything after it belongs to
//! these impls. Decoding fills in a zero value in place, mirroring how the
//! decoder allocates a default instance before populating it.

use super::cursor::{Cursor, CursorMut};
use super::{SerError, SerResult};

/// Encode this value's fields.
pub trait FieldEncode {
    fn encode_fields(&self, cursor: &mut CursorMut<'_>) -> SerResult<()>;
}

/// Decode fields into an already-allocated value.
pub trait FieldDecode {
    fn decode_fields(&mut self, cursor: &mut Cursor<'_>) -> SerResult<()>;
}

macro_rules! impl_fields_le {
    ($($type:ty => $write:ident, $read:ident);* $(;)?) => {
        $(
            impl FieldEncode for $type {
                fn encode_fields(&self, cursor: &mut CursorMut<'_>) -> SerResult<()> {
                    cursor.$write(*self)
                }
            }

            impl FieldDecode for $type {
                fn decode_fields(&mut self, cursor: &mut Cursor<'_>) -> SerResult<()> {
                    *self = cursor.$read()?;
                    Ok(())
                }
            }
        )*
    };
}

impl_fields_le! {
    u8 => write_u8, read_u8;
    u16 => write_u16_le, read_u16_le;
    u32 => write_u32_le, read_u32_le;
    u64 => write_u64_le, read_u64_le;
    i8 => write_i8, read_i8;
    i16 => write_i16_le, read_i16_le;
    i32 => write_i32_le, read_i32_le;
    i64 => write_i64_le, read_i64_le;
    f32 => write_f32_le, read_f32_le;
    f64 => write_f64_le, read_f64_le;
}

impl FieldEncode for bool {
    fn encode_fields(&self, cursor: &mut CursorMut<'_>) -> SerResult<()> {
        cursor.write_u8(u8::from(*self))
    }
}

impl FieldDecode for bool {
    fn decode_fields(&mut self, cursor: &mut Cursor<'_>) -> SerResult<()> {
        *self = match cursor.read_u8()? {
            0 => false,
            1 => true,
            other => {
                return Err(SerError::InvalidData {
                    reason: format!("bool byte {:#04x}", other),
                })
            }
        };
        Ok(())
    }
}

/// u32 length prefix followed by UTF-8 bytes.
impl FieldEncode for String {
    fn encode_fields(&self, cursor: &mut CursorMut<'_>) -> SerResult<()> {
        let len = u32::try_from(self.len()).map_err(|_| SerError::WriteFailed {
            offset: cursor.offset(),
            reason: "string longer than u32::MAX".into(),
        })?;
        cursor.write_u32_le(len)?;
        cursor.write_bytes(self.as_bytes())
    }
}

impl FieldDecode for String {
    fn decode_fields(&mut self, cursor: &mut Cursor<'_>) -> SerResult<()> {
        let len = cursor.read_u32_le()? as usize;
        let bytes = cursor.read_bytes(len)?;
        let text = std::str::from_utf8(bytes).map_err(|e| SerError::InvalidData {
            reason: format!("string is not UTF-8: {}", e),
        })?;
        self.clear();
        self.push_str(text);
        Ok(())
    }
}
