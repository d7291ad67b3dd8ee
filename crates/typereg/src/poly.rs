// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Polymorphic value codec.
//!
//! A value behind a trait object travels as its 4-byte type identifier
//! followed by its own field encoding:
//!
//! ```text
//! +----------------+---------------------------+
//! | id (u32 LE)    | fields (FieldEncode)      |
//! +----------------+---------------------------+
//! ```
//!
//! Decoding reads the identifier, asks the registry for the type, builds a
//! zero value with the registered constructor and lets it decode its fields.

use std::any::Any;
use std::sync::Arc;

use crate::descriptor::{Described, TypeDescriptor};
use crate::error::{DecodeError, EncodeError};
use crate::hash::ABSENT_TYPE_ID;
use crate::registry::TypeRegistry;
use crate::ser::{
    decode_type_id, encode_type_id, Cursor, CursorMut, FieldDecode, FieldEncode, SerResult,
};

/// Object-safe view of a registrable, serializable value.
///
/// Blanket-implemented for every `Described + FieldEncode + FieldDecode` type.
pub trait Polymorphic: Any + Send + Sync {
    /// Descriptor of the concrete runtime type.
    fn dyn_descriptor(&self) -> TypeDescriptor;

    fn encode_dyn(&self, cursor: &mut CursorMut<'_>) -> SerResult<()>;

    fn decode_dyn(&mut self, cursor: &mut Cursor<'_>) -> SerResult<()>;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T> Polymorphic for T
where
    T: Described + FieldEncode + FieldDecode + Any + Send + Sync,
{
    fn dyn_descriptor(&self) -> TypeDescriptor {
        T::type_descriptor()
    }

    fn encode_dyn(&self, cursor: &mut CursorMut<'_>) -> SerResult<()> {
        FieldEncode::encode_fields(self, cursor)
    }

    fn decode_dyn(&mut self, cursor: &mut Cursor<'_>) -> SerResult<()> {
        FieldDecode::decode_fields(self, cursor)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

impl dyn Polymorphic {
    pub fn is<T: Any>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast<T: Any>(self: Box<Self>) -> Option<Box<T>> {
        self.into_any().downcast::<T>().ok()
    }
}

/// Writes identifier-tagged values.
#[derive(Clone)]
pub struct PolyEncoder {
    registry: Arc<TypeRegistry>,
}

impl PolyEncoder {
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Encode `value` at the start of `buf`; returns the number of bytes written.
    pub fn encode(&self, value: &dyn Polymorphic, buf: &mut [u8]) -> Result<usize, EncodeError> {
        let mut cursor = CursorMut::new(buf);
        self.encode_into(value, &mut cursor)?;
        Ok(cursor.offset())
    }

    /// Encode `value` at the cursor's current position.
    pub fn encode_into(
        &self,
        value: &dyn Polymorphic,
        cursor: &mut CursorMut<'_>,
    ) -> Result<(), EncodeError> {
        let id = self.registry.identifier_of_value(value)?;
        encode_type_id(cursor, id)?;
        value.encode_dyn(cursor)?;
        Ok(())
    }

    /// Like `encode_into`, writing the absent identifier 0 for `None`.
    pub fn encode_optional_into(
        &self,
        value: Option<&dyn Polymorphic>,
        cursor: &mut CursorMut<'_>,
    ) -> Result<(), EncodeError> {
        match value {
            Some(value) => self.encode_into(value, cursor),
            None => Ok(cursor.write_u32_le(ABSENT_TYPE_ID)?),
        }
    }
}

/// Reads identifier-tagged values.
#[derive(Clone)]
pub struct PolyDecoder {
    registry: Arc<TypeRegistry>,
}

impl PolyDecoder {
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Decode one value from the start of `buf`; returns it with the number
    /// of bytes consumed.
    pub fn decode(&self, buf: &[u8]) -> Result<(Box<dyn Polymorphic>, usize), DecodeError> {
        let mut cursor = Cursor::new(buf);
        let value = self.decode_from(&mut cursor)?;
        Ok((value, cursor.offset()))
    }

    /// Decode one value at the cursor's current position.
    pub fn decode_from(&self, cursor: &mut Cursor<'_>) -> Result<Box<dyn Polymorphic>, DecodeError> {
        let id = decode_type_id(cursor)?;
        self.decode_tagged(id, cursor)
    }

    /// Like `decode_from`, mapping the absent identifier 0 to `None`.
    pub fn decode_optional_from(
        &self,
        cursor: &mut Cursor<'_>,
    ) -> Result<Option<Box<dyn Polymorphic>>, DecodeError> {
        match decode_type_id(cursor)? {
            ABSENT_TYPE_ID => Ok(None),
            id => self.decode_tagged(id, cursor).map(Some),
        }
    }

    fn decode_tagged(
        &self,
        id: u32,
        cursor: &mut Cursor<'_>,
    ) -> Result<Box<dyn Polymorphic>, DecodeError> {
        let Some(entry) = self.registry.entry(id) else {
            log::debug!("[TYPEREG] Unknown type identifier {:#010x}", id);
            return Err(DecodeError::UnknownIdentifier(id));
        };
        let mut value = entry
            .construct()
            .ok_or_else(|| DecodeError::UnconstructibleType {
                id,
                type_name: entry.type_name(),
            })?;
        value.decode_dyn(cursor)?;
        Ok(value)
    }
}
