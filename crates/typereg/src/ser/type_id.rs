// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Identifier field codec.
//!
//! The identifier travels as a fixed 4-byte little-endian integer ahead of
//! the value it tags. There is no length prefix. Decoding returns the raw
//! value; resolving it (and rejecting 0) is the registry's job.

use super::cursor::{Cursor, CursorMut};
use super::SerResult;
use crate::hash::TypeIdentifier;

/// Width of the identifier field on the wire.
pub const TYPE_ID_SIZE: usize = 4;

pub fn encode_type_id(cursor: &mut CursorMut<'_>, id: TypeIdentifier) -> SerResult<()> {
    cursor.write_u32_le(id.get())
}

/// Consume exactly [`TYPE_ID_SIZE`] bytes.
pub fn decode_type_id(cursor: &mut Cursor<'_>) -> SerResult<u32> {
    cursor.read_u32_le()
}
