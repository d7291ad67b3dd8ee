// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Wire helpers: bounds-checked cursors, the identifier field codec and the
//! field encoding contract implemented by serializable types.

pub mod cursor;
pub mod fields;
pub mod type_id;

pub use cursor::{Cursor, CursorMut};
pub use fields::{FieldDecode, FieldEncode};
pub use type_id::{decode_type_id, encode_type_id, TYPE_ID_SIZE};

use thiserror::Error;

/// Serialization error raised by cursors and field codecs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerError {
    #[error("write failed at offset {offset}: {reason}")]
    WriteFailed { offset: usize, reason: String },
    #[error("read failed at offset {offset}: {reason}")]
    ReadFailed { offset: usize, reason: String },
    #[error("invalid data: {reason}")]
    InvalidData { reason: String },
}

pub type SerResult<T> = core::result::Result<T, SerError>;
