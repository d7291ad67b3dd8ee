// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type identifiers.
//!
//! A `TypeIdentifier` is the CRC-32 (IEEE polynomial) of a canonical name.
//! Checksum 0 is reserved as the "absent" sentinel on the wire, so it is
//! never a valid identifier and `TypeIdentifier` is backed by `NonZeroU32`.

use std::fmt;
use std::num::NonZeroU32;

/// Raw wire value meaning "no type".
pub const ABSENT_TYPE_ID: u32 = 0;

/// CRC-32 (IEEE) of `bytes`.
pub fn checksum(bytes: &[u8]) -> u32 {
    crc32fast::hash(bytes)
}

/// 32-bit identity of a registered type.
///
/// # Example
///
/// ```
/// use typereg::TypeIdentifier;
///
/// let id = TypeIdentifier::from_name("pkg.Point").expect("non-zero checksum");
/// assert_eq!(id.get(), 0x58DA_5686);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeIdentifier(NonZeroU32);

impl TypeIdentifier {
    /// Wrap a raw value; `None` for the reserved 0.
    pub const fn new(raw: u32) -> Option<Self> {
        match NonZeroU32::new(raw) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Identifier of a canonical (or explicit) name; `None` when its checksum is 0.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::new(checksum(name.as_bytes()))
    }

    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Debug for TypeIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeIdentifier({:#010x})", self.get())
    }
}

impl fmt::Display for TypeIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

impl From<TypeIdentifier> for u32 {
    fn from(id: TypeIdentifier) -> Self {
        id.get()
    }
}
