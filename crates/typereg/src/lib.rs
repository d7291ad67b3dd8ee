// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # typereg - type identity for polymorphic binary serialization
//!
//! Maps concrete types to compact, deterministic 32-bit identifiers and back,
//! so that a value stored behind a trait object can be tagged on the wire
//! with its concrete type and rebuilt on decode.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use typereg::ser::{Cursor, CursorMut, FieldDecode, FieldEncode, SerResult};
//! use typereg::{Described, PolyDecoder, PolyEncoder, TypeRegistry};
//!
//! #[derive(Debug, Default, PartialEq, Described)]
//! #[typereg(namespace = "geo")]
//! struct Point {
//!     x: i64,
//!     y: i64,
//! }
//!
//! impl FieldEncode for Point {
//!     fn encode_fields(&self, c: &mut CursorMut<'_>) -> SerResult<()> {
//!         self.x.encode_fields(c)?;
//!         self.y.encode_fields(c)
//!     }
//! }
//!
//! impl FieldDecode for Point {
//!     fn decode_fields(&mut self, c: &mut Cursor<'_>) -> SerResult<()> {
//!         self.x.decode_fields(c)?;
//!         self.y.decode_fields(c)
//!     }
//! }
//!
//! let mut registry = TypeRegistry::new();
//! assert_eq!(registry.register_type::<Point>()?, "geo.Point");
//! let registry = registry.freeze();
//!
//! let mut buf = [0u8; 64];
//! let len = PolyEncoder::new(Arc::clone(&registry)).encode(&Point { x: 1, y: 2 }, &mut buf)?;
//! assert_eq!(len, 4 + 16);
//!
//! let (value, _) = PolyDecoder::new(registry).decode(&buf[..len])?;
//! assert_eq!(value.downcast_ref::<Point>(), Some(&Point { x: 1, y: 2 }));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! TypeDescriptor --signature--> canonical name --crc32--> TypeIdentifier
//!        ^                                                      |
//!        |                   TypeRegistry (bijection)           |
//!        +------------------------------------------------------+
//!
//! encode: value -> identifier_of -> [id: u32 LE][fields...]
//! decode: [id][fields...] -> type_of -> zero value -> decode fields
//! ```
//!
//! ## Modules Overview
//!
//! - [`descriptor`] - structural type descriptors and the [`Described`] trait
//! - [`signature`] - canonical names
//! - [`hash`] - CRC-32 identifiers
//! - [`registry`] - the bidirectional registry
//! - [`ser`] - cursors, identifier wire codec, field codec traits
//! - [`poly`] - identifier-tagged encoding of trait objects

// Allow the derive macro to work inside this crate's tests
extern crate self as typereg;

pub mod descriptor;
pub mod error;
pub mod hash;
pub mod poly;
pub mod registry;
pub mod ser;
pub mod signature;

pub use descriptor::{Described, Field, FuncSig, Method, TypeDescriptor, TypeKind, TypeName};
pub use error::{DecodeError, EncodeError, RegistryError, Result};
pub use hash::{checksum, TypeIdentifier, ABSENT_TYPE_ID};
pub use poly::{PolyDecoder, PolyEncoder, Polymorphic};
pub use registry::{RegistryEntry, TypeRegistry};
pub use signature::{canonical_name, canonical_name_of, write_signature};

/// Derive macro for [`Described`] (`#[derive(typereg::Described)]`).
#[cfg(feature = "derive")]
pub use typereg_codegen::Described;
