// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types.
//!
//! Registration failures are programming defects: they are returned (never
//! panicked) so that the initialization code can decide to abort. Only
//! `DecodeError::UnknownIdentifier` is expected in normal operation, since it
//! can come from untrusted or version-mismatched input.

use thiserror::Error;

use crate::ser::SerError;

/// Registration and encode-side lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("attempt to register an empty name")]
    EmptyName,

    #[error("attempt to register a nil or invalid type")]
    InvalidType,

    #[error("registering duplicate type {type_name}")]
    DuplicateRegistration { type_name: String },

    /// The name hashes to the reserved "absent" identifier 0.
    #[error("name {name:?} ({type_name}) hashes to the reserved identifier 0")]
    ReservedIdentifier { name: String, type_name: String },

    #[error(
        "registered name collision: new [{name} ({type_name}) ({id})] \
         old [{existing_name} ({existing_type_name}) ({id})]"
    )]
    IdentifierCollision {
        id: u32,
        name: String,
        type_name: String,
        existing_name: String,
        existing_type_name: String,
    },

    #[error("attempt to serialize unregistered type {type_name}")]
    UnregisteredType { type_name: String },
}

/// Errors surfaced by the decode path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unknown type identifier {0}")]
    UnknownIdentifier(u32),

    /// Registered by descriptor only, so there is no zero value to decode into.
    #[error("type {type_name} ({id}) has no registered constructor")]
    UnconstructibleType { id: u32, type_name: String },

    #[error(transparent)]
    Ser(#[from] SerError),
}

/// Errors surfaced by the encode path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Ser(#[from] SerError),
}

pub type Result<T> = core::result::Result<T, RegistryError>;
