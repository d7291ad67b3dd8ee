// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Bidirectional TypeDescriptor <-> TypeIdentifier registry.
//!
//! The registry is filled once during initialization and then frozen into an
//! `Arc` shared by every encoder and decoder. Registration needs `&mut self`,
//! so nothing can register once the snapshot is shared, and lookups on the
//! frozen registry are plain reads with no locking.
//!
//! # Example
//!
//! ```
//! use typereg::{Field, TypeDescriptor, TypeRegistry};
//!
//! let point = TypeDescriptor::named(
//!     "pkg",
//!     "Point",
//!     TypeDescriptor::structure([
//!         Field::new("X", TypeDescriptor::primitive("int")),
//!         Field::new("Y", TypeDescriptor::primitive("int")),
//!     ]),
//! );
//!
//! let mut registry = TypeRegistry::new();
//! assert_eq!(registry.register(point.clone())?, "pkg.Point");
//! let registry = registry.freeze();
//!
//! let id = registry.identifier_of(&point)?;
//! assert_eq!(registry.type_of(id.get()).ok(), Some(&point));
//! # Ok::<(), typereg::RegistryError>(())
//! ```

mod entry;

pub use entry::{Factory, RegistryEntry};

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use crate::descriptor::{Described, TypeDescriptor};
use crate::error::{DecodeError, RegistryError, Result};
use crate::hash::TypeIdentifier;
use crate::poly::Polymorphic;
use crate::ser::{FieldDecode, FieldEncode};
use crate::signature;

/// Registry of the concrete types allowed behind polymorphic fields.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    by_id: HashMap<TypeIdentifier, RegistryEntry>,
    by_descriptor: HashMap<Arc<TypeDescriptor>, TypeIdentifier>,
    /// Encode fast path for values registered through `register_type`.
    by_rust_type: HashMap<TypeId, TypeIdentifier>,
}

impl TypeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `descriptor` under its canonical name and return that name.
    pub fn register(&mut self, descriptor: TypeDescriptor) -> Result<String> {
        let name = signature::canonical_name(&descriptor);
        self.insert(&name, descriptor, None)?;
        Ok(name)
    }

    /// Register `descriptor` under an explicit name.
    pub fn register_name(&mut self, name: &str, descriptor: TypeDescriptor) -> Result<()> {
        self.insert(name, descriptor, None)
    }

    /// Register `T` under its canonical name, with a constructor for decoding.
    pub fn register_type<T>(&mut self) -> Result<String>
    where
        T: Described + FieldEncode + FieldDecode + Default + Any + Send + Sync,
    {
        let descriptor = T::type_descriptor();
        let name = signature::canonical_name(&descriptor);
        let factory: Factory = new_boxed::<T>;
        self.insert(&name, descriptor, Some((TypeId::of::<T>(), factory)))?;
        Ok(name)
    }

    /// Register `T` under an explicit name, with a constructor for decoding.
    pub fn register_type_as<T>(&mut self, name: &str) -> Result<()>
    where
        T: Described + FieldEncode + FieldDecode + Default + Any + Send + Sync,
    {
        let factory: Factory = new_boxed::<T>;
        self.insert(name, T::type_descriptor(), Some((TypeId::of::<T>(), factory)))
    }

    fn insert(
        &mut self,
        name: &str,
        descriptor: TypeDescriptor,
        rust_type: Option<(TypeId, Factory)>,
    ) -> Result<()> {
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if !descriptor.is_valid() {
            return Err(RegistryError::InvalidType);
        }
        if self.by_descriptor.contains_key(&descriptor) {
            return Err(RegistryError::DuplicateRegistration {
                type_name: signature::canonical_name(&descriptor),
            });
        }

        let Some(id) = TypeIdentifier::from_name(name) else {
            return Err(RegistryError::ReservedIdentifier {
                name: name.to_string(),
                type_name: signature::canonical_name(&descriptor),
            });
        };

        // The descriptor is new, so an occupied identifier always belongs to
        // a different type.
        if let Some(existing) = self.by_id.get(&id) {
            return Err(RegistryError::IdentifierCollision {
                id: id.get(),
                name: name.to_string(),
                type_name: signature::canonical_name(&descriptor),
                existing_name: existing.name.clone(),
                existing_type_name: existing.type_name(),
            });
        }

        let descriptor = Arc::new(descriptor);
        let factory = rust_type.map(|(rust_id, factory)| {
            self.by_rust_type.insert(rust_id, id);
            factory
        });
        self.by_descriptor.insert(Arc::clone(&descriptor), id);
        self.by_id.insert(
            id,
            RegistryEntry {
                id,
                name: name.to_string(),
                descriptor,
                factory,
            },
        );

        log::debug!("[TYPEREG] Registered {} as {:#010x}", name, id.get());
        Ok(())
    }

    /// Identifier of a registered descriptor (encode path).
    pub fn identifier_of(&self, descriptor: &TypeDescriptor) -> Result<TypeIdentifier> {
        self.by_descriptor
            .get(descriptor)
            .copied()
            .ok_or_else(|| RegistryError::UnregisteredType {
                type_name: signature::canonical_name(descriptor),
            })
    }

    /// Identifier of a value's runtime type.
    ///
    /// Types registered with `register_type` resolve without building their
    /// descriptor; anything else goes through `identifier_of`.
    pub fn identifier_of_value(&self, value: &dyn Polymorphic) -> Result<TypeIdentifier> {
        match self.by_rust_type.get(&value.as_any().type_id()) {
            Some(id) => Ok(*id),
            None => self.identifier_of(&value.dyn_descriptor()),
        }
    }

    /// Descriptor registered under a raw wire identifier (decode path).
    pub fn type_of(&self, id: u32) -> core::result::Result<&TypeDescriptor, DecodeError> {
        self.entry(id)
            .map(RegistryEntry::descriptor)
            .ok_or(DecodeError::UnknownIdentifier(id))
    }

    /// Full entry for a raw wire identifier. 0 never resolves.
    pub fn entry(&self, id: u32) -> Option<&RegistryEntry> {
        TypeIdentifier::new(id).and_then(|id| self.by_id.get(&id))
    }

    /// Registration name for a raw wire identifier, for diagnostics.
    pub fn name_of(&self, id: u32) -> Option<&str> {
        self.entry(id).map(RegistryEntry::name)
    }

    pub fn contains(&self, descriptor: &TypeDescriptor) -> bool {
        self.by_descriptor.contains_key(descriptor)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// All entries, ordered by identifier.
    pub fn entries(&self) -> Vec<&RegistryEntry> {
        let mut entries: Vec<&RegistryEntry> = self.by_id.values().collect();
        entries.sort_by_key(|e| e.id);
        entries
    }

    /// Canonical name of any descriptor; registration is not required.
    pub fn canonical_name(descriptor: &TypeDescriptor) -> String {
        signature::canonical_name(descriptor)
    }

    /// End the registration phase and share the result.
    #[must_use]
    pub fn freeze(mut self) -> Arc<Self> {
        self.by_id.shrink_to_fit();
        self.by_descriptor.shrink_to_fit();
        self.by_rust_type.shrink_to_fit();
        log::info!("[TYPEREG] Registry frozen with {} types", self.by_id.len());
        Arc::new(self)
    }
}

fn new_boxed<T>() -> Box<dyn Polymorphic>
where
    T: Described + FieldEncode + FieldDecode + Default + Any + Send + Sync,
{
    Box::new(T::default())
}

#[cfg(test)]
mod tests;
