// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use std::fmt;
use std::sync::Arc;

use crate::descriptor::TypeDescriptor;
use crate::hash::TypeIdentifier;
use crate::poly::Polymorphic;
use crate::signature::canonical_name;

/// Builds the zero value a decoder populates.
pub type Factory = fn() -> Box<dyn Polymorphic>;

/// One side of the registry bijection, keyed by identifier.
#[derive(Clone)]
pub struct RegistryEntry {
    pub(super) id: TypeIdentifier,
    pub(super) name: String,
    pub(super) descriptor: Arc<TypeDescriptor>,
    pub(super) factory: Option<Factory>,
}

impl RegistryEntry {
    pub fn id(&self) -> TypeIdentifier {
        self.id
    }

    /// Name the identifier was computed from (canonical or explicit).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    /// Canonical name of the descriptor, which may differ from `name()` when
    /// the type was registered under an explicit name.
    pub fn type_name(&self) -> String {
        canonical_name(&self.descriptor)
    }

    /// Whether `construct` will produce a value.
    pub fn is_constructible(&self) -> bool {
        self.factory.is_some()
    }

    /// Fresh zero value, for types registered with `register_type`.
    pub fn construct(&self) -> Option<Box<dyn Polymorphic>> {
        self.factory.map(|make| make())
    }
}

impl fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("type_name", &self.type_name())
            .field("constructible", &self.is_constructible())
            .finish()
    }
}
