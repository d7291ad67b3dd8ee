// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use super::TypeRegistry;
use crate::descriptor::{Described, Field, TypeDescriptor};
use crate::error::{DecodeError, RegistryError};
use crate::hash::{TypeIdentifier, ABSENT_TYPE_ID};
use crate::ser::{Cursor, CursorMut, FieldDecode, FieldEncode, SerResult};
use std::sync::Arc;
use std::thread;

fn int() -> TypeDescriptor {
    TypeDescriptor::primitive("int")
}

fn point() -> TypeDescriptor {
    TypeDescriptor::named(
        "pkg",
        "Point",
        TypeDescriptor::structure([Field::new("X", int()), Field::new("Y", int())]),
    )
}

fn person() -> TypeDescriptor {
    TypeDescriptor::structure([
        Field::new("Name", TypeDescriptor::primitive("string")),
        Field::new("Age", int()),
    ])
}

#[derive(Debug, Default, PartialEq)]
struct Celsius(f64);

impl Described for Celsius {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::named("units", "Celsius", f64::type_descriptor())
    }

    fn type_ref() -> TypeDescriptor {
        TypeDescriptor::reference("units", "Celsius")
    }
}

impl FieldEncode for Celsius {
    fn encode_fields(&self, cursor: &mut CursorMut<'_>) -> SerResult<()> {
        self.0.encode_fields(cursor)
    }
}

impl FieldDecode for Celsius {
    fn decode_fields(&mut self, cursor: &mut Cursor<'_>) -> SerResult<()> {
        self.0.decode_fields(cursor)
    }
}

#[test]
fn register_returns_canonical_name() {
    let mut registry = TypeRegistry::new();
    assert_eq!(registry.register(point()).expect("register"), "pkg.Point");
    assert_eq!(
        registry.register(person()).expect("register"),
        "struct { Name string; Age int }"
    );
    assert_eq!(registry.len(), 2);
    assert!(registry.contains(&point()));
}

#[test]
fn identifier_and_type_lookups_are_inverse() {
    let mut registry = TypeRegistry::new();
    registry.register(point()).expect("register point");
    registry.register(person()).expect("register person");

    let id = registry.identifier_of(&point()).expect("point is registered");
    assert_eq!(id.get(), 0x58DA_5686);
    assert_eq!(registry.type_of(id.get()), Ok(&point()));
    assert_eq!(registry.name_of(id.get()), Some("pkg.Point"));

    let id = registry.identifier_of(&person()).expect("person is registered");
    assert_eq!(id.get(), 0xE075_E1E4);
    assert_eq!(registry.type_of(id.get()), Ok(&person()));
}

#[test]
fn explicit_name_drives_identifier() {
    let mut registry = TypeRegistry::new();
    registry.register_name("int", point()).expect("register");

    let id = registry.identifier_of(&point()).expect("registered");
    assert_eq!(id.get(), 0x1451_DAB1);

    let entry = registry.entry(id.get()).expect("entry");
    assert_eq!(entry.name(), "int");
    assert_eq!(entry.type_name(), "pkg.Point");
    assert!(!entry.is_constructible());
}

#[test]
fn empty_name_rejected() {
    let mut registry = TypeRegistry::new();
    assert_eq!(registry.register_name("", point()), Err(RegistryError::EmptyName));
    assert!(registry.is_empty());
}

#[test]
fn invalid_type_rejected() {
    let mut registry = TypeRegistry::new();
    assert_eq!(
        registry.register(TypeDescriptor::invalid()),
        Err(RegistryError::InvalidType)
    );
    assert_eq!(
        registry.register_name("pkg.Nil", TypeDescriptor::invalid()),
        Err(RegistryError::InvalidType)
    );
    assert!(registry.is_empty());
}

#[test]
fn duplicate_registration_rejected() {
    let mut registry = TypeRegistry::new();
    registry.register(point()).expect("first registration");

    let expected = Err(RegistryError::DuplicateRegistration {
        type_name: "pkg.Point".into(),
    });
    assert_eq!(registry.register(point()).map(|_| ()), expected);
    // A second name for the same type would break the bijection too.
    assert_eq!(registry.register_name("pkg.Alias", point()), expected);
    assert_eq!(registry.len(), 1);
}

#[test]
fn zero_checksum_name_rejected() {
    let mut registry = TypeRegistry::new();
    let err = registry
        .register_name("zero.T538ovT0", point())
        .expect_err("name hashes to 0");
    assert_eq!(
        err,
        RegistryError::ReservedIdentifier {
            name: "zero.T538ovT0".into(),
            type_name: "pkg.Point".into(),
        }
    );
    assert!(registry.is_empty());
}

#[test]
fn same_explicit_name_collides() {
    let mut registry = TypeRegistry::new();
    registry.register_name("shared", point()).expect("first");

    let err = registry
        .register_name("shared", person())
        .expect_err("second type under the same name");
    match err {
        RegistryError::IdentifierCollision {
            name,
            existing_name,
            existing_type_name,
            ..
        } => {
            assert_eq!(name, "shared");
            assert_eq!(existing_name, "shared");
            assert_eq!(existing_type_name, "pkg.Point");
        }
        other => panic!("unexpected error: {other}"),
    }

    // The failed registration leaves no trace.
    assert_eq!(registry.len(), 1);
    assert!(!registry.contains(&person()));
}

#[test]
fn checksum_collision_between_distinct_names() {
    let mut registry = TypeRegistry::new();
    registry.register_name("plumless", point()).expect("first");

    let err = registry
        .register_name("buckeroo", person())
        .expect_err("plumless and buckeroo share a CRC-32");
    assert_eq!(
        err,
        RegistryError::IdentifierCollision {
            id: 1_306_201_125,
            name: "buckeroo".into(),
            type_name: "struct { Name string; Age int }".into(),
            existing_name: "plumless".into(),
            existing_type_name: "pkg.Point".into(),
        }
    );
}

#[test]
fn unregistered_type_is_an_error() {
    let registry = TypeRegistry::new();
    assert_eq!(
        registry.identifier_of(&point()),
        Err(RegistryError::UnregisteredType {
            type_name: "pkg.Point".into(),
        })
    );
}

#[test]
fn unknown_and_absent_identifiers_do_not_resolve() {
    let mut registry = TypeRegistry::new();
    registry.register(point()).expect("register");

    assert_eq!(registry.type_of(42), Err(DecodeError::UnknownIdentifier(42)));
    assert_eq!(
        registry.type_of(ABSENT_TYPE_ID),
        Err(DecodeError::UnknownIdentifier(ABSENT_TYPE_ID))
    );
    assert!(registry.entry(ABSENT_TYPE_ID).is_none());
    assert_eq!(registry.name_of(42), None);
}

#[test]
fn identifiers_do_not_depend_on_registration_order() {
    let types = [point(), person(), TypeDescriptor::slice(int()), Celsius::type_descriptor()];

    let mut forward = TypeRegistry::new();
    for ty in &types {
        forward.register(ty.clone()).expect("register");
    }
    let mut backward = TypeRegistry::new();
    for ty in types.iter().rev() {
        backward.register(ty.clone()).expect("register");
    }

    for ty in &types {
        assert_eq!(forward.identifier_of(ty), backward.identifier_of(ty));
    }
}

#[test]
fn register_type_installs_constructor() {
    let mut registry = TypeRegistry::new();
    assert_eq!(registry.register_type::<Celsius>().expect("register"), "units.Celsius");

    let id = registry
        .identifier_of_value(&Celsius(21.5))
        .expect("fast path");
    assert_eq!(Some(id), TypeIdentifier::from_name("units.Celsius"));

    let entry = registry.entry(id.get()).expect("entry");
    assert!(entry.is_constructible());
    let value = entry.construct().expect("constructor");
    assert_eq!(value.downcast_ref::<Celsius>(), Some(&Celsius(0.0)));
}

#[test]
fn value_lookup_falls_back_to_descriptor() {
    let mut registry = TypeRegistry::new();
    registry
        .register(Celsius::type_descriptor())
        .expect("register by descriptor");

    let id = registry.identifier_of_value(&Celsius(1.0)).expect("descriptor path");
    assert_eq!(registry.type_of(id.get()), Ok(&Celsius::type_descriptor()));
    assert!(registry.identifier_of_value(&7u32).is_err());
}

#[test]
fn register_type_as_uses_explicit_name() {
    let mut registry = TypeRegistry::new();
    registry.register_type_as::<Celsius>("temp").expect("register");
    let id = registry.identifier_of_value(&Celsius(3.0)).expect("registered");
    assert_eq!(Some(id), TypeIdentifier::from_name("temp"));
    assert_eq!(registry.name_of(id.get()), Some("temp"));
}

#[test]
fn entries_sorted_by_identifier() {
    let mut registry = TypeRegistry::new();
    registry.register(point()).expect("register");
    registry.register(person()).expect("register");
    registry.register(int()).expect("register");

    let ids: Vec<u32> = registry.entries().iter().map(|e| e.id().get()).collect();
    assert_eq!(ids, vec![0x1451_DAB1, 0x58DA_5686, 0xE075_E1E4]);
}

#[test]
fn frozen_registry_shared_across_threads() {
    let mut registry = TypeRegistry::new();
    registry.register(point()).expect("register");
    registry.register_type::<Celsius>().expect("register");
    let registry = registry.freeze();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for _ in 0..100 {
                    let id = registry.identifier_of(&point()).expect("registered");
                    assert_eq!(registry.type_of(id.get()), Ok(&point()));
                    assert!(registry.identifier_of_value(&Celsius(0.5)).is_ok());
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("lookup thread panicked");
    }
    assert_eq!(registry.len(), 2);
}
