// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Structural type descriptors.
//!
//! A `TypeDescriptor` describes the shape of a type (its kind, its declared
//! name when it has one, and its constituents) without any runtime
//! reflection. Descriptors are built explicitly, either with the constructors
//! below or with `#[derive(Described)]`, and are compared structurally: two
//! descriptors with the same shape are the same type for registry purposes.

use std::collections::{BTreeMap, HashMap};

/// Declared name of a type: optional owning namespace plus the type's own name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeName {
    pub namespace: Option<String>,
    pub name: String,
}

impl TypeName {
    /// Name without a namespace (built-in types).
    pub fn builtin(name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            name: name.into(),
        }
    }

    /// Name inside `namespace`. An empty namespace is treated as none.
    pub fn qualified(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        let namespace = namespace.into();
        Self {
            namespace: (!namespace.is_empty()).then_some(namespace),
            name: name.into(),
        }
    }
}

/// Kind of a type, carrying its constituents for composite kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Nil or otherwise unusable descriptor.
    Invalid,
    /// Built-in scalar (always named).
    Primitive,
    /// By-name reference to a declared type. Its structure lives with the
    /// declaring descriptor; this node is what breaks recursive cycles.
    Ref,
    Pointer(Box<TypeDescriptor>),
    Array {
        len: usize,
        elem: Box<TypeDescriptor>,
    },
    Slice(Box<TypeDescriptor>),
    Struct(Vec<Field>),
    Map {
        key: Box<TypeDescriptor>,
        value: Box<TypeDescriptor>,
    },
    Interface(Vec<Method>),
    Func(FuncSig),
}

/// One struct member, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    pub name: String,
    pub ty: TypeDescriptor,
    pub embedded: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
            embedded: false,
        }
    }

    /// Embedded member; it takes the name of its type and renders without one.
    pub fn embedded(ty: TypeDescriptor) -> Self {
        let name = ty.name().map(|n| n.name.clone()).unwrap_or_default();
        Self {
            name,
            ty,
            embedded: true,
        }
    }
}

/// Parameter and result lists of a function or method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FuncSig {
    pub params: Vec<TypeDescriptor>,
    pub results: Vec<TypeDescriptor>,
}

impl FuncSig {
    pub fn new(
        params: impl IntoIterator<Item = TypeDescriptor>,
        results: impl IntoIterator<Item = TypeDescriptor>,
    ) -> Self {
        Self {
            params: params.into_iter().collect(),
            results: results.into_iter().collect(),
        }
    }
}

/// One interface method, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Method {
    pub name: String,
    pub signature: FuncSig,
}

impl Method {
    pub fn new(name: impl Into<String>, signature: FuncSig) -> Self {
        Self {
            name: name.into(),
            signature,
        }
    }
}

/// Structural description of a type.
///
/// Fields are private so that the constructors can uphold the invariant that
/// `Primitive` and `Ref` descriptors always carry a declared name.
///
/// # Example
///
/// ```
/// use typereg::{Field, TypeDescriptor};
///
/// let person = TypeDescriptor::structure([
///     Field::new("Name", TypeDescriptor::primitive("string")),
///     Field::new("Age", TypeDescriptor::primitive("int")),
/// ]);
/// assert_eq!(typereg::canonical_name(&person), "struct { Name string; Age int }");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    name: Option<TypeName>,
    kind: TypeKind,
}

impl TypeDescriptor {
    /// The nil descriptor.
    pub const fn invalid() -> Self {
        Self {
            name: None,
            kind: TypeKind::Invalid,
        }
    }

    /// Built-in scalar with no namespace (`int`, `string`, `u64`, ...).
    pub fn primitive(name: impl Into<String>) -> Self {
        Self {
            name: Some(TypeName::builtin(name)),
            kind: TypeKind::Primitive,
        }
    }

    /// Declared type `namespace.name` whose underlying shape is `underlying`.
    pub fn named(
        namespace: impl Into<String>,
        name: impl Into<String>,
        underlying: TypeDescriptor,
    ) -> Self {
        Self {
            name: Some(TypeName::qualified(namespace, name)),
            kind: underlying.kind,
        }
    }

    /// By-name reference to a declared type.
    pub fn reference(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: Some(TypeName::qualified(namespace, name)),
            kind: TypeKind::Ref,
        }
    }

    pub fn pointer(elem: TypeDescriptor) -> Self {
        Self::unnamed(TypeKind::Pointer(Box::new(elem)))
    }

    pub fn array(len: usize, elem: TypeDescriptor) -> Self {
        Self::unnamed(TypeKind::Array {
            len,
            elem: Box::new(elem),
        })
    }

    pub fn slice(elem: TypeDescriptor) -> Self {
        Self::unnamed(TypeKind::Slice(Box::new(elem)))
    }

    pub fn structure(fields: impl IntoIterator<Item = Field>) -> Self {
        Self::unnamed(TypeKind::Struct(fields.into_iter().collect()))
    }

    pub fn map(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        Self::unnamed(TypeKind::Map {
            key: Box::new(key),
            value: Box::new(value),
        })
    }

    pub fn interface(methods: impl IntoIterator<Item = Method>) -> Self {
        Self::unnamed(TypeKind::Interface(methods.into_iter().collect()))
    }

    pub fn func(
        params: impl IntoIterator<Item = TypeDescriptor>,
        results: impl IntoIterator<Item = TypeDescriptor>,
    ) -> Self {
        Self::unnamed(TypeKind::Func(FuncSig::new(params, results)))
    }

    fn unnamed(kind: TypeKind) -> Self {
        Self { name: None, kind }
    }

    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    pub fn name(&self) -> Option<&TypeName> {
        self.name.as_ref()
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self.kind, TypeKind::Invalid)
    }

    /// Descriptor to embed when this type appears inside another type.
    ///
    /// Declared types collapse to a `Ref` node; unnamed shapes are cloned.
    #[must_use]
    pub fn to_ref(&self) -> TypeDescriptor {
        match &self.name {
            Some(name) if !matches!(self.kind, TypeKind::Primitive) => Self {
                name: Some(name.clone()),
                kind: TypeKind::Ref,
            },
            _ => self.clone(),
        }
    }
}

impl Default for TypeDescriptor {
    fn default() -> Self {
        Self::invalid()
    }
}

/// Types that can describe their own shape.
///
/// `type_descriptor` returns the full shape and is what gets registered.
/// `type_ref` is what other types embed when they contain `Self`; for
/// declared types it must not recurse into the structure, otherwise a
/// self-referential type would never finish describing itself.
pub trait Described {
    fn type_descriptor() -> TypeDescriptor;

    fn type_ref() -> TypeDescriptor {
        Self::type_descriptor()
    }
}

macro_rules! impl_described_primitive {
    ($($ty:ty => $name:expr),* $(,)?) => {
        $(
            impl Described for $ty {
                fn type_descriptor() -> TypeDescriptor {
                    TypeDescriptor::primitive($name)
                }
            }
        )*
    };
}

impl_described_primitive! {
    bool => "bool",
    i8 => "i8",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    f32 => "f32",
    f64 => "f64",
    char => "char",
    String => "String",
}

impl Described for () {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::structure([])
    }
}

impl<T: Described> Described for Vec<T> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::slice(T::type_ref())
    }
}

impl<T: Described, const N: usize> Described for [T; N] {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::array(N, T::type_ref())
    }
}

impl<T: Described> Described for Option<T> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::pointer(T::type_ref())
    }
}

impl<T: Described> Described for Box<T> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::pointer(T::type_ref())
    }
}

impl<K: Described, V: Described, S> Described for HashMap<K, V, S> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::map(K::type_ref(), V::type_ref())
    }
}

impl<K: Described, V: Described> Described for BTreeMap<K, V> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::map(K::type_ref(), V::type_ref())
    }
}
