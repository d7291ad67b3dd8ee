// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Canonical type signatures.
//!
//! Renders a `TypeDescriptor` into the deterministic textual name that feeds
//! the identifier hash. The output depends only on the descriptor's shape.
//!
//! # Grammar
//!
//! ```text
//! invalid     <nil>
//! declared    ns.Name | Name
//! pointer     *T
//! array       [N]T
//! slice       []T
//! struct      struct { A T; U; B V }       (embedded U has no name)
//! empty       struct {}
//! map         map[K]V
//! interface   interface { Read([]u8) (i64, error); Close() error }
//! func        func(A, B) | func(A) R | func() (R, S)
//! ```

use std::fmt::Write;

use crate::descriptor::{Described, FuncSig, TypeDescriptor, TypeKind};

/// Rendering of the nil descriptor.
pub const NIL_SIGNATURE: &str = "<nil>";

/// Canonical name of `ty`.
pub fn canonical_name(ty: &TypeDescriptor) -> String {
    let mut buf = String::with_capacity(64);
    write_signature(&mut buf, ty);
    buf
}

/// Canonical name of a `Described` type.
pub fn canonical_name_of<T: Described + ?Sized>() -> String {
    canonical_name(&T::type_descriptor())
}

/// Append the canonical name of `ty` to `buf`.
///
/// Recursion depth equals the nesting depth of `ty`; declared names and `Ref`
/// nodes are leaves.
pub fn write_signature(buf: &mut String, ty: &TypeDescriptor) {
    if !ty.is_valid() {
        buf.push_str(NIL_SIGNATURE);
        return;
    }

    if let Some(name) = ty.name() {
        if let Some(namespace) = &name.namespace {
            buf.push_str(namespace);
            buf.push('.');
        }
        buf.push_str(&name.name);
        return;
    }

    match ty.kind() {
        TypeKind::Pointer(elem) => {
            buf.push('*');
            write_signature(buf, elem);
        }
        TypeKind::Array { len, elem } => {
            // Writing into a String cannot fail.
            let _ = write!(buf, "[{}]", len);
            write_signature(buf, elem);
        }
        TypeKind::Slice(elem) => {
            buf.push_str("[]");
            write_signature(buf, elem);
        }
        TypeKind::Struct(fields) => {
            buf.push_str("struct {");
            write_block(buf, fields, |buf, field| {
                if !field.embedded {
                    buf.push_str(&field.name);
                    buf.push(' ');
                }
                write_signature(buf, &field.ty);
            });
        }
        TypeKind::Map { key, value } => {
            buf.push_str("map[");
            write_signature(buf, key);
            buf.push(']');
            write_signature(buf, value);
        }
        TypeKind::Interface(methods) => {
            buf.push_str("interface {");
            write_block(buf, methods, |buf, method| {
                buf.push_str(&method.name);
                write_func_tail(buf, &method.signature);
            });
        }
        TypeKind::Func(sig) => {
            buf.push_str("func");
            write_func_tail(buf, sig);
        }
        // Unnamed primitives and refs cannot be constructed; render them as nil
        // rather than as an empty string.
        TypeKind::Invalid | TypeKind::Primitive | TypeKind::Ref => buf.push_str(NIL_SIGNATURE),
    }
}

/// `{ a; b }` or `{}`; the opening brace is already written.
fn write_block<T>(buf: &mut String, items: &[T], mut item: impl FnMut(&mut String, &T)) {
    if items.is_empty() {
        buf.push('}');
        return;
    }
    buf.push(' ');
    for (i, it) in items.iter().enumerate() {
        if i > 0 {
            buf.push_str("; ");
        }
        item(buf, it);
    }
    buf.push_str(" }");
}

/// `(params)` followed by nothing, ` R` or ` (R, S)`.
fn write_func_tail(buf: &mut String, sig: &FuncSig) {
    buf.push('(');
    write_list(buf, &sig.params);
    buf.push(')');

    match sig.results.as_slice() {
        [] => {}
        [single] => {
            buf.push(' ');
            write_signature(buf, single);
        }
        many => {
            buf.push_str(" (");
            write_list(buf, many);
            buf.push(')');
        }
    }
}

fn write_list(buf: &mut String, types: &[TypeDescriptor]) {
    for (i, ty) in types.iter().enumerate() {
        if i > 0 {
            buf.push_str(", ");
        }
        write_signature(buf, ty);
    }
}
