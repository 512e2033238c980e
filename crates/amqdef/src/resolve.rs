// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type reference resolution.
//!
//!
//! Maps a schema-level type reference (a name plus a `multiple` flag) onto a
//! concrete [`EmissionType`]. String dispatch happens exactly once, here;
//! the emitters work from the resolved tagged union. The name lookup index
//! is built once per run and read-only thereafter.

use crate::error::{GenError, GenResult};
use crate::ident::{sanitize, sanitize_lower};
use crate::schema::{Field, Schema, TypeClass, TypeDef};
use std::collections::HashMap;

/// Concrete emission type of a resolved reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmissionType {
    Bool,
    UByte,
    UShort,
    UInt,
    ULong,
    /// Opaque binary payload (`amqp_binary`).
    Binary,
    /// Read-only string (`const char*`).
    Str,
    /// Read-only symbol. Same signature type as `Str`; differs only in
    /// which runtime create/get calls it names in definition bodies.
    Sym,
    /// The runtime's universal dynamic value (`AMQP_VALUE`).
    GenericValue,
    /// Permissive fallback: a sanitized schema name used verbatim. This is
    /// how references to other declared (non-composite) types resolve.
    Named(String),
    /// Opaque handle of a declared composite type. Carries the sanitized
    /// lower-case type name.
    CompositeHandle(String),
}

impl EmissionType {
    /// The type spelling used in emitted signatures.
    pub fn c_type(&self) -> String {
        match self {
            EmissionType::Bool => "bool".into(),
            EmissionType::UByte => "uint8_t".into(),
            EmissionType::UShort => "uint16_t".into(),
            EmissionType::UInt => "uint32_t".into(),
            EmissionType::ULong => "uint64_t".into(),
            EmissionType::Binary => "amqp_binary".into(),
            EmissionType::Str | EmissionType::Sym => "const char*".into(),
            EmissionType::GenericValue => "AMQP_VALUE".into(),
            EmissionType::Named(name) => name.clone(),
            EmissionType::CompositeHandle(lower) => format!("{}_HANDLE", lower.to_uppercase()),
        }
    }

    /// Runtime call that wraps a raw value of this kind into a generic
    /// value. For `GenericValue` itself that is a clone.
    pub fn create_call(&self) -> String {
        match self {
            EmissionType::Bool => "amqpvalue_create_boolean".into(),
            EmissionType::UByte => "amqpvalue_create_ubyte".into(),
            EmissionType::UShort => "amqpvalue_create_ushort".into(),
            EmissionType::UInt => "amqpvalue_create_uint".into(),
            EmissionType::ULong => "amqpvalue_create_ulong".into(),
            EmissionType::Binary => "amqpvalue_create_binary".into(),
            EmissionType::Str => "amqpvalue_create_string".into(),
            EmissionType::Sym => "amqpvalue_create_symbol".into(),
            EmissionType::GenericValue => "amqpvalue_clone".into(),
            EmissionType::Named(name) => format!("amqpvalue_create_{}", name),
            EmissionType::CompositeHandle(lower) => format!("amqpvalue_create_{}", lower),
        }
    }

    /// Runtime call that extracts this kind from a generic value, or `None`
    /// when the item is used directly (generic values).
    pub fn get_call(&self) -> Option<String> {
        match self {
            EmissionType::Bool => Some("amqpvalue_get_boolean".into()),
            EmissionType::UByte => Some("amqpvalue_get_ubyte".into()),
            EmissionType::UShort => Some("amqpvalue_get_ushort".into()),
            EmissionType::UInt => Some("amqpvalue_get_uint".into()),
            EmissionType::ULong => Some("amqpvalue_get_ulong".into()),
            EmissionType::Binary => Some("amqpvalue_get_binary".into()),
            EmissionType::Str => Some("amqpvalue_get_string".into()),
            EmissionType::Sym => Some("amqpvalue_get_symbol".into()),
            EmissionType::GenericValue => None,
            EmissionType::Named(name) => Some(format!("amqpvalue_get_{}", name)),
            EmissionType::CompositeHandle(lower) => Some(format!("amqpvalue_get_{}", lower)),
        }
    }
}

/// Lifecycle of a restricted type's alias target: either an owned narrow
/// representation, or full delegation to the generic-value runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestrictedLifecycle {
    /// The alias narrows to a representation of its own.
    Owned(EmissionType),
    /// Generic-value backed: clone/destroy alias the runtime's own.
    Delegated,
}

impl RestrictedLifecycle {
    pub fn of(source: &EmissionType) -> Self {
        match source {
            EmissionType::GenericValue => RestrictedLifecycle::Delegated,
            other => RestrictedLifecycle::Owned(other.clone()),
        }
    }
}

/// Resolve a primitive type name through the fixed table.
///
/// A `multiple` reference is carried as the generic value type on the wire,
/// unconditionally. An off-table name falls through to a sanitized verbatim
/// type reference; whether that reference actually resolves is checked by
/// [`validate`], not here.
pub fn resolve_primitive(name: &str, multiple: bool) -> EmissionType {
    if multiple {
        return EmissionType::GenericValue;
    }
    match name.to_ascii_lowercase().as_str() {
        "binary" => EmissionType::Binary,
        "boolean" => EmissionType::Bool,
        "uint" => EmissionType::UInt,
        "ubyte" => EmissionType::UByte,
        "ushort" => EmissionType::UShort,
        "ulong" => EmissionType::ULong,
        "string" => EmissionType::Str,
        "symbol" => EmissionType::Sym,
        "map" | "list" | "*" => EmissionType::GenericValue,
        _ => EmissionType::Named(sanitize(name)),
    }
}

/// Resolve a field's emission type.
///
/// A reference to a declared composite type resolves to that type's opaque
/// handle, overriding the primitive table (a declared composite named
/// `list` still resolves to its own handle). `multiple` beats the override.
pub fn resolve_field_type(field: &Field, index: &TypeIndex<'_>) -> EmissionType {
    if field.multiple {
        return EmissionType::GenericValue;
    }
    match index.lookup(&field.type_ref) {
        Some(ty) if ty.class == TypeClass::Composite => {
            EmissionType::CompositeHandle(sanitize_lower(&ty.name))
        }
        _ => resolve_primitive(&field.type_ref, false),
    }
}

/// Name-to-type lookup index, built once per generator run.
pub struct TypeIndex<'a> {
    by_name: HashMap<&'a str, &'a TypeDef>,
}

impl<'a> TypeIndex<'a> {
    /// Build the index. A type name declared twice is a schema integrity
    /// error.
    pub fn build(schema: &'a Schema) -> GenResult<Self> {
        let mut by_name = HashMap::new();
        for (section_index, section) in schema.sections.iter().enumerate() {
            for ty in &section.types {
                if by_name.insert(ty.name.as_str(), ty).is_some() {
                    return Err(GenError::SchemaIntegrity {
                        type_name: ty.name.clone(),
                        section_index,
                        detail: "duplicate type name".into(),
                    });
                }
            }
        }
        Ok(Self { by_name })
    }

    pub fn lookup(&self, name: &str) -> Option<&'a TypeDef> {
        self.by_name.get(name).copied()
    }
}

/// Up-front validation pass: every reference that falls outside the fixed
/// primitive table must name a declared type.
///
/// The permissive fallback is preserved exactly: an off-table name matching
/// any declared type is a valid reference; only a name matching nothing is
/// an error. `multiple` fields never consult their name and are not
/// checked.
pub fn validate(schema: &Schema, index: &TypeIndex<'_>) -> GenResult<()> {
    for (section_index, section) in schema.sections.iter().enumerate() {
        for ty in &section.types {
            for field in &ty.fields {
                if field.multiple {
                    continue;
                }
                if let EmissionType::Named(_) = resolve_primitive(&field.type_ref, false) {
                    if index.lookup(&field.type_ref).is_none() {
                        return Err(GenError::SchemaIntegrity {
                            type_name: ty.name.clone(),
                            section_index,
                            detail: format!(
                                "field `{}` references unknown type `{}`",
                                field.name, field.type_ref
                            ),
                        });
                    }
                }
            }
            if ty.class == TypeClass::Restricted {
                if let EmissionType::Named(_) = resolve_primitive(&ty.source, false) {
                    if index.lookup(&ty.source).is_none() {
                        return Err(GenError::SchemaIntegrity {
                            type_name: ty.name.clone(),
                            section_index,
                            detail: format!("source references unknown type `{}`", ty.source),
                        });
                    }
                }
            }
        }
    }
    Ok(())
}
