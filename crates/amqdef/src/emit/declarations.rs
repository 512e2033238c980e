// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-type declaration units.
//!
//!
//! One self-contained set of binding declarations per declared type: handle
//! type, lifecycle functions, accessors, discriminator test, encode/decode
//! aliasing and choice constants. Surface formatting (guards, includes) is
//! the caller's concern; this module's contract is which declarations
//! exist, in what order, with what signatures.

use crate::ident::{sanitize, sanitize_lower, sanitize_upper};
use crate::resolve::{resolve_field_type, resolve_primitive, RestrictedLifecycle, TypeIndex};
use crate::schema::{TypeClass, TypeDef};

/// Emit the declaration unit for one type.
pub fn emit_type_declarations(ty: &TypeDef, index: &TypeIndex<'_>) -> String {
    match ty.class {
        TypeClass::Composite => emit_composite(ty, index),
        TypeClass::Restricted => emit_restricted(ty),
    }
}

fn emit_composite(ty: &TypeDef, index: &TypeIndex<'_>) -> String {
    let lower = sanitize_lower(&ty.name);
    let upper = sanitize_upper(&ty.name);
    let mut out = String::new();

    out.push_str(&format!(
        "typedef struct {upper}_INSTANCE_TAG* {upper}_HANDLE;\n\n"
    ));

    out.push_str(&format!(
        "{upper}_HANDLE {lower}_create({});\n",
        mandatory_param_list(ty, index)
    ));
    out.push_str(&format!("{upper}_HANDLE {lower}_clone({upper}_HANDLE value);\n"));
    out.push_str(&format!("void {lower}_destroy({upper}_HANDLE {lower});\n"));
    out.push_str(&format!(
        "bool is_{lower}_type_by_descriptor(AMQP_VALUE descriptor);\n"
    ));
    out.push_str(&format!(
        "int amqpvalue_get_{lower}(AMQP_VALUE value, {upper}_HANDLE* {lower}_handle);\n"
    ));
    out.push_str(&format!(
        "AMQP_VALUE amqpvalue_create_{lower}({upper}_HANDLE {lower});\n"
    ));

    if !ty.fields.is_empty() {
        out.push('\n');
    }
    for field in &ty.fields {
        let field_name = sanitize_lower(&field.name);
        let c_type = resolve_field_type(field, index).c_type();
        out.push_str(&format!(
            "int {lower}_get_{field_name}({upper}_HANDLE {lower}, {c_type}* {field_name}_value);\n"
        ));
        out.push_str(&format!(
            "int {lower}_set_{field_name}({upper}_HANDLE {lower}, {c_type} {field_name}_value);\n"
        ));
    }

    out
}

/// Constructor parameters: one per mandatory field, in field order. A type
/// with no mandatory fields takes an explicit `void` marker.
fn mandatory_param_list(ty: &TypeDef, index: &TypeIndex<'_>) -> String {
    let params: Vec<String> = ty
        .fields
        .iter()
        .filter(|f| f.mandatory)
        .map(|f| {
            format!(
                "{} {}_value",
                resolve_field_type(f, index).c_type(),
                sanitize_lower(&f.name)
            )
        })
        .collect();
    if params.is_empty() {
        "void".into()
    } else {
        params.join(", ")
    }
}

fn emit_restricted(ty: &TypeDef) -> String {
    let lower = sanitize_lower(&ty.name);
    let source_type = resolve_primitive(&ty.source, false);
    let mut out = String::new();

    out.push_str(&format!("typedef {} {lower};\n\n", source_type.c_type()));

    match RestrictedLifecycle::of(&source_type) {
        RestrictedLifecycle::Owned(narrow) => {
            out.push_str(&format!(
                "AMQP_VALUE amqpvalue_create_{lower}({} value);\n",
                narrow.c_type()
            ));
        }
        RestrictedLifecycle::Delegated => {
            // No narrower representation to manage; lifecycle is the
            // runtime's own.
            out.push_str(&format!(
                "AMQP_VALUE amqpvalue_create_{lower}(AMQP_VALUE value);\n"
            ));
            out.push_str(&format!("#define {lower}_clone amqpvalue_clone\n"));
            out.push_str(&format!("#define {lower}_destroy amqpvalue_destroy\n"));
        }
    }

    if ty.descriptor.is_some() {
        out.push_str(&format!(
            "bool is_{lower}_type_by_descriptor(AMQP_VALUE descriptor);\n"
        ));
    }

    // Restricted types never introduce decode logic, only renaming.
    out.push_str(&format!(
        "#define amqpvalue_get_{lower} amqpvalue_get_{}\n",
        sanitize(&ty.source)
    ));

    if !ty.choices.is_empty() {
        out.push('\n');
    }
    for choice in &ty.choices {
        let choice_name = sanitize(&choice.name);
        if ty.source == "symbol" {
            // Symbol constants keep the raw schema value as a string
            // literal, unnormalized.
            out.push_str(&format!(
                "#define {lower}_{choice_name} \"{}\"\n",
                choice.value
            ));
        } else {
            out.push_str(&format!(
                "#define {lower}_{choice_name} {}\n",
                sanitize(&choice.value)
            ));
        }
    }

    out
}
