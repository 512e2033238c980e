// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-type definition units.
//!
//!
//! Concrete bodies for the declared functions. Everything delegates to the
//! generic-value runtime (`amqpvalue_*`); no value semantics are
//! implemented here. Composite instances wrap a single described composite
//! value; field accessors index it by schema field position. The caller
//! decodes the descriptor code up front and passes the 64-bit value in.

use crate::ident::{sanitize_lower, sanitize_upper};
use crate::resolve::{
    resolve_field_type, resolve_primitive, EmissionType, RestrictedLifecycle, TypeIndex,
};
use crate::schema::{TypeClass, TypeDef};

/// Emit the definition unit for one type.
pub fn emit_type_definitions(
    ty: &TypeDef,
    index: &TypeIndex<'_>,
    descriptor_code: Option<u64>,
) -> String {
    match ty.class {
        TypeClass::Composite => emit_composite(ty, index, descriptor_code),
        TypeClass::Restricted => emit_restricted(ty, descriptor_code),
    }
}

fn emit_composite(ty: &TypeDef, index: &TypeIndex<'_>, descriptor_code: Option<u64>) -> String {
    let lower = sanitize_lower(&ty.name);
    let upper = sanitize_upper(&ty.name);
    let mut out = String::new();

    out.push_str(&format!(
        "typedef struct {upper}_INSTANCE_TAG\n{{\n    AMQP_VALUE composite_value;\n}} {upper}_INSTANCE;\n\n"
    ));

    out.push_str(&emit_composite_create(ty, index, descriptor_code));
    out.push_str(&emit_composite_clone(&lower, &upper));
    out.push_str(&emit_composite_destroy(&lower, &upper));
    out.push_str(&emit_descriptor_test(&lower, descriptor_code));
    out.push_str(&emit_composite_decode(&lower, &upper));
    out.push_str(&emit_composite_encode(&lower, &upper));

    for (position, field) in ty.fields.iter().enumerate() {
        let field_type = resolve_field_type(field, index);
        out.push_str(&emit_field_get(&lower, &upper, field, &field_type, position));
        out.push_str(&emit_field_set(&lower, &upper, field, &field_type, position));
    }

    out
}

fn emit_composite_create(
    ty: &TypeDef,
    index: &TypeIndex<'_>,
    descriptor_code: Option<u64>,
) -> String {
    let lower = sanitize_lower(&ty.name);
    let upper = sanitize_upper(&ty.name);

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
    let param_list = if params.is_empty() {
        "void".to_string()
    } else {
        params.join(", ")
    };

    let create_value = match descriptor_code {
        Some(code) => format!(
            "amqpvalue_create_composite_with_ulong_descriptor(0x{code:016X})"
        ),
        None => "amqpvalue_create_list()".to_string(),
    };

    let mut out = format!(
        "{upper}_HANDLE {lower}_create({param_list})\n\
         {{\n\
         \x20   {upper}_INSTANCE* {lower}_instance = ({upper}_INSTANCE*)malloc(sizeof({upper}_INSTANCE));\n\
         \x20   if ({lower}_instance != NULL)\n\
         \x20   {{\n\
         \x20       {lower}_instance->composite_value = {create_value};\n\
         \x20       if ({lower}_instance->composite_value == NULL)\n\
         \x20       {{\n\
         \x20           free({lower}_instance);\n\
         \x20           {lower}_instance = NULL;\n\
         \x20       }}\n"
    );

    let setters: Vec<String> = ty
        .fields
        .iter()
        .filter(|f| f.mandatory)
        .map(|f| {
            let field_name = sanitize_lower(&f.name);
            format!("({lower}_set_{field_name}({lower}_instance, {field_name}_value) != 0)")
        })
        .collect();
    if !setters.is_empty() {
        out.push_str(&format!(
            "        else if ({})\n\
             \x20       {{\n\
             \x20           {lower}_destroy({lower}_instance);\n\
             \x20           {lower}_instance = NULL;\n\
             \x20       }}\n",
            setters.join(" ||\n            ")
        ));
    }

    out.push_str(&format!(
        "    }}\n\
         \x20   return {lower}_instance;\n\
         }}\n\n"
    ));
    out
}

fn emit_composite_clone(lower: &str, upper: &str) -> String {
    format!(
        "{upper}_HANDLE {lower}_clone({upper}_HANDLE value)\n\
         {{\n\
         \x20   {upper}_INSTANCE* {lower}_instance = ({upper}_INSTANCE*)malloc(sizeof({upper}_INSTANCE));\n\
         \x20   if ({lower}_instance != NULL)\n\
         \x20   {{\n\
         \x20       {lower}_instance->composite_value = amqpvalue_clone(value->composite_value);\n\
         \x20       if ({lower}_instance->composite_value == NULL)\n\
         \x20       {{\n\
         \x20           free({lower}_instance);\n\
         \x20           {lower}_instance = NULL;\n\
         \x20       }}\n\
         \x20   }}\n\
         \x20   return {lower}_instance;\n\
         }}\n\n"
    )
}

fn emit_composite_destroy(lower: &str, upper: &str) -> String {
    format!(
        "void {lower}_destroy({upper}_HANDLE {lower})\n\
         {{\n\
         \x20   if ({lower} != NULL)\n\
         \x20   {{\n\
         \x20       amqpvalue_destroy({lower}->composite_value);\n\
         \x20       free({lower});\n\
         \x20   }}\n\
         }}\n\n"
    )
}

fn emit_descriptor_test(lower: &str, descriptor_code: Option<u64>) -> String {
    match descriptor_code {
        Some(code) => format!(
            "bool is_{lower}_type_by_descriptor(AMQP_VALUE descriptor)\n\
             {{\n\
             \x20   uint64_t descriptor_ulong;\n\
             \x20   return (amqpvalue_get_ulong(descriptor, &descriptor_ulong) == 0) &&\n\
             \x20       (descriptor_ulong == 0x{code:016X});\n\
             }}\n\n"
        ),
        None => format!(
            "bool is_{lower}_type_by_descriptor(AMQP_VALUE descriptor)\n\
             {{\n\
             \x20   (void)descriptor;\n\
             \x20   return false;\n\
             }}\n\n"
        ),
    }
}

fn emit_composite_decode(lower: &str, upper: &str) -> String {
    format!(
        "int amqpvalue_get_{lower}(AMQP_VALUE value, {upper}_HANDLE* {lower}_handle)\n\
         {{\n\
         \x20   int result;\n\
         \x20   AMQP_VALUE descriptor = amqpvalue_get_inplace_descriptor(value);\n\
         \x20   if ((descriptor == NULL) || !is_{lower}_type_by_descriptor(descriptor))\n\
         \x20   {{\n\
         \x20       result = 1;\n\
         \x20   }}\n\
         \x20   else\n\
         \x20   {{\n\
         \x20       {upper}_INSTANCE* {lower}_instance = ({upper}_INSTANCE*)malloc(sizeof({upper}_INSTANCE));\n\
         \x20       if ({lower}_instance == NULL)\n\
         \x20       {{\n\
         \x20           result = 1;\n\
         \x20       }}\n\
         \x20       else\n\
         \x20       {{\n\
         \x20           {lower}_instance->composite_value = amqpvalue_clone(value);\n\
         \x20           *{lower}_handle = {lower}_instance;\n\
         \x20           result = 0;\n\
         \x20       }}\n\
         \x20   }}\n\
         \x20   return result;\n\
         }}\n\n"
    )
}

fn emit_composite_encode(lower: &str, upper: &str) -> String {
    format!(
        "AMQP_VALUE amqpvalue_create_{lower}({upper}_HANDLE {lower})\n\
         {{\n\
         \x20   AMQP_VALUE result;\n\
         \x20   if ({lower} == NULL)\n\
         \x20   {{\n\
         \x20       result = NULL;\n\
         \x20   }}\n\
         \x20   else\n\
         \x20   {{\n\
         \x20       result = amqpvalue_clone({lower}->composite_value);\n\
         \x20   }}\n\
         \x20   return result;\n\
         }}\n\n"
    )
}

fn emit_field_get(
    lower: &str,
    upper: &str,
    field: &crate::schema::Field,
    field_type: &EmissionType,
    position: usize,
) -> String {
    let field_name = sanitize_lower(&field.name);
    let c_type = field_type.c_type();

    let extract = match field_type.get_call() {
        Some(get_call) => format!(
            "        else if ({get_call}(item_value, {field_name}_value) != 0)\n\
             \x20       {{\n\
             \x20           result = 1;\n\
             \x20       }}\n\
             \x20       else\n\
             \x20       {{\n\
             \x20           result = 0;\n\
             \x20       }}\n"
        ),
        // Generic values are handed out in place.
        None => format!(
            "        else\n\
             \x20       {{\n\
             \x20           *{field_name}_value = item_value;\n\
             \x20           result = 0;\n\
             \x20       }}\n"
        ),
    };

    format!(
        "int {lower}_get_{field_name}({upper}_HANDLE {lower}, {c_type}* {field_name}_value)\n\
         {{\n\
         \x20   int result;\n\
         \x20   if ({lower} == NULL)\n\
         \x20   {{\n\
         \x20       result = 1;\n\
         \x20   }}\n\
         \x20   else\n\
         \x20   {{\n\
         \x20       AMQP_VALUE item_value = amqpvalue_get_composite_item_in_place({lower}->composite_value, {position});\n\
         \x20       if ((item_value == NULL) || (amqpvalue_get_type(item_value) == AMQP_TYPE_NULL))\n\
         \x20       {{\n\
         \x20           result = 1;\n\
         \x20       }}\n\
         {extract}\
         \x20   }}\n\
         \x20   return result;\n\
         }}\n\n"
    )
}

fn emit_field_set(
    lower: &str,
    upper: &str,
    field: &crate::schema::Field,
    field_type: &EmissionType,
    position: usize,
) -> String {
    let field_name = sanitize_lower(&field.name);
    let c_type = field_type.c_type();
    let create_call = field_type.create_call();

    format!(
        "int {lower}_set_{field_name}({upper}_HANDLE {lower}, {c_type} {field_name}_value)\n\
         {{\n\
         \x20   int result;\n\
         \x20   if ({lower} == NULL)\n\
         \x20   {{\n\
         \x20       result = 1;\n\
         \x20   }}\n\
         \x20   else\n\
         \x20   {{\n\
         \x20       AMQP_VALUE item_value = {create_call}({field_name}_value);\n\
         \x20       if (item_value == NULL)\n\
         \x20       {{\n\
         \x20           result = 1;\n\
         \x20       }}\n\
         \x20       else\n\
         \x20       {{\n\
         \x20           if (amqpvalue_set_composite_item({lower}->composite_value, {position}, item_value) != 0)\n\
         \x20           {{\n\
         \x20               result = 1;\n\
         \x20           }}\n\
         \x20           else\n\
         \x20           {{\n\
         \x20               result = 0;\n\
         \x20           }}\n\
         \x20           amqpvalue_destroy(item_value);\n\
         \x20       }}\n\
         \x20   }}\n\
         \x20   return result;\n\
         }}\n\n"
    )
}

fn emit_restricted(ty: &TypeDef, descriptor_code: Option<u64>) -> String {
    let lower = sanitize_lower(&ty.name);
    let source_type = resolve_primitive(&ty.source, false);
    let mut out = String::new();

    match RestrictedLifecycle::of(&source_type) {
        RestrictedLifecycle::Owned(narrow) => {
            let create_call = narrow.create_call();
            out.push_str(&format!(
                "AMQP_VALUE amqpvalue_create_{lower}({} value)\n\
                 {{\n\
                 \x20   return {create_call}(value);\n\
                 }}\n\n",
                narrow.c_type()
            ));
        }
        RestrictedLifecycle::Delegated => {
            out.push_str(&format!(
                "AMQP_VALUE amqpvalue_create_{lower}(AMQP_VALUE value)\n\
                 {{\n\
                 \x20   return amqpvalue_clone(value);\n\
                 }}\n\n"
            ));
        }
    }

    if descriptor_code.is_some() {
        out.push_str(&emit_descriptor_test(&lower, descriptor_code));
    }

    out
}
