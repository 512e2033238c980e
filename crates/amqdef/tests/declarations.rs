// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use amqdef::{Choice, Field, Generator, Schema, Section, TypeDef};

fn generate_one(types: Vec<TypeDef>) -> Vec<amqdef::TypeArtifact> {
    let schema = Schema::new(vec![Section::new("transport").with_types(types)]);
    let generator = Generator::new(&schema).expect("schema should validate");
    generator.generate().expect("emission should succeed").per_type
}

#[test]
fn composite_declaration_set_is_exact() {
    let artifacts = generate_one(vec![TypeDef::composite("error")
        .with_descriptor("0x00000000:0x0000001d")
        .with_fields(vec![
            Field::new("condition", "symbol").mandatory(),
            Field::new("description", "string").mandatory(),
        ])]);
    let decls = &artifacts[0].declarations;

    assert!(decls.contains("typedef struct ERROR_INSTANCE_TAG* ERROR_HANDLE;"));
    assert!(decls.contains(
        "ERROR_HANDLE error_create(const char* condition_value, const char* description_value);"
    ));
    assert!(decls.contains("ERROR_HANDLE error_clone(ERROR_HANDLE value);"));
    assert!(decls.contains("void error_destroy(ERROR_HANDLE error);"));
    assert!(decls.contains("int amqpvalue_get_error(AMQP_VALUE value, ERROR_HANDLE* error_handle);"));
    assert!(decls.contains("AMQP_VALUE amqpvalue_create_error(ERROR_HANDLE error);"));

    // Exactly one handle, one discriminator test, two accessor pairs.
    assert_eq!(decls.matches("typedef struct").count(), 1);
    assert_eq!(
        decls
            .matches("bool is_error_type_by_descriptor(AMQP_VALUE descriptor);")
            .count(),
        1
    );
    assert_eq!(decls.matches("int error_get_").count(), 2);
    assert_eq!(decls.matches("int error_set_").count(), 2);
    assert!(decls.contains(
        "int error_get_condition(ERROR_HANDLE error, const char** condition_value);"
    ));
    assert!(decls.contains(
        "int error_set_description(ERROR_HANDLE error, const char* description_value);"
    ));
}

#[test]
fn zero_mandatory_fields_constructor_takes_void() {
    let artifacts = generate_one(vec![TypeDef::composite("heartbeat")
        .with_descriptor("0x00000000:0x00000018")]);
    assert!(artifacts[0]
        .declarations
        .contains("HEARTBEAT_HANDLE heartbeat_create(void);"));
}

#[test]
fn optional_fields_still_get_accessors_but_no_constructor_arg() {
    let artifacts = generate_one(vec![TypeDef::composite("begin")
        .with_descriptor("0x00000000:0x00000011")
        .with_fields(vec![
            Field::new("next-outgoing-id", "transfer-number"),
            Field::new("incoming-window", "uint").mandatory(),
        ]), TypeDef::restricted("transfer-number", "uint")]);
    let decls = &artifacts[0].declarations;

    assert!(decls.contains("BEGIN_HANDLE begin_create(uint32_t incoming_window_value);"));
    assert!(decls.contains(
        "int begin_get_next_outgoing_id(BEGIN_HANDLE begin, transfer_number* next_outgoing_id_value);"
    ));
}

#[test]
fn composite_field_resolves_to_handle_type() {
    let artifacts = generate_one(vec![
        TypeDef::composite("delivery-annotations").with_descriptor("0x00000000:0x00000071"),
        TypeDef::composite("message").with_fields(vec![Field::new(
            "annotations",
            "delivery-annotations",
        )]),
    ]);
    let message = &artifacts[1].declarations;

    assert!(message.contains(
        "int message_get_annotations(MESSAGE_HANDLE message, DELIVERY_ANNOTATIONS_HANDLE* annotations_value);"
    ));
    assert!(message.contains(
        "int message_set_annotations(MESSAGE_HANDLE message, DELIVERY_ANNOTATIONS_HANDLE annotations_value);"
    ));
}

#[test]
fn multiple_field_is_generic_regardless_of_type() {
    let artifacts = generate_one(vec![TypeDef::composite("open").with_fields(vec![
        Field::new("max-frame-size", "uint").multiple(),
    ])]);
    let decls = &artifacts[0].declarations;

    assert!(decls.contains(
        "int open_get_max_frame_size(OPEN_HANDLE open, AMQP_VALUE* max_frame_size_value);"
    ));
    assert!(!decls.contains("uint32_t"));
}

#[test]
fn restricted_narrow_source_emits_typedef_and_constructor() {
    let artifacts = generate_one(vec![TypeDef::restricted("seconds", "uint")]);
    let decls = &artifacts[0].declarations;

    assert!(decls.contains("typedef uint32_t seconds;"));
    assert!(decls.contains("AMQP_VALUE amqpvalue_create_seconds(uint32_t value);"));
    assert!(decls.contains("#define amqpvalue_get_seconds amqpvalue_get_uint"));
    // Narrow aliases own their representation; no lifecycle delegation.
    assert!(!decls.contains("seconds_clone"));
    assert!(!decls.contains("seconds_destroy"));
}

#[test]
fn restricted_generic_source_aliases_runtime_lifecycle() {
    let artifacts = generate_one(vec![TypeDef::restricted("application-properties", "map")
        .with_descriptor("0x00000000:0x00000074")]);
    let decls = &artifacts[0].declarations;

    assert!(decls.contains("typedef AMQP_VALUE application_properties;"));
    assert!(decls.contains(
        "AMQP_VALUE amqpvalue_create_application_properties(AMQP_VALUE value);"
    ));
    assert!(decls.contains("#define application_properties_clone amqpvalue_clone"));
    assert!(decls.contains("#define application_properties_destroy amqpvalue_destroy"));
    assert!(decls.contains(
        "bool is_application_properties_type_by_descriptor(AMQP_VALUE descriptor);"
    ));
    assert!(decls.contains("#define amqpvalue_get_application_properties amqpvalue_get_map"));
}

#[test]
fn restricted_without_descriptor_has_no_discriminator_test() {
    let artifacts = generate_one(vec![TypeDef::restricted("role", "boolean")]);
    assert!(!artifacts[0].declarations.contains("type_by_descriptor"));
}

#[test]
fn restricted_over_restricted_aliases_by_name() {
    let artifacts = generate_one(vec![
        TypeDef::restricted("sequence-no", "uint"),
        TypeDef::restricted("transfer-number", "sequence-no"),
    ]);
    let decls = &artifacts[1].declarations;

    assert!(decls.contains("typedef sequence_no transfer_number;"));
    assert!(decls.contains("AMQP_VALUE amqpvalue_create_transfer_number(sequence_no value);"));
    assert!(decls.contains("#define amqpvalue_get_transfer_number amqpvalue_get_sequence_no"));
}

#[test]
fn symbol_choices_stay_quoted_and_unnormalized() {
    let artifacts = generate_one(vec![TypeDef::restricted("dist-mode", "symbol")
        .with_choices(vec![Choice::new("at-most-once", "amqp:at-most-once:list")])]);
    assert!(artifacts[0]
        .declarations
        .contains("#define dist_mode_at_most_once \"amqp:at-most-once:list\""));
}

#[test]
fn non_symbol_choices_are_normalized_and_unquoted() {
    let artifacts = generate_one(vec![TypeDef::restricted("delivery-policy", "uint")
        .with_choices(vec![Choice::new("at-most-once", "amqp:at-most-once:list")])]);
    let decls = &artifacts[0].declarations;

    assert!(decls.contains("#define delivery_policy_at_most_once amqp_at_most_once_list"));
    assert!(!decls.contains("\"amqp:at-most-once:list\""));
}

#[test]
fn choice_order_is_preserved() {
    let artifacts = generate_one(vec![TypeDef::restricted("role", "boolean").with_choices(vec![
        Choice::new("sender", "false"),
        Choice::new("receiver", "true"),
    ])]);
    let decls = &artifacts[0].declarations;

    let sender = decls.find("#define role_sender false").unwrap();
    let receiver = decls.find("#define role_receiver true").unwrap();
    assert!(sender < receiver);
}
