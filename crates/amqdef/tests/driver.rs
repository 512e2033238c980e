// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use amqdef::{Field, GenError, Generator, Schema, Section, TypeDef};

fn two_section_schema() -> Schema {
    Schema::new(vec![
        Section::new("transport").with_types(vec![
            TypeDef::composite("open")
                .with_descriptor("0x00000000:0x00000010")
                .with_fields(vec![Field::new("container-id", "string").mandatory()]),
            TypeDef::restricted("role", "boolean"),
        ]),
        Section::new("messaging").with_types(vec![TypeDef::restricted("seconds", "uint")]),
    ])
}

#[test]
fn emission_order_follows_schema_order() {
    let schema = two_section_schema();
    let artifacts = Generator::new(&schema).unwrap().generate().unwrap();

    let names: Vec<&str> = artifacts
        .per_type
        .iter()
        .map(|a| a.type_name.as_str())
        .collect();
    assert_eq!(names, ["open", "role", "seconds"]);

    let umbrella = &artifacts.umbrella_declarations;
    let open = umbrella.find("/* open */").unwrap();
    let role = umbrella.find("/* role */").unwrap();
    let seconds = umbrella.find("/* seconds */").unwrap();
    assert!(open < role && role < seconds);
}

#[test]
fn umbrella_covers_every_type() {
    let schema = two_section_schema();
    let artifacts = Generator::new(&schema).unwrap().generate().unwrap();

    for artifact in &artifacts.per_type {
        assert!(artifacts.umbrella_declarations.contains(&artifact.declarations));
        assert!(artifacts.umbrella_definitions.contains(&artifact.definitions));
    }
}

#[test]
fn runs_are_byte_identical() {
    let schema = two_section_schema();
    let first = Generator::new(&schema).unwrap().generate().unwrap();
    let second = Generator::new(&schema).unwrap().generate().unwrap();

    assert_eq!(first.umbrella_declarations, second.umbrella_declarations);
    assert_eq!(first.umbrella_definitions, second.umbrella_definitions);
    assert_eq!(first.per_type, second.per_type);
}

#[test]
fn malformed_descriptor_aborts_with_context() {
    let schema = Schema::new(vec![Section::new("transport").with_types(vec![
        TypeDef::composite("open").with_descriptor("xyz:1"),
    ])]);
    let err = Generator::new(&schema).unwrap().generate().unwrap_err();

    match err {
        GenError::MalformedDescriptor {
            type_name,
            section_index,
            code,
        } => {
            assert_eq!(type_name, "open");
            assert_eq!(section_index, 0);
            assert_eq!(code, "xyz:1");
        }
        other => panic!("expected MalformedDescriptor, got {other}"),
    }
}

#[test]
fn duplicate_type_name_across_sections_aborts() {
    let schema = Schema::new(vec![
        Section::new("transport").with_types(vec![TypeDef::composite("open")]),
        Section::new("messaging").with_types(vec![TypeDef::restricted("open", "uint")]),
    ]);
    assert!(matches!(
        Generator::new(&schema),
        Err(GenError::SchemaIntegrity { .. })
    ));
}

#[test]
fn unresolvable_reference_aborts_before_emission() {
    let schema = Schema::new(vec![Section::new("transport").with_types(vec![
        TypeDef::composite("attach").with_fields(vec![Field::new("source", "no-such-type")]),
    ])]);
    let err = Generator::new(&schema).err().expect("validation must fail");
    match err {
        GenError::SchemaIntegrity {
            type_name,
            section_index,
            ..
        } => {
            assert_eq!(type_name, "attach");
            assert_eq!(section_index, 0);
        }
        other => panic!("expected SchemaIntegrity, got {other}"),
    }
}

#[test]
fn empty_schema_produces_empty_umbrellas() {
    let schema = Schema::default();
    let artifacts = Generator::new(&schema).unwrap().generate().unwrap();
    assert!(artifacts.per_type.is_empty());
    assert!(artifacts.umbrella_declarations.is_empty());
    assert!(artifacts.umbrella_definitions.is_empty());
}
