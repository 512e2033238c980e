// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Generation driver.
//!
//!
//! Single deterministic pass: build the name index, validate every
//! reference, emit one artifact per type in schema order, aggregate. Any
//! failure aborts before any artifact is handed out; there are no retries
//! and no partial output.

use crate::descriptor::decode_descriptor;
use crate::emit::{
    emit_type_declarations, emit_type_definitions, emit_umbrella_declarations,
    emit_umbrella_definitions,
};
use crate::error::{GenError, GenResult};
use crate::ident::sanitize_lower;
use crate::resolve::{validate, TypeIndex};
use crate::schema::{Schema, TypeDef};

/// The emission output for one declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeArtifact {
    /// Sanitized lower-case type name (artifact naming key).
    pub type_name: String,
    /// Self-contained declaration unit.
    pub declarations: String,
    /// Definition unit (concrete bodies, runtime delegation).
    pub definitions: String,
}

/// Everything one generator run produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    /// Per-type artifacts, in schema order.
    pub per_type: Vec<TypeArtifact>,
    /// Umbrella declaration set covering every type, in schema order.
    pub umbrella_declarations: String,
    /// Umbrella definition set covering every type, in schema order.
    pub umbrella_definitions: String,
}

/// Schema-driven binding generator.
///
/// Construction builds the name index and runs the up-front validation
/// pass, so resolution failures surface before any emission starts.
pub struct Generator<'a> {
    schema: &'a Schema,
    index: TypeIndex<'a>,
}

impl<'a> Generator<'a> {
    pub fn new(schema: &'a Schema) -> GenResult<Self> {
        let index = TypeIndex::build(schema)?;
        validate(schema, &index)?;
        Ok(Self { schema, index })
    }

    /// Run the full emission pass. Deterministic: an identical schema
    /// produces byte-identical artifacts.
    pub fn generate(&self) -> GenResult<Artifacts> {
        let mut per_type = Vec::new();
        for (section_index, section) in self.schema.sections.iter().enumerate() {
            log::debug!(
                "emitting section `{}` ({} types)",
                section.name,
                section.types.len()
            );
            for ty in &section.types {
                per_type.push(self.emit_type(section_index, ty)?);
            }
        }

        let umbrella_declarations = emit_umbrella_declarations(&per_type);
        let umbrella_definitions = emit_umbrella_definitions(&per_type);

        log::debug!("emitted {} type artifacts", per_type.len());
        Ok(Artifacts {
            per_type,
            umbrella_declarations,
            umbrella_definitions,
        })
    }

    fn emit_type(&self, section_index: usize, ty: &TypeDef) -> GenResult<TypeArtifact> {
        let descriptor_code = match &ty.descriptor {
            Some(descriptor) => Some(decode_descriptor(&descriptor.code).map_err(|e| {
                GenError::MalformedDescriptor {
                    type_name: ty.name.clone(),
                    section_index,
                    code: e.code,
                }
            })?),
            None => None,
        };

        Ok(TypeArtifact {
            type_name: sanitize_lower(&ty.name),
            declarations: emit_type_declarations(ty, &self.index),
            definitions: emit_type_definitions(ty, &self.index, descriptor_code),
        })
    }
}
