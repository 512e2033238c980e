// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # amqdef - AMQP 1.0 type binding generator
//!
//! Turns the AMQP 1.0 protocol's declarative type schema into per-type C
//! binding declarations and definitions: opaque handles, lifecycle
//! functions, field accessors, descriptor-based type discrimination and
//! encode/decode aliasing over the generic-value runtime (`AMQP_VALUE`).
//!
//! ## Quick Start
//!
//! ```rust
//! use amqdef::{Field, Generator, Schema, Section, TypeDef};
//!
//! let schema = Schema::new(vec![Section::new("transport").with_types(vec![
//!     TypeDef::composite("error")
//!         .with_descriptor("0x00000000:0x0000001d")
//!         .with_fields(vec![
//!             Field::new("condition", "symbol").mandatory(),
//!             Field::new("description", "string"),
//!         ]),
//! ])]);
//!
//! let generator = Generator::new(&schema)?;
//! let artifacts = generator.generate()?;
//! assert_eq!(artifacts.per_type[0].type_name, "error");
//! # Ok::<(), amqdef::GenError>(())
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! +---------------------------------------------------------------+
//! |                    Schema Model (schema)                      |
//! |        sections -> types -> fields/descriptor/choices         |
//! +---------------------------------------------------------------+
//! |   Resolution helpers (ident, resolve, descriptor)             |
//! |   name index (built once) | EmissionType | discriminator u64  |
//! +---------------------------------------------------------------+
//! |                  Type Emitter (emit)                          |
//! |     declaration unit + definition unit, one per type          |
//! +---------------------------------------------------------------+
//! |              Aggregate Emitter & Driver (driver)              |
//! |        umbrella declaration/definition sets, schema order     |
//! +---------------------------------------------------------------+
//! ```
//!
//! The schema document loader (`loader`, behind the `xml-loader` feature)
//! is thin glue; the generator core works from the in-memory [`Schema`]
//! and never touches the serialized form. The generator only *references*
//! the generic-value runtime by name, it never implements it.

/// Wire discriminator code parsing.
pub mod descriptor;
/// Generation driver and aggregate artifacts.
pub mod driver;
/// Per-type declaration and definition emitters.
pub mod emit;
/// Error types for schema resolution and emission.
pub mod error;
/// Identifier canonicalization for schema names.
pub mod ident;
/// Protocol definition document loader (XML).
#[cfg(feature = "xml-loader")]
pub mod loader;
/// Type reference resolution.
pub mod resolve;
/// In-memory model of the protocol type schema.
pub mod schema;

pub use descriptor::decode_descriptor;
pub use driver::{Artifacts, Generator, TypeArtifact};
pub use error::{GenError, GenResult};
pub use ident::{sanitize, sanitize_lower, sanitize_upper};
pub use resolve::{
    resolve_field_type, resolve_primitive, EmissionType, RestrictedLifecycle, TypeIndex,
};
pub use schema::{Choice, Descriptor, Field, Schema, Section, TypeClass, TypeDef};
