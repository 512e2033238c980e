// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! In-memory model of the protocol type schema.
//!
//!
//! Pure data: ordered sections of ordered type declarations, read-only after
//! load. Name lookup lives in [`crate::resolve::TypeIndex`], built once per
//! generator run.

/// Categories of declared protocol types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeClass {
    /// Structured multi-field type with its own wire discriminator.
    Composite,
    /// Constrained alias over another primitive or declared type.
    Restricted,
}

/// The full protocol schema: an ordered sequence of sections.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    pub sections: Vec<Section>,
}

impl Schema {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }
}

/// One schema section, an ordered sequence of type declarations.
///
/// Sections also carry other item kinds in the source document; those are
/// out of scope and dropped at load time.
#[derive(Debug, Clone)]
pub struct Section {
    pub name: String,
    pub types: Vec<TypeDef>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            types: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_types(mut self, types: Vec<TypeDef>) -> Self {
        self.types = types;
        self
    }
}

/// One declared protocol type.
///
/// `source` is only meaningful for `Restricted` types (the underlying
/// primitive or type name the alias constrains). Item order is schema order
/// and determines emission order.
#[derive(Debug, Clone)]
pub struct TypeDef {
    pub name: String,
    pub class: TypeClass,
    pub source: String,
    pub fields: Vec<Field>,
    pub descriptor: Option<Descriptor>,
    pub choices: Vec<Choice>,
}

impl TypeDef {
    /// A composite (structured) type declaration.
    pub fn composite(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class: TypeClass::Composite,
            source: String::new(),
            fields: Vec::new(),
            descriptor: None,
            choices: Vec::new(),
        }
    }

    /// A restricted (alias) type declaration over `source`.
    pub fn restricted(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class: TypeClass::Restricted,
            source: source.into(),
            fields: Vec::new(),
            descriptor: None,
            choices: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = fields;
        self
    }

    #[must_use]
    pub fn with_descriptor(mut self, code: impl Into<String>) -> Self {
        self.descriptor = Some(Descriptor { code: code.into() });
        self
    }

    #[must_use]
    pub fn with_choices(mut self, choices: Vec<Choice>) -> Self {
        self.choices = choices;
        self
    }
}

/// One field of a composite type.
///
/// Field position determines both accessor declaration order and, for
/// mandatory fields, constructor-argument order.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    /// Type reference, resolved against the schema by name.
    pub type_ref: String,
    /// Mandatory fields contribute a constructor parameter.
    pub mandatory: bool,
    /// A multiple field is carried as the generic value type on the wire,
    /// regardless of `type_ref`.
    pub multiple: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, type_ref: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_ref: type_ref.into(),
            mandatory: false,
            multiple: false,
        }
    }

    #[must_use]
    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    #[must_use]
    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }
}

/// Wire discriminator code for a type, formatted `HHHHHHHH:HHHHHHHH`.
///
/// At most one per type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    pub code: String,
}

/// A named constant value scoped to a restricted type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub name: String,
    pub value: String,
}

impl Choice {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
