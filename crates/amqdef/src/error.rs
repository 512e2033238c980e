// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for schema resolution and emission.
//!
//!
//! Every error carries enough context (type name, section index) to locate
//! the offending schema entry. All errors abort the run; there is no partial
//! output to fall back to.

use std::fmt;

/// Result type for generator operations.
pub type GenResult<T> = Result<T, GenError>;

/// Errors that abort a generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenError {
    /// A type name collided with another declaration, or a reference
    /// resolved to no declared type after the permissive fallback.
    SchemaIntegrity {
        /// Name of the type that owns the offending entry.
        type_name: String,
        /// Index of the section the type was declared in.
        section_index: usize,
        /// What went wrong.
        detail: String,
    },

    /// A descriptor code string was not two-part hexadecimal.
    MalformedDescriptor {
        /// Name of the type carrying the descriptor.
        type_name: String,
        /// Index of the section the type was declared in.
        section_index: usize,
        /// The offending code string.
        code: String,
    },

    /// The schema document was structurally invalid.
    SchemaParse {
        /// What went wrong.
        detail: String,
    },
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenError::SchemaIntegrity {
                type_name,
                section_index,
                detail,
            } => write!(
                f,
                "schema integrity error in type `{}` (section {}): {}",
                type_name, section_index, detail
            ),
            GenError::MalformedDescriptor {
                type_name,
                section_index,
                code,
            } => write!(
                f,
                "malformed descriptor code `{}` on type `{}` (section {})",
                code, type_name, section_index
            ),
            GenError::SchemaParse { detail } => {
                write!(f, "invalid schema document: {}", detail)
            }
        }
    }
}

impl std::error::Error for GenError {}
