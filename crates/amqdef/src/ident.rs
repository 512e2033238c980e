// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Identifier canonicalization for schema names.
//!
//!
//! Protocol names use `-` and `:` freely (`delivery-annotations`,
//! `amqp:link:redirect`); emitted identifiers may not. `sanitize` replaces
//! both with `_` and is idempotent. Case forms are applied where a name
//! becomes a function (`lower`) or a handle/guard (`upper`); choice names
//! and values keep their schema casing.

/// Replace protocol-reserved punctuation (`-`, `:`) with `_`.
pub fn sanitize(raw: &str) -> String {
    raw.replace(['-', ':'], "_")
}

/// Sanitized lower-case form, used for function and typedef names.
pub fn sanitize_lower(raw: &str) -> String {
    sanitize(raw).to_lowercase()
}

/// Sanitized upper-case form, used for handle types and include guards.
pub fn sanitize_upper(raw: &str) -> String {
    sanitize(raw).to_uppercase()
}
