// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! CLI wrapper around the `amqdef` generator core: configuration, header
//! scaffolding and artifact writing.

pub mod generator;
