// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/mod.rs
//
// Pure domain layer: geometry and document operations, no I/O.

pub mod crop;
pub mod document;
