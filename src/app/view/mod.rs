// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/view/mod.rs
//
// View layer: drawing surface and crop overlay.

pub mod crop;
pub mod surface;

pub use surface::{Color, DrawingSurface, RasterSurface};
