// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/crop/mod.rs
//
// Pure crop geometry: rectangle model, coordinate mapping and aspect presets.

pub mod aspect;
pub mod geometry;
pub mod mapper;

pub use aspect::{AspectLock, DEFAULT_PRESETS, Preset, PresetController, PresetId};
pub use geometry::{CropRectangle, Point, ScaleFactors, Size};
pub use mapper::{CoordinateMapper, SurfaceBounds};
