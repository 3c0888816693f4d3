// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/view/crop/mod.rs
//
// Crop selection module: overlay rendering and selection state machine.

mod overlay;
mod selection;

pub use overlay::{CursorHint, cursor_hint, redraw};
pub use selection::{ActiveHandle, CropStateMachine, HitTarget, PointerMode};
