// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/mod.rs
//
// Crop session wiring: input, state, view and document export.

pub mod document;
pub mod input;
pub mod message;
pub mod model;
pub mod session;
pub mod view;

pub use message::CropMessage;
pub use model::{CropModel, Transition};
pub use session::{CropOutcome, CropSession, crop_bytes, crop_file};
