// SPDX-License-Identifier: GPL-3.0-or-later
// src/lib.rs
//
// Interactive crop stage for image uploads.

pub mod app;
pub mod config;
pub mod constant;
pub mod domain;
pub mod error;

pub use app::{CropMessage, CropOutcome, CropSession};
pub use config::CropConfig;
pub use error::{CropError, CropResult};
