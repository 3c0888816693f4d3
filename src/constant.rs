// SPDX-License-Identifier: GPL-3.0-or-later
// src/constant.rs
//
// Crop engine constants that should not be changed by the user.

/// Smallest allowed crop width or height in display units.
pub const MIN_SIZE: f32 = 20.0;

/// Half the side of the square hit zone around each corner handle.
pub const HANDLE_HIT_RADIUS: f32 = 24.0;

/// Side of the square handle glyph drawn on each corner.
pub const HANDLE_SIZE: f32 = 12.0;

/// Width of the selection border.
pub const BORDER_WIDTH: f32 = 2.0;

/// Fraction of the display surface covered by the initial rectangle and by
/// preset rectangles.
pub const INITIAL_INSET: f32 = 0.8;

/// Tolerance for aspect ratio comparisons.
pub const RATIO_EPSILON: f32 = 0.001;

/// MIME types accepted by the upload flow.
pub const ACCEPTED_MIME_TYPES: [&str; 3] = ["image/jpeg", "image/jpg", "image/png"];

/// Bytes per mebibyte (upload size limit conversion).
pub const BYTES_PER_MIB: u64 = 1024 * 1024;

/// Configuration directory name.
pub const CONFIG_DIR: &str = "upload-crop";

/// Configuration file name.
pub const CONFIG_FILE: &str = "config.json";
