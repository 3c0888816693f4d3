// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/document/operations/crop.rs
//
// Crop operation domain model.

use crate::domain::crop::CropRectangle;

/// Crop region in source pixel coordinates.
///
/// Pure domain model - represents a rectangular region to crop.
/// No UI concerns, just data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRegion {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Round a source-space rectangle to whole pixels inside `image`.
    ///
    /// Width and height are `round(w)` and `round(h)` (at least one pixel,
    /// at most the image). Rounding overshoot is absorbed by shifting the
    /// origin, not by shrinking the region.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_source_rect(rect: &CropRectangle, image: (u32, u32)) -> Self {
        let (img_w, img_h) = (image.0.max(1), image.1.max(1));
        let width = (rect.width.round().max(1.0) as u32).min(img_w);
        let height = (rect.height.round().max(1.0) as u32).min(img_h);
        let x = (rect.x.round().max(0.0) as u32).min(img_w - width);
        let y = (rect.y.round().max(0.0) as u32).min(img_h - height);
        Self { x, y, width, height }
    }

    pub fn as_tuple(&self) -> (u32, u32, u32, u32) {
        (self.x, self.y, self.width, self.height)
    }

    /// Check if region has valid dimensions.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}
