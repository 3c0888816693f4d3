// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/crop/geometry.rs
//
// Display-space geometry: points, sizes, the crop rectangle and scale factors.

use crate::constant::{INITIAL_INSET, MIN_SIZE};

/// Tolerance for bound checks on accumulated float arithmetic.
const BOUND_EPSILON: f32 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn min_side(&self) -> f32 {
        self.width.min(self.height)
    }
}

/// The user-selected region, in display-surface units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CropRectangle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl CropRectangle {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Centered rectangle covering 80% of each display dimension.
    ///
    /// Surfaces too small to hold the inset still get `MIN_SIZE` (or the
    /// whole surface, whichever is smaller).
    pub fn initial(display: Size) -> Self {
        let width = (display.width * INITIAL_INSET).max(MIN_SIZE.min(display.width));
        let height = (display.height * INITIAL_INSET).max(MIN_SIZE.min(display.height));
        Self::centered(display, width, height)
    }

    /// Rectangle of the given size centered on the display surface.
    pub fn centered(display: Size, width: f32, height: f32) -> Self {
        Self {
            x: (display.width - width) / 2.0,
            y: (display.height - height) / 2.0,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }

    /// Inclusive point containment.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Check the on-surface and minimum-size invariants.
    pub fn is_valid_within(&self, display: Size) -> bool {
        self.x >= -BOUND_EPSILON
            && self.y >= -BOUND_EPSILON
            && self.right() <= display.width + BOUND_EPSILON
            && self.bottom() <= display.height + BOUND_EPSILON
            && self.width >= MIN_SIZE - BOUND_EPSILON
            && self.height >= MIN_SIZE - BOUND_EPSILON
    }
}

/// Per-axis ratio between source pixels and display units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactors {
    pub scale_x: f32,
    pub scale_y: f32,
}

impl ScaleFactors {
    pub fn new(source: (u32, u32), display: Size) -> Self {
        Self {
            scale_x: source.0 as f32 / display.width,
            scale_y: source.1 as f32 / display.height,
        }
    }
}
