// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/crop/mapper.rs
//
// Conversions between pointer-device, display-surface and source-pixel space.

use super::geometry::{CropRectangle, Point, ScaleFactors, Size};

/// On-screen box the display surface is rendered into.
///
/// The rendered size may differ from the surface's intrinsic pixel size
/// when the presentation layer stretches it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceBounds {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl SurfaceBounds {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Bounds rendered 1:1 at the origin.
    pub fn identity(intrinsic: Size) -> Self {
        Self::new(0.0, 0.0, intrinsic.width, intrinsic.height)
    }
}

/// Map a client-space pointer position to display-surface pixels.
///
/// Degenerate (zero-sized) bounds map without scaling.
pub fn map_pointer(client: Point, bounds: &SurfaceBounds, intrinsic: Size) -> Point {
    let scale_x = if bounds.width > 0.0 {
        intrinsic.width / bounds.width
    } else {
        1.0
    };
    let scale_y = if bounds.height > 0.0 {
        intrinsic.height / bounds.height
    } else {
        1.0
    };
    Point::new(
        (client.x - bounds.left) * scale_x,
        (client.y - bounds.top) * scale_y,
    )
}

/// Fit `source` into `max` preserving aspect ratio, never upscaling.
///
/// Dimensions are floored to whole pixels (at least one) so the display
/// surface can be backed by a raster.
pub fn fit_display_size(source: (u32, u32), max: Size) -> Size {
    let (width, height) = (source.0.max(1) as f32, source.1.max(1) as f32);
    let ratio = (max.width / width).min(max.height / height).min(1.0);
    Size::new(
        (width * ratio).floor().max(1.0),
        (height * ratio).floor().max(1.0),
    )
}

/// Session-scoped mapper with fixed scale factors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    display: Size,
    scale: ScaleFactors,
}

impl CoordinateMapper {
    pub fn new(source: (u32, u32), display: Size) -> Self {
        Self {
            display,
            scale: ScaleFactors::new(source, display),
        }
    }

    pub fn display_size(&self) -> Size {
        self.display
    }

    pub fn scale_factors(&self) -> ScaleFactors {
        self.scale
    }

    pub fn to_display_space(&self, client: Point, bounds: &SurfaceBounds) -> Point {
        map_pointer(client, bounds, self.display)
    }

    pub fn to_source_space(&self, rect: &CropRectangle) -> CropRectangle {
        CropRectangle::new(
            rect.x * self.scale.scale_x,
            rect.y * self.scale.scale_y,
            rect.width * self.scale.scale_x,
            rect.height * self.scale.scale_y,
        )
    }
}
