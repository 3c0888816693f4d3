// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/view/surface.rs
//
// Minimal drawing-surface interface and an in-memory raster implementation.

use image::{Rgba, RgbaImage, imageops};

use crate::domain::crop::{CropRectangle, Size};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::from_rgba(1.0, 1.0, 1.0, 1.0);

    pub const fn from_rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// The drawing operations the crop renderer needs.
pub trait DrawingSurface {
    /// Intrinsic size of the surface in display units.
    fn bounding_size(&self) -> Size;

    /// Draw `image` scaled into `dest`, replacing what is underneath.
    fn draw_image(&mut self, image: &RgbaImage, dest: CropRectangle);

    /// Fill `rect`, blending by the color's alpha.
    fn fill_rect(&mut self, rect: CropRectangle, color: Color);

    /// Outline `rect` with a border of `width` drawn inside its edges.
    fn stroke_rect(&mut self, rect: CropRectangle, color: Color, width: f32);
}

/// Offscreen RGBA raster backing a crop session.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    pixels: RgbaImage,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width.max(1), height.max(1)),
        }
    }

    pub fn for_display(display: Size) -> Self {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Self::new(display.width as u32, display.height as u32)
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn into_pixels(self) -> RgbaImage {
        self.pixels
    }

    /// Rectangle clipped to the raster, as pixel spans.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn clip(&self, rect: CropRectangle) -> Option<(u32, u32, u32, u32)> {
        let (w, h) = self.pixels.dimensions();
        let x0 = rect.x.round().max(0.0) as u32;
        let y0 = rect.y.round().max(0.0) as u32;
        let x1 = (rect.right().round().max(0.0) as u32).min(w);
        let y1 = (rect.bottom().round().max(0.0) as u32).min(h);
        (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
    }
}

fn blend_channel(src: f32, dst: u8, alpha: f32) -> u8 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let out = (src * 255.0 * alpha + f32::from(dst) * (1.0 - alpha)).round().clamp(0.0, 255.0) as u8;
    out
}

impl DrawingSurface for RasterSurface {
    fn bounding_size(&self) -> Size {
        let (w, h) = self.pixels.dimensions();
        Size::new(w as f32, h as f32)
    }

    fn draw_image(&mut self, image: &RgbaImage, dest: CropRectangle) {
        let Some((x0, y0, x1, y1)) = self.clip(dest) else {
            return;
        };
        let (dest_w, dest_h) = (x1 - x0, y1 - y0);
        if image.dimensions() == (dest_w, dest_h) {
            imageops::replace(&mut self.pixels, image, i64::from(x0), i64::from(y0));
        } else {
            let scaled = imageops::resize(image, dest_w, dest_h, imageops::FilterType::Triangle);
            imageops::replace(&mut self.pixels, &scaled, i64::from(x0), i64::from(y0));
        }
    }

    fn fill_rect(&mut self, rect: CropRectangle, color: Color) {
        let Some((x0, y0, x1, y1)) = self.clip(rect) else {
            return;
        };
        let alpha = color.a.clamp(0.0, 1.0);
        for y in y0..y1 {
            for x in x0..x1 {
                let Rgba([r, g, b, a]) = *self.pixels.get_pixel(x, y);
                let blended = Rgba([
                    blend_channel(color.r, r, alpha),
                    blend_channel(color.g, g, alpha),
                    blend_channel(color.b, b, alpha),
                    a.max(blend_channel(1.0, a, alpha)),
                ]);
                self.pixels.put_pixel(x, y, blended);
            }
        }
    }

    fn stroke_rect(&mut self, rect: CropRectangle, color: Color, width: f32) {
        let width = width.min(rect.width / 2.0).min(rect.height / 2.0);
        let CropRectangle { x, y, .. } = rect;
        self.fill_rect(CropRectangle::new(x, y, rect.width, width), color);
        self.fill_rect(CropRectangle::new(x, rect.bottom() - width, rect.width, width), color);
        self.fill_rect(CropRectangle::new(x, y + width, width, rect.height - 2.0 * width), color);
        self.fill_rect(
            CropRectangle::new(rect.right() - width, y + width, width, rect.height - 2.0 * width),
            color,
        );
    }
}
