// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/view/crop/overlay.rs
//
// Crop overlay rendering (image, mask, border, handles) and cursor hints.

use image::RgbaImage;

use super::selection::{ActiveHandle, CropStateMachine, HitTarget, PointerMode};
use crate::app::view::surface::{Color, DrawingSurface};
use crate::constant::{BORDER_WIDTH, HANDLE_SIZE};
use crate::domain::crop::{CropRectangle, Point};

const OVERLAY_COLOR: Color = Color::from_rgba(0.0, 0.0, 0.0, 0.5);
const HANDLE_COLOR: Color = Color::WHITE;
const BORDER_COLOR: Color = Color::WHITE;

/// Redraw the whole crop view from `rect`.
///
/// Holds no state of its own: identical inputs give identical output.
pub fn redraw<S: DrawingSurface + ?Sized>(surface: &mut S, preview: &RgbaImage, rect: &CropRectangle) {
    let size = surface.bounding_size();
    surface.draw_image(preview, CropRectangle::new(0.0, 0.0, size.width, size.height));

    // Top
    if rect.y > 0.0 {
        surface.fill_rect(CropRectangle::new(0.0, 0.0, size.width, rect.y), OVERLAY_COLOR);
    }

    // Bottom
    if rect.bottom() < size.height {
        surface.fill_rect(
            CropRectangle::new(0.0, rect.bottom(), size.width, size.height - rect.bottom()),
            OVERLAY_COLOR,
        );
    }

    // Left
    if rect.x > 0.0 {
        surface.fill_rect(CropRectangle::new(0.0, rect.y, rect.x, rect.height), OVERLAY_COLOR);
    }

    // Right
    if rect.right() < size.width {
        surface.fill_rect(
            CropRectangle::new(rect.right(), rect.y, size.width - rect.right(), rect.height),
            OVERLAY_COLOR,
        );
    }

    surface.stroke_rect(*rect, BORDER_COLOR, BORDER_WIDTH);

    let handle_half = HANDLE_SIZE / 2.0;
    for handle in ActiveHandle::ALL {
        let corner = handle.corner(rect);
        surface.fill_rect(
            CropRectangle::new(
                corner.x - handle_half,
                corner.y - handle_half,
                HANDLE_SIZE,
                HANDLE_SIZE,
            ),
            HANDLE_COLOR,
        );
    }
}

/// Pointer cursor the presentation layer should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorHint {
    #[default]
    Default,
    Grab,
    Grabbing,
    /// Diagonal resize along the top-left / bottom-right axis.
    ResizeNwse,
    /// Diagonal resize along the top-right / bottom-left axis.
    ResizeNesw,
}

fn cursor_for_handle(handle: ActiveHandle) -> CursorHint {
    match handle {
        ActiveHandle::TopLeft | ActiveHandle::BottomRight => CursorHint::ResizeNwse,
        ActiveHandle::TopRight | ActiveHandle::BottomLeft => CursorHint::ResizeNesw,
    }
}

/// Cursor for the current gesture, or for `hover` while idle.
pub fn cursor_hint(selection: &CropStateMachine, hover: Option<Point>) -> CursorHint {
    match selection.mode() {
        PointerMode::Dragging { .. } => CursorHint::Grabbing,
        PointerMode::Resizing(handle) => cursor_for_handle(handle),
        PointerMode::Idle => match hover.map(|p| selection.hit_test(p)) {
            Some(HitTarget::Handle(handle)) => cursor_for_handle(handle),
            Some(HitTarget::Inside) => CursorHint::Grab,
            Some(HitTarget::Outside) => CursorHint::Default,
            None => CursorHint::Grab,
        },
    }
}
