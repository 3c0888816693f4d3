// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/view/crop/selection.rs
//
// Crop selection state machine and resize handle types.

use crate::app::input::{PointerEvent, PointerPhase};
use crate::constant::{HANDLE_HIT_RADIUS, MIN_SIZE};
use crate::domain::crop::{AspectLock, CropRectangle, Point, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveHandle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ActiveHandle {
    /// Hit-test priority order.
    pub const ALL: [ActiveHandle; 4] = [
        ActiveHandle::TopLeft,
        ActiveHandle::TopRight,
        ActiveHandle::BottomLeft,
        ActiveHandle::BottomRight,
    ];

    pub fn corner(self, rect: &CropRectangle) -> Point {
        match self {
            ActiveHandle::TopLeft => Point::new(rect.x, rect.y),
            ActiveHandle::TopRight => Point::new(rect.right(), rect.y),
            ActiveHandle::BottomLeft => Point::new(rect.x, rect.bottom()),
            ActiveHandle::BottomRight => Point::new(rect.right(), rect.bottom()),
        }
    }

    fn is_left(self) -> bool {
        matches!(self, ActiveHandle::TopLeft | ActiveHandle::BottomLeft)
    }

    fn is_top(self) -> bool {
        matches!(self, ActiveHandle::TopLeft | ActiveHandle::TopRight)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PointerMode {
    #[default]
    Idle,
    /// `offset` is pointer minus rectangle origin at gesture start.
    Dragging { offset: Point },
    Resizing(ActiveHandle),
}

/// What a pointer position lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Handle(ActiveHandle),
    Inside,
    Outside,
}

/// Owns the crop rectangle and interprets pointer events.
#[derive(Debug, Clone)]
pub struct CropStateMachine {
    rect: CropRectangle,
    display: Size,
    mode: PointerMode,
    gesture_start: Point,
    gesture_start_rect: CropRectangle,
}

impl CropStateMachine {
    pub fn new(display: Size) -> Self {
        let rect = CropRectangle::initial(display);
        Self {
            rect,
            display,
            mode: PointerMode::Idle,
            gesture_start: Point::default(),
            gesture_start_rect: rect,
        }
    }

    pub fn rect(&self) -> &CropRectangle {
        &self.rect
    }

    /// Replace the rectangle from outside a gesture. Any gesture in
    /// progress ends; the next `Start` snapshots the new geometry.
    pub(crate) fn set_rect(&mut self, rect: CropRectangle) {
        if self.mode != PointerMode::Idle {
            log::debug!("Ending {:?} gesture on external rectangle change", self.mode);
        }
        self.rect = rect;
        self.gesture_start_rect = rect;
        self.mode = PointerMode::Idle;
    }

    pub fn display(&self) -> Size {
        self.display
    }

    pub fn mode(&self) -> PointerMode {
        self.mode
    }

    pub fn hit_test(&self, point: Point) -> HitTarget {
        for handle in ActiveHandle::ALL {
            let corner = handle.corner(&self.rect);
            if (point.x - corner.x).abs() <= HANDLE_HIT_RADIUS
                && (point.y - corner.y).abs() <= HANDLE_HIT_RADIUS
            {
                return HitTarget::Handle(handle);
            }
        }
        if self.rect.contains(point) {
            HitTarget::Inside
        } else {
            HitTarget::Outside
        }
    }

    /// Apply one pointer event. Returns true when the rectangle changed.
    pub fn handle_event(&mut self, event: PointerEvent, lock: AspectLock) -> bool {
        match event.phase {
            PointerPhase::Start => {
                self.start(event.position);
                false
            }
            PointerPhase::Move => self.update(event.position, lock),
            PointerPhase::End | PointerPhase::Cancel => {
                self.end();
                false
            }
        }
    }

    fn start(&mut self, point: Point) {
        self.gesture_start = point;
        self.gesture_start_rect = self.rect;
        self.mode = match self.hit_test(point) {
            HitTarget::Handle(handle) => PointerMode::Resizing(handle),
            HitTarget::Inside => PointerMode::Dragging {
                offset: Point::new(point.x - self.rect.x, point.y - self.rect.y),
            },
            HitTarget::Outside => PointerMode::Idle,
        };
        log::debug!("Crop gesture start at {point:?}: {:?}", self.mode);
    }

    fn update(&mut self, point: Point, lock: AspectLock) -> bool {
        let next = match self.mode {
            PointerMode::Idle => return false,
            PointerMode::Dragging { offset } => self.dragged(point, offset),
            PointerMode::Resizing(handle) => {
                let dx = point.x - self.gesture_start.x;
                let dy = point.y - self.gesture_start.y;
                match lock {
                    AspectLock::None => self.resized_free(handle, dx, dy),
                    AspectLock::Ratio(ratio) => match self.resized_locked(handle, dx, dy, ratio) {
                        Some(rect) => rect,
                        None => return false,
                    },
                }
            }
        };

        if next == self.rect {
            return false;
        }
        self.rect = next;
        true
    }

    fn end(&mut self) {
        self.mode = PointerMode::Idle;
    }

    fn dragged(&self, point: Point, offset: Point) -> CropRectangle {
        let CropRectangle { width, height, .. } = self.rect;
        let x = (point.x - offset.x).min(self.display.width - width).max(0.0);
        let y = (point.y - offset.y).min(self.display.height - height).max(0.0);
        CropRectangle::new(x, y, width, height)
    }

    fn resized_free(&self, handle: ActiveHandle, dx: f32, dy: f32) -> CropRectangle {
        let start = self.gesture_start_rect;
        let (right, bottom) = (start.right(), start.bottom());

        let (x, width) = if handle.is_left() {
            let x = (start.x + dx).max(0.0).min(right - MIN_SIZE);
            (x, right - x)
        } else {
            let right = (right + dx).max(start.x + MIN_SIZE).min(self.display.width);
            (start.x, right - start.x)
        };

        let (y, height) = if handle.is_top() {
            let y = (start.y + dy).max(0.0).min(bottom - MIN_SIZE);
            (y, bottom - y)
        } else {
            let bottom = (bottom + dy).max(start.y + MIN_SIZE).min(self.display.height);
            (start.y, bottom - start.y)
        };

        CropRectangle::new(x, y, width, height)
    }

    /// The pointer axis that moved further (in width units) drives the
    /// resize; the other dimension is derived from `ratio`. Returns `None`
    /// when the result would leave the surface or drop below `MIN_SIZE`.
    fn resized_locked(
        &self,
        handle: ActiveHandle,
        dx: f32,
        dy: f32,
        ratio: f32,
    ) -> Option<CropRectangle> {
        let start = self.gesture_start_rect;
        let grow_x = if handle.is_left() { -dx } else { dx };
        let grow_y = if handle.is_top() { -dy } else { dy };

        let width = if grow_x.abs() >= (grow_y * ratio).abs() {
            start.width + grow_x
        } else {
            (start.height + grow_y) * ratio
        };
        let height = width / ratio;

        let x = if handle.is_left() { start.right() - width } else { start.x };
        let y = if handle.is_top() { start.bottom() - height } else { start.y };

        let rect = CropRectangle::new(x, y, width, height);
        if rect.is_valid_within(self.display) {
            Some(rect)
        } else {
            log::debug!("Skipping locked resize to {rect:?}");
            None
        }
    }
}
