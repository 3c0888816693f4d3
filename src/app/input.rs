// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/input.rs
//
// Mouse and touch events unified into a single pointer stream.

use crate::domain::crop::{CoordinateMapper, Point, SurfaceBounds};

/// One touch contact as reported by the device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: u64,
    pub client: Point,
}

/// Raw device events in client coordinates.
///
/// Touch events carry the contacts that changed with this event.
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceEvent {
    MouseDown { client: Point },
    MouseMove { client: Point },
    MouseUp { client: Point },
    TouchStart { touches: Vec<TouchPoint> },
    TouchMove { touches: Vec<TouchPoint> },
    TouchEnd { touches: Vec<TouchPoint> },
    TouchCancel { touches: Vec<TouchPoint> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// Canonical pointer event in display-surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub position: Point,
    pub phase: PointerPhase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActiveSource {
    Mouse,
    Touch(u64),
}

/// Turns device events into [`PointerEvent`]s.
///
/// At most one gesture is outstanding: a second start is ignored until
/// the first ends or is cancelled. Mouse moves without a pressed button
/// are forwarded as `Move` so the presentation layer can track hover.
#[derive(Debug, Clone)]
pub struct PointerInputUnifier {
    mapper: CoordinateMapper,
    bounds: SurfaceBounds,
    active: Option<ActiveSource>,
}

impl PointerInputUnifier {
    pub fn new(mapper: CoordinateMapper, bounds: SurfaceBounds) -> Self {
        Self {
            mapper,
            bounds,
            active: None,
        }
    }

    /// Update the on-screen box the surface is rendered into.
    pub fn set_bounds(&mut self, bounds: SurfaceBounds) {
        self.bounds = bounds;
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn unify(&mut self, event: &DeviceEvent) -> Option<PointerEvent> {
        match event {
            DeviceEvent::MouseDown { client } => {
                if self.active.is_some() {
                    log::debug!("Ignoring mouse down during active gesture");
                    return None;
                }
                self.active = Some(ActiveSource::Mouse);
                Some(self.event(*client, PointerPhase::Start))
            }
            DeviceEvent::MouseMove { client } => match self.active {
                None | Some(ActiveSource::Mouse) => Some(self.event(*client, PointerPhase::Move)),
                Some(ActiveSource::Touch(_)) => None,
            },
            DeviceEvent::MouseUp { client } => {
                if self.active != Some(ActiveSource::Mouse) {
                    return None;
                }
                self.active = None;
                Some(self.event(*client, PointerPhase::End))
            }
            DeviceEvent::TouchStart { touches } => {
                if self.active.is_some() {
                    log::debug!("Ignoring additional touch contact");
                    return None;
                }
                let first = touches.first()?;
                self.active = Some(ActiveSource::Touch(first.id));
                Some(self.event(first.client, PointerPhase::Start))
            }
            DeviceEvent::TouchMove { touches } => {
                let touch = self.tracked_touch(touches)?;
                Some(self.event(touch.client, PointerPhase::Move))
            }
            DeviceEvent::TouchEnd { touches } => {
                let touch = self.tracked_touch(touches)?;
                self.active = None;
                Some(self.event(touch.client, PointerPhase::End))
            }
            DeviceEvent::TouchCancel { touches } => {
                let touch = self.tracked_touch(touches)?;
                self.active = None;
                Some(self.event(touch.client, PointerPhase::Cancel))
            }
        }
    }

    fn tracked_touch(&self, touches: &[TouchPoint]) -> Option<TouchPoint> {
        let Some(ActiveSource::Touch(id)) = self.active else {
            return None;
        };
        touches.iter().find(|touch| touch.id == id).copied()
    }

    fn event(&self, client: Point, phase: PointerPhase) -> PointerEvent {
        PointerEvent {
            position: self.mapper.to_display_space(client, &self.bounds),
            phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::crop::Size;

    fn unifier() -> PointerInputUnifier {
        let display = Size::new(800.0, 600.0);
        let mapper = CoordinateMapper::new((1600, 1200), display);
        PointerInputUnifier::new(mapper, SurfaceBounds::identity(display))
    }

    fn touch(id: u64, x: f32, y: f32) -> TouchPoint {
        TouchPoint {
            id,
            client: Point::new(x, y),
        }
    }

    #[test]
    fn mouse_and_touch_produce_the_same_stream() {
        let mut mouse = unifier();
        let mouse_events: Vec<_> = [
            DeviceEvent::MouseDown { client: Point::new(10.0, 10.0) },
            DeviceEvent::MouseMove { client: Point::new(20.0, 15.0) },
            DeviceEvent::MouseUp { client: Point::new(20.0, 15.0) },
        ]
        .iter()
        .filter_map(|e| mouse.unify(e))
        .collect();

        let mut finger = unifier();
        let touch_events: Vec<_> = [
            DeviceEvent::TouchStart { touches: vec![touch(7, 10.0, 10.0)] },
            DeviceEvent::TouchMove { touches: vec![touch(7, 20.0, 15.0)] },
            DeviceEvent::TouchEnd { touches: vec![touch(7, 20.0, 15.0)] },
        ]
        .iter()
        .filter_map(|e| finger.unify(e))
        .collect();

        assert_eq!(mouse_events, touch_events);
        assert_eq!(mouse_events.len(), 3);
    }

    #[test]
    fn second_start_is_ignored_until_end() {
        let mut u = unifier();
        assert!(u.unify(&DeviceEvent::MouseDown { client: Point::new(1.0, 1.0) }).is_some());
        assert!(u.unify(&DeviceEvent::MouseDown { client: Point::new(2.0, 2.0) }).is_none());
        assert!(u.unify(&DeviceEvent::TouchStart { touches: vec![touch(1, 3.0, 3.0)] }).is_none());
        let end = u.unify(&DeviceEvent::MouseUp { client: Point::new(2.0, 2.0) }).unwrap();
        assert_eq!(end.phase, PointerPhase::End);
        assert!(u.unify(&DeviceEvent::MouseDown { client: Point::new(2.0, 2.0) }).is_some());
    }

    #[test]
    fn only_first_touch_contact_is_tracked() {
        let mut u = unifier();
        let start = u
            .unify(&DeviceEvent::TouchStart {
                touches: vec![touch(1, 10.0, 10.0), touch(2, 50.0, 50.0)],
            })
            .unwrap();
        assert_eq!(start.position, Point::new(10.0, 10.0));

        assert!(u.unify(&DeviceEvent::TouchMove { touches: vec![touch(2, 60.0, 60.0)] }).is_none());
        assert!(u.unify(&DeviceEvent::TouchEnd { touches: vec![touch(2, 60.0, 60.0)] }).is_none());
        assert!(u.is_active());

        let cancel = u
            .unify(&DeviceEvent::TouchCancel { touches: vec![touch(1, 12.0, 12.0)] })
            .unwrap();
        assert_eq!(cancel.phase, PointerPhase::Cancel);
        assert!(!u.is_active());
    }

    #[test]
    fn end_without_start_is_ignored() {
        let mut u = unifier();
        assert!(u.unify(&DeviceEvent::MouseUp { client: Point::new(1.0, 1.0) }).is_none());
        assert!(u.unify(&DeviceEvent::TouchEnd { touches: vec![touch(1, 1.0, 1.0)] }).is_none());
    }

    #[test]
    fn hover_moves_are_forwarded() {
        let mut u = unifier();
        let hover = u.unify(&DeviceEvent::MouseMove { client: Point::new(5.0, 6.0) }).unwrap();
        assert_eq!(hover.phase, PointerPhase::Move);
        assert!(!u.is_active());
    }

    #[test]
    fn positions_are_mapped_to_display_space() {
        let display = Size::new(800.0, 600.0);
        let mapper = CoordinateMapper::new((1600, 1200), display);
        let mut u = PointerInputUnifier::new(mapper, SurfaceBounds::new(0.0, 0.0, 400.0, 300.0));
        let start = u.unify(&DeviceEvent::MouseDown { client: Point::new(100.0, 100.0) }).unwrap();
        assert_eq!(start.position, Point::new(200.0, 200.0));
    }
}
