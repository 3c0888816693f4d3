// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/model.rs
//
// Crop session state and its message update.

use crate::app::input::{PointerInputUnifier, PointerPhase};
use crate::app::message::CropMessage;
use crate::app::view::crop::{CropStateMachine, CursorHint, PointerMode, cursor_hint};
use crate::domain::crop::{
    AspectLock, CoordinateMapper, CropRectangle, Point, Preset, PresetController, PresetId,
    SurfaceBounds,
};

/// What the session has to do after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    None,
    Redraw,
    Confirm,
    Cancel,
}

pub struct CropModel {
    // Geometry.
    mapper: CoordinateMapper,
    selection: CropStateMachine,
    presets: PresetController,

    // Input.
    input: PointerInputUnifier,
    hover: Option<Point>,
}

impl CropModel {
    pub fn new(mapper: CoordinateMapper, presets: Vec<Preset>) -> Self {
        let display = mapper.display_size();
        Self {
            mapper,
            selection: CropStateMachine::new(display),
            presets: PresetController::new(presets),
            input: PointerInputUnifier::new(mapper, SurfaceBounds::identity(display)),
            hover: None,
        }
    }

    pub fn update(&mut self, message: CropMessage) -> Transition {
        match message {
            CropMessage::Device(event) => {
                let Some(pointer) = self.input.unify(&event) else {
                    return Transition::None;
                };
                if pointer.phase == PointerPhase::Move && self.selection.mode() == PointerMode::Idle {
                    self.hover = Some(pointer.position);
                }
                if self.selection.handle_event(pointer, self.presets.lock()) {
                    Transition::Redraw
                } else {
                    Transition::None
                }
            }
            CropMessage::SurfaceBoundsChanged(bounds) => {
                self.input.set_bounds(bounds);
                Transition::None
            }
            CropMessage::TogglePreset(id) => {
                let display = self.mapper.display_size();
                let mut rect = *self.selection.rect();
                if self.presets.activate(id, &mut rect, display) {
                    self.selection.set_rect(rect);
                    Transition::Redraw
                } else {
                    Transition::None
                }
            }
            CropMessage::Confirm => Transition::Confirm,
            CropMessage::Cancel => Transition::Cancel,
        }
    }

    pub fn rect(&self) -> &CropRectangle {
        self.selection.rect()
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    pub fn selection(&self) -> &CropStateMachine {
        &self.selection
    }

    pub fn presets(&self) -> &[Preset] {
        self.presets.presets()
    }

    pub fn active_preset(&self) -> Option<PresetId> {
        self.presets.active()
    }

    pub fn aspect_lock(&self) -> AspectLock {
        self.presets.lock()
    }

    pub fn cursor(&self) -> CursorHint {
        cursor_hint(&self.selection, self.hover)
    }
}
