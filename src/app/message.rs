// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/message.rs
//
// Crop session messages: device input and user actions.

use crate::app::input::DeviceEvent;
use crate::domain::crop::{PresetId, SurfaceBounds};

#[derive(Debug, Clone, PartialEq)]
pub enum CropMessage {
    // Pointer input.
    Device(DeviceEvent),
    SurfaceBoundsChanged(SurfaceBounds),

    // Presets.
    TogglePreset(PresetId),

    // Outcome.
    Confirm,
    Cancel,
}
