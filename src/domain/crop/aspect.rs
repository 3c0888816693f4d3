// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/crop/aspect.rs
//
// Aspect-ratio lock and the preset controller that toggles it.

use super::geometry::{CropRectangle, Size};
use crate::constant::{INITIAL_INSET, MIN_SIZE};

/// Width/height ratio enforced during resize, or free-form.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AspectLock {
    #[default]
    None,
    Ratio(f32),
}

impl AspectLock {
    pub fn ratio(&self) -> Option<f32> {
        match self {
            AspectLock::None => None,
            AspectLock::Ratio(r) => Some(*r),
        }
    }
}

/// A named aspect ratio offered to the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    pub label: &'static str,
    pub ratio: f32,
}

impl Preset {
    pub const fn new(label: &'static str, ratio: f32) -> Self {
        Self { label, ratio }
    }
}

/// Presets shown by the upload crop dialog.
pub const DEFAULT_PRESETS: [Preset; 4] = [
    Preset::new("Passport (7:9)", 7.0 / 9.0),
    Preset::new("Square (1:1)", 1.0),
    Preset::new("Portrait (3:4)", 3.0 / 4.0),
    Preset::new("Landscape (16:9)", 16.0 / 9.0),
];

/// Index into the controller's preset list.
pub type PresetId = usize;

/// Largest rectangle with `ratio` inside 80% of the display, centered.
///
/// The shorter side never drops below `MIN_SIZE`. Returns `None` when a
/// rectangle of that size does not fit on the display.
pub fn fitted_rect(ratio: f32, display: Size) -> Option<CropRectangle> {
    let max_side = display.min_side() * INITIAL_INSET;
    let mut width = max_side;
    let mut height = max_side / ratio;
    if height > display.height * INITIAL_INSET {
        height = display.height * INITIAL_INSET;
        width = height * ratio;
    }

    if width < MIN_SIZE || height < MIN_SIZE {
        (width, height) = if width < height {
            (MIN_SIZE, MIN_SIZE / ratio)
        } else {
            (MIN_SIZE * ratio, MIN_SIZE)
        };
    }
    if width > display.width || height > display.height {
        return None;
    }
    Some(CropRectangle::centered(display, width, height))
}

#[derive(Debug, Clone)]
pub struct PresetController {
    presets: Vec<Preset>,
    active: Option<PresetId>,
    lock: AspectLock,
}

impl Default for PresetController {
    fn default() -> Self {
        Self::new(DEFAULT_PRESETS.to_vec())
    }
}

impl PresetController {
    /// Presets with a non-positive or non-finite ratio are dropped.
    pub fn new(presets: Vec<Preset>) -> Self {
        let presets = presets
            .into_iter()
            .filter(|preset| {
                let valid = preset.ratio.is_finite() && preset.ratio > 0.0;
                if !valid {
                    log::warn!("Dropping preset {:?} with invalid ratio {}", preset.label, preset.ratio);
                }
                valid
            })
            .collect();
        Self {
            presets,
            active: None,
            lock: AspectLock::None,
        }
    }

    pub fn presets(&self) -> &[Preset] {
        &self.presets
    }

    /// The active preset, read by the presentation layer.
    pub fn active(&self) -> Option<PresetId> {
        self.active
    }

    pub fn lock(&self) -> AspectLock {
        self.lock
    }

    /// Toggle `id`. Returns true when lock or rectangle changed.
    ///
    /// Re-activating the active preset returns to free-form and leaves the
    /// rectangle where it is. Activating another preset locks its ratio and
    /// refits the rectangle; a preset that cannot fit the display at
    /// `MIN_SIZE` is refused and nothing changes.
    pub fn activate(&mut self, id: PresetId, rect: &mut CropRectangle, display: Size) -> bool {
        let Some(preset) = self.presets.get(id).copied() else {
            log::warn!("Ignoring unknown preset {id}");
            return false;
        };

        if self.active == Some(id) {
            log::debug!("Preset {:?} deactivated", preset.label);
            self.active = None;
            self.lock = AspectLock::None;
            return true;
        }

        let Some(fitted) = fitted_rect(preset.ratio, display) else {
            log::warn!(
                "Preset {:?} does not fit a {}x{} display",
                preset.label,
                display.width,
                display.height
            );
            return false;
        };

        log::debug!("Preset {:?} activated", preset.label);
        self.active = Some(id);
        self.lock = AspectLock::Ratio(preset.ratio);
        *rect = fitted;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constant::RATIO_EPSILON;

    const DISPLAY: Size = Size {
        width: 800.0,
        height: 600.0,
    };

    #[test]
    fn square_preset_centers_largest_fitting_square() {
        let mut controller = PresetController::default();
        let mut rect = CropRectangle::initial(DISPLAY);
        assert!(controller.activate(1, &mut rect, DISPLAY));
        assert_eq!(rect, CropRectangle::new(160.0, 60.0, 480.0, 480.0));
        assert_eq!(controller.lock(), AspectLock::Ratio(1.0));
        assert_eq!(controller.active(), Some(1));
    }

    #[test]
    fn portrait_preset_is_limited_by_height() {
        let rect = fitted_rect(3.0 / 4.0, DISPLAY).unwrap();
        assert_eq!(rect.height, 480.0);
        assert!((rect.width - 360.0).abs() < RATIO_EPSILON);
        assert!(rect.is_valid_within(DISPLAY));
    }

    #[test]
    fn every_default_preset_fits_and_keeps_ratio() {
        for preset in DEFAULT_PRESETS {
            let rect = fitted_rect(preset.ratio, DISPLAY).unwrap();
            assert!(rect.is_valid_within(DISPLAY), "{}", preset.label);
            assert!((rect.aspect_ratio() - preset.ratio).abs() < RATIO_EPSILON);
        }
    }

    #[test]
    fn presets_on_a_short_display_keep_min_size() {
        let display = Size::new(800.0, 30.0);
        for (id, preset) in DEFAULT_PRESETS.iter().enumerate() {
            let mut controller = PresetController::default();
            let mut rect = CropRectangle::initial(display);
            assert!(controller.activate(id, &mut rect, display), "{}", preset.label);
            assert!(rect.is_valid_within(display), "{}: {rect:?}", preset.label);
            assert!((rect.aspect_ratio() - preset.ratio).abs() < RATIO_EPSILON);
        }
    }

    #[test]
    fn landscape_on_a_narrow_display_is_refused() {
        let display = Size::new(30.0, 800.0);
        let mut controller = PresetController::default();
        let mut rect = CropRectangle::initial(display);
        let before = rect;

        assert!(!controller.activate(3, &mut rect, display));
        assert_eq!(rect, before);
        assert_eq!(controller.active(), None);
        assert_eq!(controller.lock(), AspectLock::None);

        assert!(controller.activate(2, &mut rect, display));
        assert!(rect.is_valid_within(display));
        assert_eq!(controller.active(), Some(2));
    }

    #[test]
    fn landscape_on_a_short_display_is_min_size_tall() {
        let display = Size::new(800.0, 30.0);
        let rect = fitted_rect(16.0 / 9.0, display).unwrap();
        assert_eq!(rect.height, MIN_SIZE);
        assert!(rect.width >= MIN_SIZE);
    }

    #[test]
    fn second_activation_returns_to_free_form_without_moving() {
        let mut controller = PresetController::default();
        let mut rect = CropRectangle::initial(DISPLAY);
        controller.activate(3, &mut rect, DISPLAY);
        let after_preset = rect;

        controller.activate(3, &mut rect, DISPLAY);
        assert_eq!(controller.lock(), AspectLock::None);
        assert_eq!(controller.active(), None);
        assert_eq!(rect, after_preset);
    }

    #[test]
    fn switching_presets_keeps_exactly_one_active() {
        let mut controller = PresetController::default();
        let mut rect = CropRectangle::initial(DISPLAY);
        controller.activate(0, &mut rect, DISPLAY);
        controller.activate(2, &mut rect, DISPLAY);
        assert_eq!(controller.active(), Some(2));
        assert_eq!(controller.lock(), AspectLock::Ratio(0.75));
    }

    #[test]
    fn unknown_preset_is_ignored() {
        let mut controller = PresetController::default();
        let mut rect = CropRectangle::initial(DISPLAY);
        let before = rect;
        assert!(!controller.activate(9, &mut rect, DISPLAY));
        assert_eq!(rect, before);
        assert_eq!(controller.lock(), AspectLock::None);
    }

    #[test]
    fn invalid_ratios_are_dropped() {
        let controller = PresetController::new(vec![
            Preset::new("Zero", 0.0),
            Preset::new("Wide", 2.0),
            Preset::new("Broken", f32::NAN),
        ]);
        assert_eq!(controller.presets().len(), 1);
        assert_eq!(controller.presets()[0].label, "Wide");
    }
}
