// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/session.rs
//
// One crop invocation: decode, interactive selection, export.

use std::path::Path;

use futures_util::{Stream, StreamExt};
use image::RgbaImage;

use crate::app::document::{EncodedImage, Exporter, SourceImage};
use crate::app::message::CropMessage;
use crate::app::model::{CropModel, Transition};
use crate::app::view::crop::redraw;
use crate::app::view::{DrawingSurface, RasterSurface};
use crate::config::CropConfig;
use crate::domain::crop::mapper::fit_display_size;
use crate::domain::crop::{CoordinateMapper, Preset, Size};
use crate::error::{CropError, CropResult};

/// How a crop session resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CropOutcome {
    Cancelled,
    Cropped(EncodedImage),
}

/// State owned by a single crop invocation.
///
/// Nothing is shared between sessions; the surface is released when the
/// session is consumed by [`CropSession::run`] or [`CropSession::confirm`].
pub struct CropSession<S: DrawingSurface = RasterSurface> {
    source: SourceImage,
    preview: RgbaImage,
    model: CropModel,
    surface: S,
    exporter: Exporter,
    redraws: u64,
}

impl CropSession<RasterSurface> {
    pub fn new(source: SourceImage, config: &CropConfig, presets: Vec<Preset>) -> Self {
        Self::with_surface(source, config, presets, RasterSurface::for_display)
    }
}

impl<S: DrawingSurface> CropSession<S> {
    /// Build a session drawing onto the surface returned by `make_surface`
    /// for the computed display size.
    pub fn with_surface(
        source: SourceImage,
        config: &CropConfig,
        presets: Vec<Preset>,
        make_surface: impl FnOnce(Size) -> S,
    ) -> Self {
        let max = Size::new(config.display_max_width, config.display_max_height);
        let display = fit_display_size(source.dimensions(), max);
        let mapper = CoordinateMapper::new(source.dimensions(), display);
        log::debug!(
            "Crop session for {source:?} at display {}x{}",
            display.width,
            display.height
        );

        let mut session = Self {
            preview: source.preview(display),
            source,
            model: CropModel::new(mapper, presets),
            surface: make_surface(display),
            exporter: Exporter::new(config.export_quality),
            redraws: 0,
        };
        session.redraw();
        session
    }

    pub fn model(&self) -> &CropModel {
        &self.model
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Number of redraws performed so far.
    pub fn redraws(&self) -> u64 {
        self.redraws
    }

    pub fn redraw(&mut self) {
        redraw(&mut self.surface, &self.preview, self.model.rect());
        self.redraws += 1;
    }

    /// Apply one message, redrawing when the selection changed.
    pub fn handle(&mut self, message: CropMessage) -> Transition {
        let transition = self.model.update(message);
        if transition == Transition::Redraw {
            self.redraw();
        }
        transition
    }

    /// Export the current selection on the calling thread.
    pub fn confirm(self) -> CropResult<CropOutcome> {
        let rect = *self.model.rect();
        let mapper = *self.model.mapper();
        let encoded = self.exporter.export(&self.source, &rect, &mapper)?;
        Ok(CropOutcome::Cropped(encoded))
    }

    /// Drive the session from `input` until the user confirms or cancels.
    ///
    /// Export runs on the blocking pool. An input stream that ends without
    /// an outcome is an error.
    pub async fn run<St>(mut self, mut input: St) -> CropResult<CropOutcome>
    where
        St: Stream<Item = CropMessage> + Unpin,
    {
        while let Some(message) = input.next().await {
            match self.handle(message) {
                Transition::None | Transition::Redraw => {}
                Transition::Cancel => {
                    log::info!("Crop cancelled");
                    return Ok(CropOutcome::Cancelled);
                }
                Transition::Confirm => {
                    let CropSession {
                        source,
                        model,
                        exporter,
                        ..
                    } = self;
                    let rect = *model.rect();
                    let mapper = *model.mapper();
                    let encoded = tokio::task::spawn_blocking(move || {
                        exporter.export(&source, &rect, &mapper)
                    })
                    .await
                    .map_err(|e| CropError::Session(format!("export task failed: {e}")))??;
                    return Ok(CropOutcome::Cropped(encoded));
                }
            }
        }
        Err(CropError::Session(
            "input ended before the crop was confirmed or cancelled".to_string(),
        ))
    }
}

/// Decode `bytes` off the async runtime and run a crop session over it.
pub async fn crop_bytes<St>(
    bytes: Vec<u8>,
    mime: Option<String>,
    config: &CropConfig,
    presets: Vec<Preset>,
    input: St,
) -> CropResult<CropOutcome>
where
    St: Stream<Item = CropMessage> + Unpin,
{
    let source = tokio::task::spawn_blocking(move || SourceImage::from_bytes(&bytes, mime.as_deref()))
        .await
        .map_err(|e| CropError::Session(format!("decode task failed: {e}")))??;
    CropSession::new(source, config, presets).run(input).await
}

/// Read `path` and run a crop session over it.
pub async fn crop_file<St>(
    path: &Path,
    config: &CropConfig,
    presets: Vec<Preset>,
    input: St,
) -> CropResult<CropOutcome>
where
    St: Stream<Item = CropMessage> + Unpin,
{
    let bytes = tokio::fs::read(path).await?;
    crop_bytes(bytes, None, config, presets, input).await
}
