// SPDX-License-Identifier: GPL-3.0-or-later
// src/main.rs
//
// Command-line entry point: run a scripted crop session over one image.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use futures_util::stream;

use upload_crop::app::document::optimize::{exceeds_limit, optimize};
use upload_crop::app::input::DeviceEvent;
use upload_crop::app::{CropMessage, CropOutcome, crop_file};
use upload_crop::config::CropConfig;
use upload_crop::domain::crop::{DEFAULT_PRESETS, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PresetArg {
    Passport,
    Square,
    Portrait,
    Landscape,
}

impl PresetArg {
    /// Index into `DEFAULT_PRESETS`.
    fn id(self) -> usize {
        match self {
            PresetArg::Passport => 0,
            PresetArg::Square => 1,
            PresetArg::Portrait => 2,
            PresetArg::Landscape => 3,
        }
    }
}

/// A pointer drag in display coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    pub from: Point,
    pub to: Point,
}

fn parse_point(raw: &str) -> Result<Point, String> {
    let (x, y) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{raw}`"))?;
    let x = x.trim().parse::<f32>().map_err(|e| format!("bad x in `{raw}`: {e}"))?;
    let y = y.trim().parse::<f32>().map_err(|e| format!("bad y in `{raw}`: {e}"))?;
    Ok(Point::new(x, y))
}

fn parse_drag(raw: &str) -> Result<Drag, String> {
    let (from, to) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected `x0,y0:x1,y1`, got `{raw}`"))?;
    Ok(Drag {
        from: parse_point(from)?,
        to: parse_point(to)?,
    })
}

#[derive(Parser, Debug, Clone)]
#[command(name = "upload-crop", version, about = "Crop an image before uploading it")]
pub struct Args {
    /// Image to crop (JPEG or PNG).
    pub file: PathBuf,

    /// Output path; defaults to `<name>-cropped.<ext>` next to the input.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Lock an aspect-ratio preset before applying drags.
    #[arg(short, long, value_enum)]
    pub preset: Option<PresetArg>,

    /// Drag gesture in display coordinates, `x0,y0:x1,y1`. Repeatable.
    #[arg(short, long = "drag", value_parser = parse_drag)]
    pub drags: Vec<Drag>,

    /// Shrink the result when it exceeds the upload size limit.
    #[arg(long)]
    pub optimize: bool,

    /// Print a data URL on stdout instead of writing a file.
    #[arg(long)]
    pub data_url: bool,

    /// Cancel the session instead of confirming it.
    #[arg(long)]
    pub cancel: bool,

    /// Configuration file (defaults to the user config directory).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn session_messages(args: &Args) -> Vec<CropMessage> {
    let mut messages = Vec::new();
    if let Some(preset) = args.preset {
        messages.push(CropMessage::TogglePreset(preset.id()));
    }
    for drag in &args.drags {
        messages.push(CropMessage::Device(DeviceEvent::MouseDown { client: drag.from }));
        messages.push(CropMessage::Device(DeviceEvent::MouseMove { client: drag.to }));
        messages.push(CropMessage::Device(DeviceEvent::MouseUp { client: drag.to }));
    }
    messages.push(if args.cancel {
        CropMessage::Cancel
    } else {
        CropMessage::Confirm
    });
    messages
}

fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "image".into(), |s| s.to_string_lossy());
    let name = match input.extension() {
        Some(ext) => format!("{stem}-cropped.{}", ext.to_string_lossy()),
        None => format!("{stem}-cropped"),
    };
    input.with_file_name(name)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => CropConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => CropConfig::load_or_default(),
    };

    let outcome = crop_file(
        &args.file,
        &config,
        DEFAULT_PRESETS.to_vec(),
        stream::iter(session_messages(&args)),
    )
    .await
    .with_context(|| format!("Failed to crop {}", args.file.display()))?;

    let image = match outcome {
        CropOutcome::Cancelled => {
            log::info!("Crop cancelled, nothing written");
            return Ok(());
        }
        CropOutcome::Cropped(image) => image,
    };

    let image = if exceeds_limit(&image, config.max_upload_mib) {
        if args.optimize {
            optimize(&image, config.max_upload_mib, config.optimize_quality)?
        } else {
            log::warn!(
                "Cropped image is {} bytes, above the {}MB upload limit (use --optimize)",
                image.len(),
                config.max_upload_mib
            );
            image
        }
    } else {
        image
    };

    if args.data_url {
        println!("{}", image.to_data_url());
    } else {
        let output = args
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(&args.file));
        tokio::fs::write(&output, &image.bytes)
            .await
            .with_context(|| format!("Failed to write {}", output.display()))?;
        log::info!("Wrote {}x{} crop to {}", image.width, image.height, output.display());
    }

    Ok(())
}
