// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/document/mod.rs
//
// Document module root: source decoding, export and upload helpers.

pub mod export;
pub mod optimize;
pub mod raster;

use base64::{Engine as _, engine::general_purpose};

pub use export::{EncodedImage, Exporter};
pub use raster::SourceImage;

/// Encode bytes as a `data:` URL.
pub fn to_data_url(bytes: &[u8], mime: &str) -> String {
    format!("data:{mime};base64,{}", general_purpose::STANDARD.encode(bytes))
}
