// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/document/optimize.rs
//
// Shrink crops that exceed the upload size limit.

use image::GenericImageView;
use image::imageops::FilterType;

use super::export::{EncodedImage, encode};
use crate::constant::BYTES_PER_MIB;
use crate::error::{CropError, CropResult};

pub fn exceeds_limit(image: &EncodedImage, limit_mib: f32) -> bool {
    image.len() as f64 > f64::from(limit_mib) * BYTES_PER_MIB as f64
}

/// Downscale by `sqrt(limit / size)` and re-encode at `quality`.
///
/// Images already within the limit are only re-encoded.
pub fn optimize(image: &EncodedImage, limit_mib: f32, quality: f32) -> CropResult<EncodedImage> {
    let decoded = image::load_from_memory_with_format(&image.bytes, image.format)
        .map_err(|e| CropError::Encoding(format!("cannot re-read cropped image: {e}")))?;

    let size_mib = image.len() as f64 / BYTES_PER_MIB as f64;
    let scale = (f64::from(limit_mib) / size_mib).sqrt();
    let resized = if scale < 1.0 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let (width, height) = (
            ((f64::from(image.width) * scale).round() as u32).max(1),
            ((f64::from(image.height) * scale).round() as u32).max(1),
        );
        decoded.resize_exact(width, height, FilterType::Triangle)
    } else {
        decoded
    };

    let bytes = encode(&resized, image.format, quality)?;
    let (width, height) = resized.dimensions();
    log::info!(
        "Optimized {:.2}MB to {:.2}MB ({width}x{height})",
        size_mib,
        bytes.len() as f64 / BYTES_PER_MIB as f64
    );

    Ok(EncodedImage {
        bytes,
        mime: image.mime.clone(),
        format: image.format,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

    fn noisy_png(width: u32, height: u32) -> EncodedImage {
        let mut seed: u32 = 7;
        let pixels = RgbaImage::from_fn(width, height, |_, _| {
            seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            let [a, b, c, _] = seed.to_le_bytes();
            Rgba([a, b, c, 255])
        });
        let image = DynamicImage::ImageRgba8(pixels);
        EncodedImage {
            bytes: encode(&image, ImageFormat::Png, 1.0).unwrap(),
            mime: "image/png".to_string(),
            format: ImageFormat::Png,
            width,
            height,
        }
    }

    #[test]
    fn limit_is_compared_in_mebibytes() {
        let image = EncodedImage {
            bytes: vec![0; 2 * 1024 * 1024 + 1],
            mime: "image/png".to_string(),
            format: ImageFormat::Png,
            width: 1,
            height: 1,
        };
        assert!(exceeds_limit(&image, 2.0));
        assert!(!exceeds_limit(&image, 3.0));
    }

    #[test]
    fn oversized_image_is_scaled_down() {
        let image = noisy_png(200, 200);
        let limit_mib = (image.len() as f32 / BYTES_PER_MIB as f32) / 4.0;

        let optimized = optimize(&image, limit_mib, 0.85).unwrap();
        assert_eq!((optimized.width, optimized.height), (100, 100));
        assert!(optimized.len() < image.len());
        assert_eq!(optimized.mime, "image/png");
    }

    #[test]
    fn image_within_limit_keeps_dimensions() {
        let image = noisy_png(20, 10);
        let optimized = optimize(&image, 100.0, 0.85).unwrap();
        assert_eq!((optimized.width, optimized.height), (20, 10));
    }
}
