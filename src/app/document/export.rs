// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/document/export.rs
//
// Rasterize the final selection at source resolution and re-encode it.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, GenericImageView, ImageFormat};

use super::raster::SourceImage;
use crate::domain::crop::{CoordinateMapper, CropRectangle};
use crate::domain::document::operations::CropRegion;
use crate::error::{CropError, CropResult};

/// A re-encoded image ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub mime: String,
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
}

impl EncodedImage {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// `data:<mime>;base64,...` form handed back to the editor.
    pub fn to_data_url(&self) -> String {
        super::to_data_url(&self.bytes, &self.mime)
    }
}

/// Encode `image` as `format`. `quality` (0.0 - 1.0) applies to JPEG;
/// PNG is lossless.
pub fn encode(image: &DynamicImage, format: ImageFormat, quality: f32) -> CropResult<Vec<u8>> {
    let mut bytes = Vec::new();
    let result = match format {
        ImageFormat::Jpeg => {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let quality = (quality * 100.0).round().clamp(1.0, 100.0) as u8;
            let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
            rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut bytes, quality))
        }
        ImageFormat::Png => image.write_with_encoder(PngEncoder::new(&mut bytes)),
        other => return Err(CropError::Encoding(format!("unsupported output format {other:?}"))),
    };
    result.map_err(|e| CropError::Encoding(e.to_string()))?;

    if bytes.is_empty() {
        return Err(CropError::Encoding("encoder produced no data".to_string()));
    }
    Ok(bytes)
}

/// Produces the cropped output resource.
#[derive(Debug, Clone, Copy)]
pub struct Exporter {
    quality: f32,
}

impl Exporter {
    pub fn new(quality: f32) -> Self {
        Self { quality }
    }

    /// Crop `rect` (display space) out of `source` at full resolution.
    pub fn export(
        &self,
        source: &SourceImage,
        rect: &CropRectangle,
        mapper: &CoordinateMapper,
    ) -> CropResult<EncodedImage> {
        let source_rect = mapper.to_source_space(rect);
        let region = CropRegion::from_source_rect(&source_rect, source.dimensions());
        let (x, y, width, height) = region.as_tuple();
        log::debug!("Exporting {rect:?} as source region {region:?}");

        let cropped = source.image().crop_imm(x, y, width, height);
        let bytes = encode(&cropped, source.format(), self.quality)?;
        let (width, height) = cropped.dimensions();
        log::info!("Cropped image to {width}x{height} ({} bytes)", bytes.len());

        Ok(EncodedImage {
            bytes,
            mime: source.mime().to_string(),
            format: source.format(),
            width,
            height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::document::raster::tests::encoded;
    use crate::domain::crop::Size;
    use crate::domain::crop::mapper::fit_display_size;

    fn source(width: u32, height: u32, format: ImageFormat) -> SourceImage {
        SourceImage::from_bytes(&encoded(width, height, format), None).unwrap()
    }

    #[test]
    fn exported_dimensions_follow_scale_factors() {
        let source = source(3000, 2000, ImageFormat::Png);
        let display = fit_display_size(source.dimensions(), Size::new(800.0, 600.0));
        let mapper = CoordinateMapper::new(source.dimensions(), display);
        let rect = CropRectangle::new(100.0, 100.0, 200.0, 150.0);

        let out = Exporter::new(0.95).export(&source, &rect, &mapper).unwrap();
        let scale = mapper.scale_factors();
        assert_eq!(out.width, (200.0 * scale.scale_x).round() as u32);
        assert_eq!(out.height, (150.0 * scale.scale_y).round() as u32);
        assert_eq!((out.width, out.height), (750, 563));

        let decoded = image::load_from_memory(&out.bytes).unwrap();
        assert_eq!(decoded.dimensions(), (750, 563));
    }

    #[test]
    fn output_keeps_source_format_and_mime() {
        let source = source(64, 48, ImageFormat::Jpeg);
        let mapper = CoordinateMapper::new((64, 48), Size::new(64.0, 48.0));
        let out = Exporter::new(0.95)
            .export(&source, &CropRectangle::new(8.0, 8.0, 32.0, 24.0), &mapper)
            .unwrap();
        assert_eq!(out.mime, "image/jpeg");
        assert_eq!(image::guess_format(&out.bytes).unwrap(), ImageFormat::Jpeg);
        assert_eq!((out.width, out.height), (32, 24));
    }

    #[test]
    fn exported_pixels_match_source_region() {
        let source = source(40, 40, ImageFormat::Png);
        let mapper = CoordinateMapper::new((40, 40), Size::new(20.0, 20.0));
        let out = Exporter::new(0.95)
            .export(&source, &CropRectangle::new(5.0, 5.0, 10.0, 10.0), &mapper)
            .unwrap();
        let decoded = image::load_from_memory(&out.bytes).unwrap();
        assert_eq!(decoded.get_pixel(0, 0), source.image().get_pixel(10, 10));
        assert_eq!(decoded.dimensions(), (20, 20));
    }

    #[test]
    fn unsupported_output_format_is_an_encoding_error() {
        let image = DynamicImage::new_rgba8(2, 2);
        let err = encode(&image, ImageFormat::Gif, 0.9).unwrap_err();
        assert!(matches!(err, CropError::Encoding(_)));
    }

    #[test]
    fn data_url_has_mime_prefix() {
        let out = EncodedImage {
            bytes: vec![1, 2, 3],
            mime: "image/png".to_string(),
            format: ImageFormat::Png,
            width: 1,
            height: 1,
        };
        assert_eq!(out.to_data_url(), "data:image/png;base64,AQID");
    }
}
