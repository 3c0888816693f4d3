// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/document/raster.rs

use std::path::Path;

use image::{DynamicImage, GenericImageView, ImageFormat, RgbaImage, imageops};

use crate::constant::ACCEPTED_MIME_TYPES;
use crate::domain::crop::Size;
use crate::error::{CropError, CropResult};

/// The decoded image a crop session works on.
pub struct SourceImage {
    /// The decoded image.
    image: DynamicImage,
    /// Container format the bytes were decoded from.
    format: ImageFormat,
    /// MIME type reported by the caller, or derived from `format`.
    mime: String,
}

impl std::fmt::Debug for SourceImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (width, height) = self.dimensions();
        write!(f, "SourceImage({} {width}x{height})", self.mime)
    }
}

impl SourceImage {
    /// Load a source image from disk.
    pub fn open(path: &Path) -> CropResult<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes, None)
    }

    /// Validate and decode encoded image bytes.
    ///
    /// `mime` is the type reported by the upload; when absent it is derived
    /// from the detected format. Only JPEG and PNG are accepted, and a
    /// reported type must agree with the bytes so the output keeps it.
    pub fn from_bytes(bytes: &[u8], mime: Option<&str>) -> CropResult<Self> {
        if let Some(mime) = mime {
            if !is_accepted_mime(mime) {
                return Err(CropError::UnsupportedType(mime.to_string()));
            }
        }

        let format = image::guess_format(bytes).map_err(CropError::Decode)?;
        if !matches!(format, ImageFormat::Jpeg | ImageFormat::Png) {
            return Err(CropError::UnsupportedType(format.to_mime_type().to_string()));
        }

        if let Some(mime) = mime {
            if declared_format(mime) != Some(format) {
                return Err(CropError::UnsupportedType(format!(
                    "{mime} (content is {})",
                    format.to_mime_type()
                )));
            }
        }

        let image = image::load_from_memory_with_format(bytes, format).map_err(CropError::Decode)?;
        let mime = mime.map_or_else(|| format.to_mime_type().to_string(), str::to_string);
        log::debug!("Decoded {mime} source {}x{}", image.width(), image.height());

        Ok(Self { image, format, mime })
    }

    /// Returns the native pixel dimensions (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// Render the image at display scale for the crop view.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn preview(&self, display: Size) -> RgbaImage {
        let (width, height) = (display.width as u32, display.height as u32);
        if self.dimensions() == (width, height) {
            return self.image.to_rgba8();
        }
        imageops::resize(&self.image.to_rgba8(), width.max(1), height.max(1), imageops::FilterType::Triangle)
    }
}

pub fn is_accepted_mime(mime: &str) -> bool {
    ACCEPTED_MIME_TYPES
        .iter()
        .any(|accepted| accepted.eq_ignore_ascii_case(mime))
}

/// Container format an accepted MIME type names.
fn declared_format(mime: &str) -> Option<ImageFormat> {
    if mime.eq_ignore_ascii_case("image/png") {
        Some(ImageFormat::Png)
    } else if mime.eq_ignore_ascii_case("image/jpeg") || mime.eq_ignore_ascii_case("image/jpg") {
        Some(ImageFormat::Jpeg)
    } else {
        None
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Cursor;

    pub(crate) fn encoded(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let image = RgbaImage::from_fn(width, height, |x, y| {
            image::Rgba([(x * 7 % 256) as u8, (y * 3 % 256) as u8, 90, 255])
        });
        let image = match format {
            ImageFormat::Jpeg => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(image).to_rgb8()),
            _ => DynamicImage::ImageRgba8(image),
        };
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
        bytes
    }

    #[test]
    fn decodes_png_and_derives_mime() {
        let source = SourceImage::from_bytes(&encoded(30, 20, ImageFormat::Png), None).unwrap();
        assert_eq!(source.dimensions(), (30, 20));
        assert_eq!(source.mime(), "image/png");
        assert_eq!(source.format(), ImageFormat::Png);
    }

    #[test]
    fn keeps_reported_mime() {
        let bytes = encoded(16, 16, ImageFormat::Jpeg);
        let source = SourceImage::from_bytes(&bytes, Some("image/jpg")).unwrap();
        assert_eq!(source.mime(), "image/jpg");
        assert_eq!(source.format(), ImageFormat::Jpeg);
    }

    #[test]
    fn rejects_unaccepted_mime() {
        let bytes = encoded(4, 4, ImageFormat::Png);
        let err = SourceImage::from_bytes(&bytes, Some("image/gif")).unwrap_err();
        assert!(matches!(err, CropError::UnsupportedType(m) if m == "image/gif"));
    }

    #[test]
    fn rejects_reported_mime_that_disagrees_with_content() {
        let jpeg = encoded(16, 16, ImageFormat::Jpeg);
        let err = SourceImage::from_bytes(&jpeg, Some("image/png")).unwrap_err();
        assert!(matches!(err, CropError::UnsupportedType(ref m) if m.starts_with("image/png")));

        let png = encoded(16, 16, ImageFormat::Png);
        let err = SourceImage::from_bytes(&png, Some("IMAGE/JPEG")).unwrap_err();
        assert!(matches!(err, CropError::UnsupportedType(_)));

        let source = SourceImage::from_bytes(&png, Some("image/PNG")).unwrap();
        assert_eq!(source.format(), ImageFormat::Png);
    }

    #[test]
    fn rejects_gif_bytes() {
        let err = SourceImage::from_bytes(b"GIF89a\x01\x00\x01\x00", None).unwrap_err();
        assert!(matches!(err, CropError::UnsupportedType(_)));
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let err = SourceImage::from_bytes(b"definitely not an image", None).unwrap_err();
        assert!(matches!(err, CropError::Decode(_)));

        let mut truncated = encoded(30, 20, ImageFormat::Png);
        truncated.truncate(40);
        let err = SourceImage::from_bytes(&truncated, None).unwrap_err();
        assert!(matches!(err, CropError::Decode(_)));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SourceImage::open(&dir.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, CropError::Read(_)));
    }

    #[test]
    fn preview_has_display_dimensions() {
        let source = SourceImage::from_bytes(&encoded(300, 200, ImageFormat::Png), None).unwrap();
        let preview = source.preview(Size::new(150.0, 100.0));
        assert_eq!(preview.dimensions(), (150, 100));
    }
}
