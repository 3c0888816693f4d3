// SPDX-License-Identifier: GPL-3.0-or-later
// src/error.rs
//
// Error taxonomy for crop sessions.

use std::io;

use thiserror::Error;

/// Errors that end a crop session.
///
/// User cancellation is not an error; it resolves to
/// [`CropOutcome::Cancelled`](crate::app::session::CropOutcome::Cancelled).
#[derive(Error, Debug)]
pub enum CropError {
    /// The input resource could not be read.
    #[error("Failed to read image: {0}")]
    Read(#[from] io::Error),

    /// The input MIME type is not accepted by the upload flow.
    #[error("Unsupported image type: {0} (only JPG, JPEG and PNG are allowed)")]
    UnsupportedType(String),

    /// The input could not be decoded as an image.
    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    /// Re-encoding the crop failed or produced no data.
    #[error("Failed to encode cropped image: {0}")]
    Encoding(String),

    /// The session ended without a confirm or cancel outcome.
    #[error("Crop session aborted: {0}")]
    Session(String),
}

pub type CropResult<T> = Result<T, CropError>;
