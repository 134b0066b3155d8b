//! Pure Rust image backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, GIF, BMP, TIFF, WebP) | `image` crate |
//! | Resize | `image::DynamicImage::resize_exact` with `Lanczos3` |
//! | Encode | `image::DynamicImage::save`, format from the output extension |
//! | EXIF metadata | `exif` crate via [`exif_reader`](super::exif_reader) |

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::fit_within;
use super::exif_reader;
use super::params::ThumbnailParams;
use crate::metadata::Metadata;
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};
use std::path::Path;

/// Pure Rust backend using the `image` and `exif` crates.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)
        .map_err(BackendError::Io)?
        .with_guessed_format()
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

/// Save an image, inferring the format from the path's extension.
fn save_image(img: &DynamicImage, path: &Path) -> Result<(), BackendError> {
    img.save(path).map_err(|e| {
        BackendError::ProcessingFailed(format!("Failed to encode {}: {}", path.display(), e))
    })
}

impl ImageBackend for RustBackend {
    fn read_metadata(&self, path: &Path) -> Result<Metadata, BackendError> {
        Ok(exif_reader::read_exif(path)?)
    }

    fn thumbnail(&self, params: &ThumbnailParams) -> Result<Dimensions, BackendError> {
        let img = load_image(&params.source)?;
        let source = (img.width(), img.height());
        let (width, height) = fit_within(source, (params.max_width, params.max_height));

        if (width, height) == source {
            save_image(&img, &params.output)?;
        } else {
            let resized = img.resize_exact(width, height, FilterType::Lanczos3);
            save_image(&resized, &params.output)?;
        }
        Ok(Dimensions { width, height })
    }
}
