//! High-level image operations.
//!
//! These functions combine naming and bounds with backend execution.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::ThumbnailParams;
use crate::naming::thumbnail_name;
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Configuration for thumbnail generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailConfig {
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            max_width: 800,
            max_height: 800,
        }
    }
}

/// A thumbnail written next to its post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedThumbnail {
    pub filename: String,
    pub dimensions: Dimensions,
}

/// Create the thumbnail for `source` inside `output_dir`.
///
/// Named `<stem>-thumb.<ext>` after the source file and written in the
/// source's format.
pub fn create_thumbnail(
    backend: &impl ImageBackend,
    source: &Path,
    output_dir: &Path,
    config: &ThumbnailConfig,
) -> Result<GeneratedThumbnail> {
    let image_name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            BackendError::ProcessingFailed(format!("No file name in {}", source.display()))
        })?;
    let filename = thumbnail_name(&image_name);
    let dimensions = backend.thumbnail(&ThumbnailParams {
        source: source.to_path_buf(),
        output: output_dir.join(&filename),
        max_width: config.max_width,
        max_height: config.max_height,
    })?;

    Ok(GeneratedThumbnail {
        filename,
        dimensions,
    })
}
