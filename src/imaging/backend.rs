//! Image backend trait and shared types.
//!
//! The [`ImageBackend`] trait covers the two things the post pipeline needs
//! from an image file: its embedded metadata and a bounded thumbnail. The
//! production implementation is [`RustBackend`](super::rust_backend::RustBackend).

use super::params::ThumbnailParams;
use crate::metadata::Metadata;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Metadata decode failed: {0}")]
    Metadata(#[from] exif::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Pixel dimensions of a written image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image processing backends.
pub trait ImageBackend {
    /// Decode embedded metadata. Files without any are an error; callers
    /// decide whether that matters.
    fn read_metadata(&self, path: &Path) -> Result<Metadata, BackendError>;

    /// Write a thumbnail bounded by the params, returning its dimensions.
    fn thumbnail(&self, params: &ThumbnailParams) -> Result<Dimensions, BackendError>;
}
