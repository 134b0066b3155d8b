//! Parameter types for image operations.
//!
//! These structs describe *what* to produce, not *how*. They are the
//! interface between [`operations`](super::operations), which decides file
//! names and bounds, and the [`backend`](super::backend), which does the
//! pixel work.

use std::path::PathBuf;

/// Parameters for a bounded thumbnail.
///
/// The output keeps the source aspect ratio and fits inside
/// `max_width × max_height`. Sources already inside the box are written at
/// their own size. The output format follows the output extension.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub max_width: u32,
    pub max_height: u32,
}
