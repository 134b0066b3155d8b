//! Image processing collaborators: metadata decode and thumbnails.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **EXIF metadata** | `exif` crate, regrouped into a nested tree |
//! | **Thumbnail** | bounded Lanczos3 resize, same format as the source |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining naming + backend

pub mod backend;
mod calculations;
pub mod exif_reader;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::fit_within;
pub use operations::{GeneratedThumbnail, ThumbnailConfig, create_thumbnail};
pub use params::ThumbnailParams;
pub use rust_backend::RustBackend;
