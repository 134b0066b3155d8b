//! # bckt-photo
//!
//! Turns photos into posts for a static blog. Each photo becomes a directory
//! holding the image, a thumbnail, and a Markdown file whose YAML front
//! matter carries a title, a date, a slug, tags, and camera fields read from
//! EXIF.
//!
//! ```text
//! photos/2025/vacation/beach.jpg
//!   → posts/2025/vacation/beach-day/
//!       ├── beach-day.md
//!       ├── beach.jpg
//!       └── beach-thumb.jpg
//! ```
//!
//! # Pipeline
//!
//! For every photo:
//!
//! 1. **Decode** EXIF into a nested [`metadata::Metadata`] tree.
//! 2. **Resolve** logical fields (`camera`, `aperture`, ...) from it through
//!    the configured field mapping, first candidate tag wins.
//! 3. **Expand** `@dir1`, `@basename` and friends in titles and tags from the
//!    photo's path.
//! 4. **Write** the post directory, the copied image, the thumbnail, and the
//!    front matter.
//!
//! A directory input runs every image through this independently; one bad
//! photo never stops the rest.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`metadata`] | Nested tag groups, value normalization, post date |
//! | [`fields`] | Field mapping resolution and friendly value formats |
//! | [`template`] | Path components and `@placeholder` expansion |
//! | [`naming`] | Slugs, thumbnail names, the image extension list |
//! | [`post`] | Front matter record, post directory, copy and write |
//! | [`process`] | One photo to one post |
//! | [`scan`] | Single file or directory input, batch summary |
//! | [`config`] | `bckt-photo.yaml` loading and run settings |
//! | [`imaging`] | EXIF decoding and thumbnails behind [`imaging::ImageBackend`] |
//! | [`output`] | CLI output formatting |

pub mod config;
pub mod fields;
pub mod imaging;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod post;
pub mod process;
pub mod scan;
pub mod template;

#[cfg(test)]
pub(crate) mod test_helpers;
