//! Names derived for a post: its slug and the attached file names.
//!
//! ## Slugs
//!
//! A titled post is slugged from its title: lowercase, spaces become dashes,
//! and everything outside `[a-z0-9-]` is dropped.
//! - `"Beach Day"` → `beach-day`
//! - `"Café au lait!"` → `caf-au-lait`
//!
//! An untitled post is named after its date: `photo-1714573800`.
//!
//! ## Thumbnails
//!
//! The thumbnail sits next to the copied image with a `-thumb` suffix on the
//! stem and the original extension: `beach.jpg` → `beach-thumb.jpg`.
//!
//! ## Images
//!
//! Files are picked up by extension only, compared case-insensitively
//! against [`IMAGE_EXTENSIONS`]. The extension is whatever follows the last
//! dot of the file name, so a bare `.jpg` is an image with an empty stem.

use chrono::{DateTime, TimeZone};
use std::path::Path;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "tiff", "tif", "webp"];

/// Slug for a post with the given title and date.
pub fn slug<Tz: TimeZone>(title: &str, date: &DateTime<Tz>) -> String {
    if title.is_empty() {
        format!("photo-{}", date.timestamp())
    } else {
        slugify(title)
    }
}

/// Reduce a title to `[a-z0-9-]`.
///
/// Idempotent: a slug slugifies to itself.
pub fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .replace(' ', "-")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect()
}

/// Split a file name at its last dot into stem and extension, without the
/// dot. A name with no dot has an empty extension.
pub fn split_extension(file_name: &str) -> (&str, &str) {
    match file_name.rfind('.') {
        Some(dot) => (&file_name[..dot], &file_name[dot + 1..]),
        None => (file_name, ""),
    }
}

/// Thumbnail file name for an image file name.
pub fn thumbnail_name(image_name: &str) -> String {
    match split_extension(image_name) {
        (stem, "") => format!("{stem}-thumb"),
        (stem, ext) => format!("{stem}-thumb.{ext}"),
    }
}

/// Whether `path` has an image extension.
pub fn is_image(path: &Path) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    let name = name.to_string_lossy();
    let ext = split_extension(&name).1.to_lowercase();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn slug_from_title() {
        let date = Utc::now();
        assert_eq!(slug("Beach Day", &date), "beach-day");
        assert_eq!(slug("2025 - vacation", &date), "2025---vacation");
    }

    #[test]
    fn slug_drops_non_ascii_and_punctuation() {
        assert_eq!(slugify("Café au lait!"), "caf-au-lait");
        assert_eq!(slugify("日本語"), "");
        assert_eq!(slugify("f/5.6 @ 1/500s"), "f56--1500s");
    }

    #[test]
    fn slug_drops_other_whitespace() {
        assert_eq!(slugify("a\tb"), "ab");
    }

    #[test]
    fn slug_without_title_uses_timestamp() {
        let date = Utc.with_ymd_and_hms(2024, 5, 1, 14, 30, 0).unwrap();
        assert_eq!(slug("", &date), "photo-1714573800");
    }

    #[test]
    fn slug_is_idempotent() {
        for title in [
            "Beach Day",
            "Café au lait!",
            "  leading and trailing  ",
            "UPPER lower 123",
            "already-a-slug",
            "--dashes--",
            "",
        ] {
            let once = slugify(title);
            assert_eq!(slugify(&once), once, "title {title:?}");
        }
    }

    #[test]
    fn thumbnail_keeps_extension() {
        assert_eq!(thumbnail_name("beach.jpg"), "beach-thumb.jpg");
        assert_eq!(thumbnail_name("IMG_0001.JPG"), "IMG_0001-thumb.JPG");
        assert_eq!(thumbnail_name("pano.final.tiff"), "pano.final-thumb.tiff");
    }

    #[test]
    fn thumbnail_without_extension() {
        assert_eq!(thumbnail_name("scan"), "scan-thumb");
    }

    #[test]
    fn thumbnail_of_dotfile_image() {
        assert_eq!(thumbnail_name(".jpg"), "-thumb.jpg");
    }

    #[test]
    fn extension_is_after_last_dot() {
        assert_eq!(split_extension("beach.jpg"), ("beach", "jpg"));
        assert_eq!(split_extension("pano.final.tiff"), ("pano.final", "tiff"));
        assert_eq!(split_extension("README"), ("README", ""));
        assert_eq!(split_extension(".jpg"), ("", "jpg"));
        assert_eq!(split_extension(".hidden"), ("", "hidden"));
        assert_eq!(split_extension("trailing."), ("trailing", ""));
    }

    #[test]
    fn image_extensions_match_case_insensitively() {
        for name in ["a.jpg", "a.JPG", "a.Jpeg", "a.png", "a.gif", "a.bmp", "a.TIF", "a.tiff", "a.webp"] {
            assert!(is_image(Path::new(name)), "{name}");
        }
    }

    #[test]
    fn dotfile_with_image_extension_is_an_image() {
        assert!(is_image(Path::new(".jpg")));
        assert!(is_image(Path::new("photos/.PNG")));
        assert!(!is_image(Path::new(".hidden")));
    }

    #[test]
    fn non_images_are_skipped() {
        for name in ["notes.txt", "a.heic", "raw.cr2", "jpg", "a.jpg.bak", "trailing."] {
            assert!(!is_image(Path::new(name)), "{name}");
        }
    }
}
