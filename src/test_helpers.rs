//! Shared test fixtures: synthetic images and EXIF blocks.
//!
//! Images are encoded on the fly so tests never depend on files in the repo.
//! EXIF blocks are built with the `exif` crate's writer and spliced into a
//! JPEG as an APP1 segment, which is where cameras put them.
//!
//! ```rust,ignore
//! let tmp = TempDir::new().unwrap();
//! let path = tmp.path().join("beach.jpg");
//! write_jpeg_with_exif(&path, 64, 48, &[
//!     ascii_field(Tag::Model, In::PRIMARY, "X-T5"),
//!     rational_field(Tag::FNumber, 28, 5),
//! ]);
//! ```

use crate::metadata::{Metadata, Ratio, RawValue, TagGroup};
use exif::experimental::Writer;
use exif::{Field, In, Tag, Value};
use image::{DynamicImage, ImageFormat, RgbImage};
use std::io::Cursor;
use std::path::Path;

// =========================================================================
// Images
// =========================================================================

fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    }))
}

fn encode(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let mut bytes = Vec::new();
    gradient(width, height)
        .write_to(&mut Cursor::new(&mut bytes), format)
        .unwrap();
    bytes
}

pub fn write_jpeg(path: &Path, width: u32, height: u32) {
    std::fs::write(path, encode(width, height, ImageFormat::Jpeg)).unwrap();
}

pub fn write_png(path: &Path, width: u32, height: u32) {
    std::fs::write(path, encode(width, height, ImageFormat::Png)).unwrap();
}

/// Write a JPEG carrying an EXIF block with `fields`.
pub fn write_jpeg_with_exif(path: &Path, width: u32, height: u32, fields: &[Field]) {
    let jpeg = encode(width, height, ImageFormat::Jpeg);
    let tiff = exif_tiff(fields);

    let segment_len = u16::try_from(2 + 6 + tiff.len()).unwrap();
    let mut out = Vec::with_capacity(jpeg.len() + tiff.len() + 10);
    // SOI, then APP1 ahead of whatever the encoder wrote.
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&segment_len.to_be_bytes());
    out.extend_from_slice(b"Exif\0\0");
    out.extend_from_slice(&tiff);
    out.extend_from_slice(&jpeg[2..]);
    std::fs::write(path, out).unwrap();
}

// =========================================================================
// EXIF fields
// =========================================================================

/// Encode `fields` as a big-endian TIFF structure.
pub fn exif_tiff(fields: &[Field]) -> Vec<u8> {
    let mut writer = Writer::new();
    for field in fields {
        writer.push_field(field);
    }
    let mut buf = Cursor::new(Vec::new());
    writer.write(&mut buf, false).unwrap();
    buf.into_inner()
}

pub fn ascii_field(tag: Tag, ifd: In, value: &str) -> Field {
    Field {
        tag,
        ifd_num: ifd,
        value: Value::Ascii(vec![value.as_bytes().to_vec()]),
    }
}

pub fn rational_field(tag: Tag, num: u32, denom: u32) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Rational(vec![exif::Rational { num, denom }]),
    }
}

pub fn short_field(tag: Tag, value: u16) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Short(vec![value]),
    }
}

/// A typical camera block: body, lens settings and capture time.
pub fn camera_fields() -> Vec<Field> {
    vec![
        ascii_field(Tag::Model, In::PRIMARY, "X-T5"),
        ascii_field(Tag::DateTimeOriginal, In::PRIMARY, "2024:05:01 14:30:00"),
        rational_field(Tag::FNumber, 28, 5),
        rational_field(Tag::ExposureTime, 1, 500),
        rational_field(Tag::FocalLength, 35, 1),
        short_field(Tag::PhotographicSensitivity, 400),
    ]
}

// =========================================================================
// Decoded metadata
// =========================================================================

/// The decoded form of [`camera_fields`], built directly.
pub fn camera_metadata() -> Metadata {
    Metadata::new(vec![
        TagGroup::new("IFD0")
            .with_tag("Model", RawValue::text("X-T5"))
            .with_group(
                TagGroup::new("Exif")
                    .with_tag("DateTimeOriginal", RawValue::text("2024:05:01 14:30:00"))
                    .with_tag("FNumber", RawValue::Rational(vec![Ratio::new(28, 5)]))
                    .with_tag("ExposureTime", RawValue::Rational(vec![Ratio::new(1, 500)]))
                    .with_tag("FocalLength", RawValue::Rational(vec![Ratio::new(35, 1)]))
                    .with_tag("PhotographicSensitivity", RawValue::Unsigned(vec![400])),
            ),
    ])
}
