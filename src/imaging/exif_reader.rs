//! EXIF decoding into a [`Metadata`] tree.
//!
//! The `exif` crate reports every field flat, tagged with the main IFD it was
//! found in (`In::PRIMARY`, `In::THUMBNAIL`) and the context of its tag
//! (TIFF, Exif, GPS, Interop). This module regroups them into nested groups:
//!
//! ```text
//! IFD0 ─┬─ Exif ── Interop
//!       └─ GPS
//! IFD1 ─── ...
//! ```
//!
//! Values are mapped to [`RawValue`]s so normalization does not depend on the
//! decoder:
//!
//! | EXIF type | RawValue |
//! |---|---|
//! | ASCII | `Text` |
//! | BYTE, SHORT, LONG | `Unsigned` |
//! | SBYTE, SSHORT, SLONG | `Signed` |
//! | RATIONAL, SRATIONAL | `Rational` |
//! | UNDEFINED, FLOAT, DOUBLE, unknown | `Other` (decoder's display form) |

use crate::metadata::{Metadata, Ratio, RawValue, Tag, TagGroup};
use exif::{Context, Exif, Field, Value};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Decode the EXIF block of a JPEG, TIFF, PNG, WebP or HEIF file.
pub fn read_exif(path: &Path) -> Result<Metadata, exif::Error> {
    let file = File::open(path)?;
    let exif = exif::Reader::new().read_from_container(&mut BufReader::new(file))?;
    Ok(to_metadata(&exif))
}

/// Tags of one main IFD, split by sub-IFD.
#[derive(Default)]
struct IfdTags {
    tiff: Vec<Tag>,
    exif: Vec<Tag>,
    gps: Vec<Tag>,
    interop: Vec<Tag>,
}

impl IfdTags {
    fn push(&mut self, context: Context, tag: Tag) {
        match context {
            Context::Exif => self.exif.push(tag),
            Context::Gps => self.gps.push(tag),
            Context::Interop => self.interop.push(tag),
            _ => self.tiff.push(tag),
        }
    }

    fn into_group(self, name: String) -> TagGroup {
        let interop = TagGroup {
            name: "Interop".into(),
            tags: self.interop,
            groups: vec![],
        };
        let exif = TagGroup {
            name: "Exif".into(),
            tags: self.exif,
            groups: vec![interop].into_iter().filter(|g| !g.is_empty()).collect(),
        };
        let gps = TagGroup {
            name: "GPS".into(),
            tags: self.gps,
            groups: vec![],
        };
        TagGroup {
            name,
            tags: self.tiff,
            groups: [exif, gps].into_iter().filter(|g| !g.is_empty()).collect(),
        }
    }
}

/// Regroup decoded fields into a nested [`Metadata`] tree.
pub fn to_metadata(exif: &Exif) -> Metadata {
    let mut ifds: BTreeMap<u16, IfdTags> = BTreeMap::new();
    for field in exif.fields() {
        let tag = Tag {
            name: field.tag.to_string(),
            value: raw_value(field),
        };
        ifds.entry(field.ifd_num.index())
            .or_default()
            .push(field.tag.context(), tag);
    }

    Metadata::new(
        ifds.into_iter()
            .map(|(index, tags)| tags.into_group(format!("IFD{index}")))
            .filter(|g| !g.is_empty())
            .collect(),
    )
}

fn raw_value(field: &Field) -> RawValue {
    match &field.value {
        Value::Ascii(v) => RawValue::Text(
            v.iter()
                .map(|s| String::from_utf8_lossy(s).into_owned())
                .collect(),
        ),
        Value::Byte(v) => RawValue::Unsigned(v.iter().map(|&x| u64::from(x)).collect()),
        Value::Short(v) => RawValue::Unsigned(v.iter().map(|&x| u64::from(x)).collect()),
        Value::Long(v) => RawValue::Unsigned(v.iter().map(|&x| u64::from(x)).collect()),
        Value::SByte(v) => RawValue::Signed(v.iter().map(|&x| i64::from(x)).collect()),
        Value::SShort(v) => RawValue::Signed(v.iter().map(|&x| i64::from(x)).collect()),
        Value::SLong(v) => RawValue::Signed(v.iter().map(|&x| i64::from(x)).collect()),
        Value::Rational(v) => RawValue::Rational(
            v.iter()
                .map(|r| Ratio::new(r.num.into(), r.denom.into()))
                .collect(),
        ),
        Value::SRational(v) => RawValue::Rational(
            v.iter()
                .map(|r| Ratio::new(r.num.into(), r.denom.into()))
                .collect(),
        ),
        _ => RawValue::Other(field.display_value().to_string()),
    }
}
