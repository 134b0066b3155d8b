//! Decoded image metadata and value normalization.
//!
//! A decoded photo carries its camera metadata as a tree of tag groups. For
//! EXIF this mirrors the IFD layout:
//!
//! ```text
//! IFD0                     primary image (Make, Model, DateTime, ...)
//! ├── Exif                 capture settings (FNumber, ExposureTime, ...)
//! │   └── Interop
//! └── GPS
//! IFD1                     embedded thumbnail
//! ```
//!
//! Tags are looked up by name anywhere in the tree. The first occurrence in
//! depth-first order wins; a group's own tags come before its children.
//!
//! ## Raw values
//!
//! Decoders hand back heterogeneous values: text, integer lists, rationals.
//! [`normalize`] flattens any of them into a single canonical string:
//!
//! | Raw value | Canonical |
//! |---|---|
//! | `Text(["Canon EOS R5"])` | `Canon EOS R5` |
//! | `Unsigned([400, 0])` | `400` |
//! | `Rational([28/5])` | `28/5` |
//! | `Rational([1/0])` | *(empty)* |
//! | `Unsigned([])` | *(empty)* |
//!
//! An empty canonical string means "no usable value", never an error.

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime};

/// Fixed-width EXIF timestamp layout (`2024:05:01 14:30:00`).
pub const EXIF_DATE_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Tags consulted for the capture date, in priority order.
const DATE_TAGS: &[&str] = &["DateTime", "DateTimeOriginal"];

/// A numerator/denominator pair, signed or unsigned at the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ratio {
    pub num: i64,
    pub denom: i64,
}

impl Ratio {
    pub fn new(num: i64, denom: i64) -> Self {
        Self { num, denom }
    }
}

/// A tag value as produced by the metadata decoder.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Text(Vec<String>),
    Unsigned(Vec<u64>),
    Signed(Vec<i64>),
    Rational(Vec<Ratio>),
    /// Any other representation, already rendered by the decoder.
    Other(String),
}

impl RawValue {
    /// Shorthand for a single-string value.
    pub fn text(s: impl Into<String>) -> Self {
        RawValue::Text(vec![s.into()])
    }
}

/// Convert a raw value into its canonical string.
///
/// List values contribute only their first element. A zero denominator or an
/// empty list yields `""`.
pub fn normalize(value: &RawValue) -> String {
    match value {
        RawValue::Text(v) => v.first().cloned().unwrap_or_default(),
        RawValue::Unsigned(v) => v.first().map(u64::to_string).unwrap_or_default(),
        RawValue::Signed(v) => v.first().map(i64::to_string).unwrap_or_default(),
        RawValue::Rational(v) => match v.first() {
            Some(r) if r.denom != 0 => format!("{}/{}", r.num, r.denom),
            _ => String::new(),
        },
        RawValue::Other(s) => s.clone(),
    }
}

/// A single named tag.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub name: String,
    pub value: RawValue,
}

/// A named group of tags, possibly nesting further groups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagGroup {
    pub name: String,
    pub tags: Vec<Tag>,
    pub groups: Vec<TagGroup>,
}

impl TagGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_tag(mut self, name: impl Into<String>, value: RawValue) -> Self {
        self.tags.push(Tag {
            name: name.into(),
            value,
        });
        self
    }

    pub fn with_group(mut self, group: TagGroup) -> Self {
        self.groups.push(group);
        self
    }

    /// True when neither this group nor any nested group holds a tag.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.groups.iter().all(TagGroup::is_empty)
    }
}

/// Read-only view over everything a decoder found in one file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    groups: Vec<TagGroup>,
}

impl Metadata {
    pub fn new(groups: Vec<TagGroup>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[TagGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(TagGroup::is_empty)
    }

    /// All tags in depth-first order. Lazy, so searches stop at the first hit.
    pub fn tags(&self) -> TagWalk<'_> {
        TagWalk {
            pending: self.groups.iter().rev().collect(),
            current: Default::default(),
        }
    }

    /// First tag with this name, whatever its value.
    pub fn find(&self, name: &str) -> Option<&RawValue> {
        self.tags().find(|t| t.name == name).map(|t| &t.value)
    }

    /// Canonical value of the first tag with this name that normalizes to a
    /// non-empty string. Occurrences with unusable values are skipped.
    pub fn find_value(&self, name: &str) -> Option<String> {
        self.tags()
            .filter(|t| t.name == name)
            .map(|t| normalize(&t.value))
            .find(|v| !v.is_empty())
    }
}

/// Depth-first iterator over a [`Metadata`] tree, driven by an explicit stack.
pub struct TagWalk<'a> {
    pending: Vec<&'a TagGroup>,
    current: std::slice::Iter<'a, Tag>,
}

impl<'a> Iterator for TagWalk<'a> {
    type Item = &'a Tag;

    fn next(&mut self) -> Option<&'a Tag> {
        loop {
            if let Some(tag) = self.current.next() {
                return Some(tag);
            }
            let group = self.pending.pop()?;
            self.pending.extend(group.groups.iter().rev());
            self.current = group.tags.iter();
        }
    }
}

/// Capture date recorded in the metadata, if any.
///
/// Takes the first present tag of `DateTime`, `DateTimeOriginal`. The value
/// must be text in [`EXIF_DATE_FORMAT`]; EXIF stores no zone, so it is read
/// as UTC. A present but unparseable value does not fall through to the next
/// tag.
pub fn capture_date(metadata: &Metadata) -> Option<DateTime<FixedOffset>> {
    let value = DATE_TAGS.iter().find_map(|name| metadata.find(name))?;
    let RawValue::Text(texts) = value else {
        log::warn!("Date tag is not text: {value:?}");
        return None;
    };
    let text = texts.first()?.trim();
    match NaiveDateTime::parse_from_str(text, EXIF_DATE_FORMAT) {
        Ok(naive) => Some(naive.and_utc().fixed_offset()),
        Err(e) => {
            log::warn!("Unparseable capture date {text:?}: {e}");
            None
        }
    }
}

/// Publication date for a post: the capture date, or the current local time.
pub fn post_date(metadata: Option<&Metadata>) -> DateTime<FixedOffset> {
    metadata
        .and_then(capture_date)
        .unwrap_or_else(|| Local::now().fixed_offset())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike, Utc};

    fn sample() -> Metadata {
        Metadata::new(vec![
            TagGroup::new("IFD0")
                .with_tag("Model", RawValue::text("X100V"))
                .with_tag("DateTime", RawValue::text("2024:05:01 14:30:00"))
                .with_group(
                    TagGroup::new("Exif")
                        .with_tag("FNumber", RawValue::Rational(vec![Ratio::new(28, 5)]))
                        .with_tag("PhotographicSensitivity", RawValue::Unsigned(vec![400]))
                        .with_group(
                            TagGroup::new("Interop")
                                .with_tag("InteroperabilityIndex", RawValue::text("R98")),
                        ),
                )
                .with_group(TagGroup::new("GPS").with_tag("GPSAltitudeRef", RawValue::Unsigned(vec![0]))),
            TagGroup::new("IFD1").with_tag("Model", RawValue::text("thumbnail model")),
        ])
    }

    // =========================================================================
    // normalize() tests
    // =========================================================================

    #[test]
    fn normalize_single_string() {
        assert_eq!(normalize(&RawValue::text("Canon")), "Canon");
    }

    #[test]
    fn normalize_takes_first_element() {
        assert_eq!(normalize(&RawValue::Unsigned(vec![400, 800])), "400");
        assert_eq!(normalize(&RawValue::Signed(vec![-2, 5])), "-2");
        assert_eq!(
            normalize(&RawValue::Text(vec!["a".into(), "b".into()])),
            "a"
        );
    }

    #[test]
    fn normalize_empty_list_is_empty() {
        assert_eq!(normalize(&RawValue::Unsigned(vec![])), "");
        assert_eq!(normalize(&RawValue::Text(vec![])), "");
        assert_eq!(normalize(&RawValue::Rational(vec![])), "");
    }

    #[test]
    fn normalize_rational_as_fraction() {
        assert_eq!(normalize(&RawValue::Rational(vec![Ratio::new(28, 5)])), "28/5");
        assert_eq!(normalize(&RawValue::Rational(vec![Ratio::new(-1, 3)])), "-1/3");
    }

    #[test]
    fn normalize_zero_denominator_is_empty() {
        assert_eq!(normalize(&RawValue::Rational(vec![Ratio::new(1, 0)])), "");
    }

    #[test]
    fn normalize_other_passes_through() {
        assert_eq!(normalize(&RawValue::Other("2.30".into())), "2.30");
    }

    // =========================================================================
    // Tree search
    // =========================================================================

    #[test]
    fn tags_walk_depth_first() {
        let meta = sample();
        let names: Vec<&str> = meta.tags().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Model",
                "DateTime",
                "FNumber",
                "PhotographicSensitivity",
                "InteroperabilityIndex",
                "GPSAltitudeRef",
                "Model",
            ]
        );
    }

    #[test]
    fn find_reaches_nested_groups() {
        let meta = sample();
        assert_eq!(
            meta.find("InteroperabilityIndex"),
            Some(&RawValue::text("R98"))
        );
        assert_eq!(meta.find_value("FNumber").as_deref(), Some("28/5"));
    }

    #[test]
    fn find_prefers_first_occurrence() {
        assert_eq!(sample().find_value("Model").as_deref(), Some("X100V"));
    }

    #[test]
    fn find_value_skips_unusable_occurrence() {
        let meta = Metadata::new(vec![
            TagGroup::new("IFD0").with_tag("FNumber", RawValue::Rational(vec![Ratio::new(1, 0)])),
            TagGroup::new("IFD1").with_tag("FNumber", RawValue::Rational(vec![Ratio::new(8, 1)])),
        ]);
        assert_eq!(meta.find_value("FNumber").as_deref(), Some("8/1"));
    }

    #[test]
    fn find_missing_tag() {
        assert_eq!(sample().find("LensModel"), None);
        assert_eq!(Metadata::default().find_value("Model"), None);
    }

    #[test]
    fn empty_groups_make_empty_metadata() {
        let meta = Metadata::new(vec![TagGroup::new("IFD0").with_group(TagGroup::new("Exif"))]);
        assert!(meta.is_empty());
        assert!(!sample().is_empty());
    }

    // =========================================================================
    // Dates
    // =========================================================================

    #[test]
    fn capture_date_from_datetime() {
        let date = capture_date(&sample()).unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 5, 1));
        assert_eq!((date.hour(), date.minute(), date.second()), (14, 30, 0));
        assert_eq!(date.offset().local_minus_utc(), 0);
    }

    #[test]
    fn capture_date_falls_back_to_original() {
        let meta = Metadata::new(vec![TagGroup::new("IFD0").with_group(
            TagGroup::new("Exif")
                .with_tag("DateTimeOriginal", RawValue::text("2019:12:31 23:59:59")),
        )]);
        let date = capture_date(&meta).unwrap();
        assert_eq!(date.year(), 2019);
        assert_eq!(date.timestamp(), 1577836799);
    }

    #[test]
    fn capture_date_unparseable_is_none() {
        let meta = Metadata::new(vec![
            TagGroup::new("IFD0").with_tag("DateTime", RawValue::text("2024-05-01 14:30")),
        ]);
        assert_eq!(capture_date(&meta), None);
    }

    #[test]
    fn capture_date_non_text_is_none() {
        let meta = Metadata::new(vec![
            TagGroup::new("IFD0").with_tag("DateTime", RawValue::Unsigned(vec![20240501])),
        ]);
        assert_eq!(capture_date(&meta), None);
    }

    #[test]
    fn post_date_without_metadata_is_now() {
        let before = Utc::now().timestamp();
        let date = post_date(None);
        let after = Utc::now().timestamp();
        assert!(date.timestamp() >= before && date.timestamp() <= after);
    }

    #[test]
    fn post_date_uses_capture_date() {
        assert_eq!(post_date(Some(&sample())).timestamp(), 1714573800);
    }
}
