//! Logical field resolution: from configured tag names to front matter values.
//!
//! A [`FieldMapping`] names the logical fields a post should carry and, for
//! each, the metadata tags that may hold it, best first:
//!
//! ```yaml
//! exif_to_tags:
//!   iso: [PhotographicSensitivity, ISOSpeed]
//!   aperture: [FNumber, ApertureValue]
//! ```
//!
//! The first candidate tag with a usable value wins; later candidates are
//! never consulted. Each resolved field has a canonical value (see
//! [`normalize`](crate::metadata::normalize)) and a friendly value for the
//! handful of photographic quantities that have a conventional notation:
//!
//! | Field | Canonical | Friendly |
//! |---|---|---|
//! | `aperture` | `28/5` | `f/5.6` |
//! | `focal_length` | `200/1` | `200.0mm` |
//! | `exposure` | `1/500` | `1/500s` |

use crate::metadata::Metadata;
use std::collections::{BTreeMap, BTreeSet};

/// Logical field name → candidate metadata tag names in priority order.
pub type FieldMapping = BTreeMap<String, Vec<String>>;

/// Suffix for the sibling field carrying a friendly value.
pub const FRIENDLY_SUFFIX: &str = "_friendly";

/// Render a canonical value in the conventional notation for `field`.
///
/// Only `aperture`, `focal_length` and `exposure` have one, and only when the
/// value is an integer fraction with a non-zero denominator. Anything else
/// comes back unchanged.
pub fn friendly(field: &str, canonical: &str) -> String {
    let Some((num, denom)) = parse_fraction(canonical) else {
        return canonical.to_string();
    };
    let ratio = num as f64 / denom as f64;
    match field {
        "aperture" => format!("f/{ratio:.1}"),
        "focal_length" => format!("{ratio:.1}mm"),
        // Non-unit numerators (`3/2`) keep the fraction too.
        "exposure" => format!("{canonical}s"),
        _ => canonical.to_string(),
    }
}

/// Parse `<int>/<int>`, rejecting a zero denominator.
fn parse_fraction(s: &str) -> Option<(i64, i64)> {
    let (num, denom) = s.split_once('/')?;
    let num: i64 = num.parse().ok()?;
    let denom: i64 = denom.parse().ok()?;
    (denom != 0).then_some((num, denom))
}

/// A logical field found in the metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedField {
    pub name: String,
    /// Tag the value came from.
    pub source_tag: String,
    pub canonical: String,
    pub friendly: String,
}

impl ResolvedField {
    pub fn has_friendly_form(&self) -> bool {
        self.friendly != self.canonical
    }
}

/// Resolve every logical field that has a usable value, in mapping order.
pub fn resolve(metadata: Option<&Metadata>, mapping: &FieldMapping) -> Vec<ResolvedField> {
    let Some(metadata) = metadata else {
        return Vec::new();
    };
    mapping
        .iter()
        .filter_map(|(name, candidates)| {
            candidates.iter().find_map(|tag| {
                metadata.find_value(tag).map(|canonical| ResolvedField {
                    name: name.clone(),
                    source_tag: tag.clone(),
                    friendly: friendly(name, &canonical),
                    canonical,
                })
            })
        })
        .collect()
}

/// Display tags for the resolved fields: the friendly value of each,
/// deduplicated.
pub fn resolve_tags(metadata: Option<&Metadata>, mapping: &FieldMapping) -> BTreeSet<String> {
    resolve(metadata, mapping)
        .into_iter()
        .map(|field| field.friendly)
        .collect()
}

/// Front matter fields: `<name>: <canonical>` for every resolved field, plus
/// `<name>_friendly: <friendly>` where the two differ.
pub fn resolve_fields(
    metadata: Option<&Metadata>,
    mapping: &FieldMapping,
) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();
    for field in resolve(metadata, mapping) {
        if field.has_friendly_form() {
            fields.insert(format!("{}{FRIENDLY_SUFFIX}", field.name), field.friendly);
        }
        fields.insert(field.name, field.canonical);
    }
    fields
}
