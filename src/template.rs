//! Path-derived placeholders for titles and tags.
//!
//! Every photo exposes a few names derived from where it sits under the input
//! root. For `/root/2025/vacation/beach.jpg` with base `/root`:
//!
//! | Placeholder | Value |
//! |---|---|
//! | `@dir1` | `vacation` (closest directory) |
//! | `@dir2` | `2025` |
//! | `@filename` | `beach.jpg` |
//! | `@basename` | `beach` |
//! | `@ext` | `jpg` |
//!
//! A title or tag containing `@` is a template; anything else is used as is.
//! Placeholders without a matching component stay in the text untouched.

use crate::naming::split_extension;
use std::collections::BTreeMap;
use std::path::{Component, Path};

/// Marker that turns a string into a template.
pub const PLACEHOLDER: char = '@';

/// Named values extracted from a photo's path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathComponents(BTreeMap<String, String>);

impl PathComponents {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PathComponents {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Extract placeholder values for `file` relative to `base`.
///
/// Directory segments between `base` and the file become `dir1` (closest to
/// the file), `dir2`, and so on outward. A file directly under `base`, or not
/// under it at all, gets no `dirN` entries. `filename`, `basename` and `ext`
/// are always present; `ext` is what follows the last dot of the file name
/// and is empty when there is no dot, so `.jpg` has an empty `basename`.
pub fn extract_components(file: &Path, base: &Path) -> PathComponents {
    let mut components = PathComponents::default();

    let filename = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let (basename, ext) = split_extension(&filename);
    components.insert("basename", basename);
    components.insert("ext", ext);
    components.insert("filename", filename);

    let Some(rel_dir) = file.parent().and_then(|dir| dir.strip_prefix(base).ok()) else {
        return components;
    };
    let segments: Vec<String> = rel_dir
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    for (i, segment) in segments.into_iter().rev().enumerate() {
        components.insert(format!("dir{}", i + 1), segment);
    }

    components
}

/// Whether `s` should be expanded rather than used literally.
pub fn is_template(s: &str) -> bool {
    s.contains(PLACEHOLDER)
}

/// Replace every `@key` in `template` with its component value.
///
/// Substituted values are emitted verbatim and never expanded again. Where
/// keys share a prefix (`@dir1` and `@dir10`) the longest key present wins.
pub fn expand(template: &str, components: &PathComponents) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(at) = rest.find(PLACEHOLDER) {
        out.push_str(&rest[..at]);
        let after = &rest[at + PLACEHOLDER.len_utf8()..];
        let matched = components
            .iter()
            .filter(|(key, _)| !key.is_empty() && after.starts_with(key))
            .max_by_key(|(key, _)| key.len());
        match matched {
            Some((key, value)) => {
                out.push_str(value);
                rest = &after[key.len()..];
            }
            None => {
                out.push(PLACEHOLDER);
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Expand `s` if it is a template, otherwise return it unchanged.
pub fn expand_if_template(s: &str, components: &PathComponents) -> String {
    if is_template(s) {
        expand(s, components)
    } else {
        s.to_string()
    }
}
