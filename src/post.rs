//! Post records and their on-disk layout.
//!
//! A post is a directory named after its slug holding the original image,
//! its thumbnail, and a Markdown file whose YAML front matter describes the
//! photo:
//!
//! ```text
//! posts/2025/vacation/beach-day/
//! ├── beach-day.md
//! ├── beach.jpg
//! └── beach-thumb.jpg
//! ```
//!
//! ```yaml
//! ---
//! title: Beach Day
//! date: 2024-05-01T14:30:00Z
//! slug: beach-day
//! tags:
//! - X-T5
//! type: photo
//! attached:
//! - beach.jpg
//! - beach-thumb.jpg
//! image: beach.jpg
//! thumb: beach-thumb.jpg
//! language: en
//! aperture: 28/5
//! aperture_friendly: f/5.6
//! ---
//!
//! ```

use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Value of the `type` key for every post this tool writes.
pub const POST_TYPE: &str = "photo";

/// Front matter keys owned by the record itself. Extra fields never
/// override them.
pub const RESERVED_KEYS: &[&str] = &[
    "title", "date", "slug", "tags", "type", "attached", "image", "thumb", "language",
];

const FRONT_MATTER_FENCE: &str = "---";

#[derive(Error, Debug)]
pub enum PostError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Everything written to a post's front matter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostRecord {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(serialize_with = "serialize_date")]
    pub date: DateTime<FixedOffset>,
    pub slug: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub attached: Vec<String>,
    pub image: String,
    pub thumb: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub language: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

fn serialize_date<S: Serializer>(date: &DateTime<FixedOffset>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Secs, true))
}

impl PostRecord {
    /// A photo post with no attachments or extra fields yet.
    pub fn new(
        title: String,
        date: DateTime<FixedOffset>,
        slug: String,
        tags: Vec<String>,
        language: String,
    ) -> Self {
        Self {
            title,
            date,
            slug,
            tags,
            kind: POST_TYPE.to_string(),
            attached: Vec::new(),
            image: String::new(),
            thumb: String::new(),
            language,
            extra: BTreeMap::new(),
        }
    }

    /// Attach the copied image and its thumbnail, in that order.
    pub fn with_attachments(mut self, image: String, thumb: String) -> Self {
        self.attached = vec![image.clone(), thumb.clone()];
        self.image = image;
        self.thumb = thumb;
        self
    }

    /// Add extra fields. Names taken by a fixed key are dropped with a
    /// warning.
    pub fn with_extra(mut self, extra: BTreeMap<String, String>) -> Self {
        for (key, value) in extra {
            if RESERVED_KEYS.contains(&key.as_str()) {
                log::warn!("Dropping field {key:?}: it collides with a front matter key");
                continue;
            }
            self.extra.insert(key, value);
        }
        self
    }
}

/// Render the record as a fenced YAML block followed by a blank line.
pub fn render_front_matter(record: &PostRecord) -> Result<String, PostError> {
    let yaml = serde_yaml::to_string(record)?;
    Ok(format!("{FRONT_MATTER_FENCE}\n{yaml}{FRONT_MATTER_FENCE}\n\n"))
}

/// Create `<posts_dir>/[<relative_dir>/]<slug>` and return its path.
pub fn create_post_dir(posts_dir: &Path, relative_dir: &Path, slug: &str) -> io::Result<PathBuf> {
    let dir = posts_dir.join(relative_dir).join(slug);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Copy `src` to `dst` and sync the copy to disk.
pub fn copy_file(src: &Path, dst: &Path) -> io::Result<u64> {
    let mut reader = File::open(src)?;
    let mut writer = File::create(dst)?;
    let bytes = io::copy(&mut reader, &mut writer)?;
    writer.flush()?;
    writer.sync_all()?;
    Ok(bytes)
}

/// Write `<post_dir>/<slug>.md` and return its path.
pub fn write_post(post_dir: &Path, record: &PostRecord) -> Result<PathBuf, PostError> {
    let path = post_dir.join(format!("{}.md", record.slug));
    fs::write(&path, render_front_matter(record)?)?;
    Ok(path)
}
