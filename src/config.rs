//! Run configuration.
//!
//! Handles loading `bckt-photo.yaml` and combining it with command-line
//! overrides into the [`Settings`] every stage reads.
//!
//! ## Config File
//!
//! ```yaml
//! # All keys are optional.
//! posts_dir: posts
//!
//! # Logical field -> EXIF tag names, best first.
//! exif_to_tags:
//!   camera: [Model]
//!   aperture: [FNumber, ApertureValue]
//!
//! metadata:
//!   title: "@dir1 - @basename"
//!   tags: ["@dir2"]
//! ```
//!
//! A missing or malformed file is not an error for a run: [`load_or_default`]
//! logs a warning and continues with an empty field mapping.
//!
//! ## Precedence
//!
//! - **Posts directory**: `--posts` flag → `posts_dir` → `posts`
//! - **Title**: `--title` flag → `metadata.title` → none
//! - **Tags**: EXIF-derived, then `--tag` flags, then `metadata.tags`

use crate::fields::FieldMapping;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "bckt-photo.yaml";
pub const DEFAULT_POSTS_DIR: &str = "posts";
pub const DEFAULT_LANGUAGE: &str = "en";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Contents of `bckt-photo.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logical field name → candidate EXIF tags in priority order.
    pub exif_to_tags: FieldMapping,
    /// Root directory for generated posts.
    pub posts_dir: Option<PathBuf>,
    /// Title and tag templates applied to every photo.
    pub metadata: MetadataConfig,
}

/// Templates for post title and tags.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MetadataConfig {
    /// Title template, always expanded.
    pub title: Option<String>,
    /// Tag templates, always expanded.
    pub tags: Vec<String>,
}

/// Load and parse a config file.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&content)?)
}

/// Load a config file, falling back to defaults when it is missing or invalid.
pub fn load_or_default(path: &Path) -> Config {
    match load_config(path) {
        Ok(config) => {
            log::debug!("Loaded config from {}", path.display());
            config
        }
        Err(e) => {
            log::warn!("Could not load config file {}: {e}", path.display());
            Config::default()
        }
    }
}

/// Everything a run needs, resolved once from config and command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub posts_dir: PathBuf,
    pub language: String,
    /// Per-run title, literal or template.
    pub title: Option<String>,
    /// Per-run tags, each literal or template.
    pub tags: Vec<String>,
    pub field_mapping: FieldMapping,
    pub title_template: Option<String>,
    pub tag_templates: Vec<String>,
}

impl Settings {
    /// Settings from a config file with no command-line overrides.
    pub fn from_config(config: Config) -> Self {
        Self {
            posts_dir: config
                .posts_dir
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_POSTS_DIR)),
            language: DEFAULT_LANGUAGE.to_string(),
            title: None,
            tags: Vec::new(),
            field_mapping: config.exif_to_tags,
            title_template: config.metadata.title.filter(|t| !t.is_empty()),
            tag_templates: config.metadata.tags,
        }
    }

    pub fn with_posts_dir(mut self, posts_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = posts_dir {
            self.posts_dir = dir;
        }
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title.filter(|t| !t.is_empty());
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_config(Config::default())
    }
}

/// Returns a commented sample `bckt-photo.yaml`.
///
/// Printed by `bckt-photo --print-config`.
pub fn stock_config_yaml() -> &'static str {
    r#"# bckt-photo configuration
# =========================
# All settings are optional.

# Directory that receives generated posts (overridden by --posts).
posts_dir: posts

# Logical fields to pull from EXIF. Each maps to a list of EXIF tag names,
# tried in order; the first tag with a value wins. Every resolved field is
# added to the post front matter and its display value becomes a tag.
# aperture, exposure and focal_length also get a *_friendly variant
# (f/5.6, 1/500s, 35.0mm).
exif_to_tags:
  camera: [Model]
  lens: [LensModel]
  aperture: [FNumber]
  exposure: [ExposureTime]
  focal_length: [FocalLength]
  iso: [PhotographicSensitivity]

# Templates expanded against the photo's path. Placeholders:
#   @dir1, @dir2, ...  directories above the photo, closest first
#   @filename          file name with extension
#   @basename          file name without extension
#   @ext               extension without the dot
metadata:
  title: "@basename"
  tags:
    - "@dir1"
"#
}
