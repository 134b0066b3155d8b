//! Turning one photo into one post.
//!
//! Each photo runs through the same sequence, stopping at the first step
//! that fails:
//!
//! 1. Decode metadata. A file without usable EXIF is still posted, it just
//!    gets no EXIF tags or fields and is dated now.
//! 2. Plan the post: date, title, slug, tags and extra fields. Planning
//!    cannot fail.
//! 3. Create `<posts>/<relative dir>/<slug>/`.
//! 4. Copy the source image into it.
//! 5. Write an 800×800-bounded thumbnail next to it.
//! 6. Write `<slug>.md`.
//!
//! Steps 3 to 6 return a [`ProcessError`]. Nothing is rolled back: a photo
//! that fails at step 5 leaves its post directory with the copied image.
//!
//! ## Title
//!
//! `--title` wins and is expanded when it contains `@`. Otherwise the
//! configured title template is expanded. Otherwise the post is untitled
//! and its slug comes from the date.
//!
//! ## Tags
//!
//! Concatenated in this order, without deduplicating across sources:
//! - friendly EXIF values of the mapped fields (deduplicated, sorted)
//! - `--tag` values, expanded when they contain `@`
//! - configured tag templates, always expanded
//!
//! Expanded tags that come out empty are skipped. Literal `--tag` values are
//! kept as given.

use crate::config::Settings;
use crate::fields::{resolve_fields, resolve_tags};
use crate::imaging::{BackendError, Dimensions, ImageBackend, ThumbnailConfig, create_thumbnail};
use crate::metadata::{Metadata, post_date};
use crate::naming::slug;
use crate::post::{PostError, PostRecord, copy_file, create_post_dir, write_post};
use crate::template::{PathComponents, expand, expand_if_template, extract_components, is_template};
use chrono::{DateTime, FixedOffset};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Source has no file name: {0}")]
    NoFileName(PathBuf),
    #[error("Failed to create post directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to copy image to {path}: {source}")]
    Copy {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to create thumbnail: {0}")]
    Thumbnail(#[source] BackendError),
    #[error("Failed to write post: {0}")]
    Write(#[from] PostError),
}

/// One photo to post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoJob {
    /// The image file.
    pub source: PathBuf,
    /// Root that `@dirN` placeholders are counted from.
    pub base_dir: PathBuf,
    /// Subdirectory of the posts root the post goes under. Empty for none.
    pub relative_dir: PathBuf,
}

/// Everything derived for a post before anything is written.
#[derive(Debug, Clone, PartialEq)]
pub struct PostPlan {
    pub title: String,
    pub date: DateTime<FixedOffset>,
    pub slug: String,
    pub tags: Vec<String>,
    pub fields: BTreeMap<String, String>,
}

/// A post written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedPost {
    pub source: PathBuf,
    pub post_dir: PathBuf,
    pub post_file: PathBuf,
    pub thumbnail: Dimensions,
}

fn read_metadata(backend: &impl ImageBackend, path: &Path) -> Option<Metadata> {
    match backend.read_metadata(path) {
        Ok(metadata) => Some(metadata),
        Err(e) => {
            log::warn!("Could not read EXIF data from {}: {}", path.display(), e);
            None
        }
    }
}

fn resolve_title(settings: &Settings, components: &PathComponents) -> String {
    if let Some(title) = &settings.title {
        expand_if_template(title, components)
    } else if let Some(template) = &settings.title_template {
        expand(template, components)
    } else {
        String::new()
    }
}

fn resolve_all_tags(
    metadata: Option<&Metadata>,
    settings: &Settings,
    components: &PathComponents,
) -> Vec<String> {
    let mut tags: Vec<String> = resolve_tags(metadata, &settings.field_mapping)
        .into_iter()
        .collect();

    for tag in &settings.tags {
        if is_template(tag) {
            let expanded = expand(tag, components);
            if !expanded.is_empty() {
                tags.push(expanded);
            }
        } else {
            tags.push(tag.clone());
        }
    }

    tags.extend(
        settings
            .tag_templates
            .iter()
            .map(|template| expand(template, components))
            .filter(|tag| !tag.is_empty()),
    );
    tags
}

/// Derive a post's date, title, slug, tags and fields. Reads the source's
/// metadata but writes nothing.
pub fn plan_post(backend: &impl ImageBackend, settings: &Settings, job: &PhotoJob) -> PostPlan {
    let components = extract_components(&job.source, &job.base_dir);
    let metadata = read_metadata(backend, &job.source);

    let date = post_date(metadata.as_ref());
    let title = resolve_title(settings, &components);
    let slug = slug(&title, &date);
    let tags = resolve_all_tags(metadata.as_ref(), settings, &components);
    let fields = resolve_fields(metadata.as_ref(), &settings.field_mapping);

    log::debug!(
        "Planned {}: slug={slug} date={date} tags={tags:?}",
        job.source.display()
    );
    PostPlan {
        title,
        date,
        slug,
        tags,
        fields,
    }
}

/// Create the post for one photo.
pub fn process_photo(
    backend: &impl ImageBackend,
    settings: &Settings,
    job: &PhotoJob,
) -> Result<CreatedPost, ProcessError> {
    let image_name = job
        .source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| ProcessError::NoFileName(job.source.clone()))?;

    let plan = plan_post(backend, settings, job);

    let post_dir = create_post_dir(&settings.posts_dir, &job.relative_dir, &plan.slug)
        .map_err(|source| ProcessError::CreateDir {
            path: settings.posts_dir.join(&job.relative_dir).join(&plan.slug),
            source,
        })?;

    let image_path = post_dir.join(&image_name);
    copy_file(&job.source, &image_path).map_err(|source| ProcessError::Copy {
        path: image_path.clone(),
        source,
    })?;

    let thumbnail = create_thumbnail(backend, &job.source, &post_dir, &ThumbnailConfig::default())
        .map_err(ProcessError::Thumbnail)?;

    let record = PostRecord::new(
        plan.title,
        plan.date,
        plan.slug,
        plan.tags,
        settings.language.clone(),
    )
    .with_attachments(image_name, thumbnail.filename)
    .with_extra(plan.fields);
    let post_file = write_post(&post_dir, &record)?;

    log::info!("Post created at {}", post_dir.display());
    Ok(CreatedPost {
        source: job.source.clone(),
        post_dir,
        post_file,
        thumbnail: thumbnail.dimensions,
    })
}
