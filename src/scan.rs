//! Input dispatch and the batch driver.
//!
//! The input path is either a single image or a directory. A directory is
//! walked recursively in file name order. Every image found becomes a post
//! under the same relative directory it had under the input root:
//!
//! ```text
//! photos/                         posts/
//! ├── beach.jpg          →        ├── beach/
//! └── 2025/                       └── 2025/
//!     └── vacation/                   └── vacation/
//!         └── dunes.png  →                └── dunes/
//! ```
//!
//! Symlinks are followed. The posts directory is never walked, so a posts
//! tree inside the input tree does not feed earlier output back in.
//!
//! A photo that fails is logged and recorded in the [`BatchSummary`]; the
//! walk moves on. Dangling links and link cycles are skipped with a warning.
//! Only an unreadable input path or a failing walk stops a run.

use crate::config::Settings;
use crate::imaging::ImageBackend;
use crate::naming::is_image;
use crate::process::{CreatedPost, PhotoJob, ProcessError, process_photo};
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Cannot access input {path}: {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("{path}: {source}")]
    Photo {
        path: PathBuf,
        #[source]
        source: ProcessError,
    },
}

/// A photo that could not be posted.
#[derive(Debug)]
pub struct FailedPhoto {
    pub source: PathBuf,
    pub error: ProcessError,
}

/// Outcome of a run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub created: Vec<CreatedPost>,
    pub failed: Vec<FailedPhoto>,
}

/// Every image under `root`, in file name order, following symlinks.
///
/// The directory `exclude` is not entered when it exists below `root`.
pub fn scan_images(root: &Path, exclude: Option<&Path>) -> Result<Vec<PathBuf>, ScanError> {
    let exclude = exclude.and_then(|dir| dir.canonicalize().ok());
    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_excluded(entry, exclude.as_deref()));

    let mut images = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if is_skippable(&err) => {
                log::warn!("Skipping: {}", err);
                continue;
            }
            Err(err) => return Err(err.into()),
        };
        if entry.file_type().is_file() && is_image(entry.path()) {
            images.push(entry.into_path());
        }
    }
    Ok(images)
}

fn is_excluded(entry: &DirEntry, exclude: Option<&Path>) -> bool {
    match exclude {
        Some(dir) if entry.depth() > 0 && entry.file_type().is_dir() => entry
            .path()
            .canonicalize()
            .is_ok_and(|path| path == dir),
        _ => false,
    }
}

/// Link cycles and dangling links below the root.
fn is_skippable(err: &walkdir::Error) -> bool {
    err.loop_ancestor().is_some()
        || (err.depth() > 0
            && err
                .io_error()
                .is_some_and(|e| e.kind() == std::io::ErrorKind::NotFound))
}

/// Directory of `path` relative to `root`; empty when directly under it.
fn relative_dir(path: &Path, root: &Path) -> PathBuf {
    path.parent()
        .and_then(|parent| parent.strip_prefix(root).ok())
        .map(Path::to_path_buf)
        .unwrap_or_default()
}

/// Post every image under `root`, continuing past failed photos.
pub fn process_directory(
    backend: &impl ImageBackend,
    settings: &Settings,
    root: &Path,
) -> Result<BatchSummary, ScanError> {
    log::info!("Processing directory: {}", root.display());
    let mut summary = BatchSummary::default();

    for source in scan_images(root, Some(settings.posts_dir.as_path()))? {
        let job = PhotoJob {
            relative_dir: relative_dir(&source, root),
            base_dir: root.to_path_buf(),
            source,
        };
        match process_photo(backend, settings, &job) {
            Ok(created) => summary.created.push(created),
            Err(error) => {
                log::error!("Error processing {}: {}", job.source.display(), error);
                summary.failed.push(FailedPhoto {
                    source: job.source,
                    error,
                });
            }
        }
    }
    Ok(summary)
}

/// Post a single image. Placeholders count directories from `working_dir`,
/// which a relative `path` is also resolved against. The post goes directly
/// under the posts root.
pub fn process_file(
    backend: &impl ImageBackend,
    settings: &Settings,
    path: &Path,
    working_dir: &Path,
) -> Result<CreatedPost, ScanError> {
    let job = PhotoJob {
        source: working_dir.join(path),
        base_dir: working_dir.to_path_buf(),
        relative_dir: PathBuf::new(),
    };
    process_photo(backend, settings, &job).map_err(|source| ScanError::Photo {
        path: path.to_path_buf(),
        source,
    })
}

/// Post `input`, a single image or a directory of them. A relative `input`
/// is resolved against `working_dir`.
///
/// A failing single image is an error; failures inside a directory are
/// reported in the summary instead.
pub fn run(
    backend: &impl ImageBackend,
    settings: &Settings,
    input: &Path,
    working_dir: &Path,
) -> Result<BatchSummary, ScanError> {
    let input = working_dir.join(input);
    let meta = std::fs::metadata(&input).map_err(|source| ScanError::Input {
        path: input.clone(),
        source,
    })?;

    if meta.is_dir() {
        process_directory(backend, settings, &input)
    } else {
        let created = process_file(backend, settings, &input, working_dir)?;
        Ok(BatchSummary {
            created: vec![created],
            failed: Vec::new(),
        })
    }
}
