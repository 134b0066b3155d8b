//! CLI output formatting.
//!
//! Every display function comes in two flavors: `format_*` builds the lines
//! and `print_*` writes them to stdout. Tests check the formatters.
//!
//! Posts are listed by slug with the source and thumbnail size as indented
//! context, positional index first:
//!
//! ```text
//! 001 beach-day
//!     Source: photos/beach.jpg
//!     Post: posts/beach-day/beach-day.md
//!     Thumbnail: 800x600
//! 002 dunes
//!     ...
//!
//! Failed
//! 001 photos/broken.jpg
//!     Failed to create thumbnail: ...
//!
//! 2 posts created, 1 failed
//! ```

use crate::process::CreatedPost;
use crate::scan::BatchSummary;
use std::path::Path;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Post identity: the name of its directory, which is its slug.
fn post_name(post: &CreatedPost) -> String {
    post.post_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| post.post_dir.display().to_string())
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

// ============================================================================
// Posts
// ============================================================================

/// Format one created post: header plus indented context lines.
pub fn format_post_created(index: usize, post: &CreatedPost) -> Vec<String> {
    vec![
        format!("{} {}", format_index(index), post_name(post)),
        format!("{}Source: {}", indent(1), post.source.display()),
        format!("{}Post: {}", indent(1), post.post_file.display()),
        format!(
            "{}Thumbnail: {}x{}",
            indent(1),
            post.thumbnail.width,
            post.thumbnail.height
        ),
    ]
}

/// Format the outcome of a run: created posts, failures, then a count line.
pub fn format_batch_summary(summary: &BatchSummary) -> Vec<String> {
    let mut lines = Vec::new();

    for (i, post) in summary.created.iter().enumerate() {
        lines.extend(format_post_created(i + 1, post));
    }

    if !summary.failed.is_empty() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push("Failed".to_string());
        for (i, failed) in summary.failed.iter().enumerate() {
            lines.push(format!("{} {}", format_index(i + 1), failed.source.display()));
            lines.push(format!("{}{}", indent(1), failed.error));
        }
    }

    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!(
        "{} created, {} failed",
        plural(summary.created.len(), "post"),
        summary.failed.len()
    ));
    lines
}

/// Print the outcome of a run to stdout.
pub fn print_batch_summary(summary: &BatchSummary) {
    for line in format_batch_summary(summary) {
        println!("{}", line);
    }
}

/// Format the `--print-config` preamble naming the file it would be read from.
pub fn format_config_source(path: &Path, exists: bool) -> String {
    if exists {
        format!("# Active config file: {}", path.display())
    } else {
        format!("# No config file at {}; stock settings below", path.display())
    }
}
