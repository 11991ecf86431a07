//! Path parsing for tree addressing.
//!
//! Paths use `/` or `\` as separator and are always relative to the node an
//! operation is called on. One leading and one trailing separator are ignored.
//! Repeated separators are not collapsed: `a//b` yields an empty middle segment.

use crate::error::TarballError;

/// Name reserved for a root node.
pub const ROOT_NAME: &str = "/";

/// Final segment of `path`, or `""` when there is none.
///
/// A path consisting of exactly one separator is returned unchanged.
pub fn normalize_name(path: &str) -> String {
    if path == "/" || path == "\\" {
        return path.to_string();
    }
    split_segments(path).pop().unwrap_or_default()
}

/// `path` without its final segment, joined with `/`.
pub fn parent_path(path: &str) -> String {
    let mut segments = split_segments(path);
    segments.pop();
    segments.join("/")
}

/// Split `path` into segments after normalizing `\` to `/` and trimming one
/// leading and one trailing separator. An empty path has no segments.
pub fn split_segments(path: &str) -> Vec<String> {
    let normalized = path.replace('\\', "/");
    let trimmed = normalized.strip_prefix('/').unwrap_or(&normalized);
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.split('/').map(str::to_string).collect()
}

/// Join an archive path prefix and a child name.
pub fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", prefix, name)
    }
}

/// Segments of `path` for a mutating operation. Empty segments are rejected.
pub(crate) fn checked_segments(path: &str) -> Result<Vec<String>, TarballError> {
    let segments = split_segments(path);
    if segments.iter().any(String::is_empty) {
        return Err(TarballError::invalid_path(path, "empty path segment"));
    }
    Ok(segments)
}
