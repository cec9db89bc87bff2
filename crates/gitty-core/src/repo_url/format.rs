//! Shape check for `owner/repo/tree/<ref>/<path>` repository paths.

use super::ResolveError;

/// Marker segment that separates a browsable tree URL from a bare repo URL.
pub(crate) const TREE_MARKER: &str = "tree";

/// Minimum number of `/`-separated segments: owner, repo, marker, ref, path.
pub(crate) const MIN_SEGMENTS: usize = 5;

/// Checks that `path` has the `owner/repo/tree/<ref>/<path...>` shape.
///
/// Segments are not decoded or normalized; the input is returned unchanged
/// when the shape matches.
pub fn validate(path: &str) -> Result<String, ResolveError> {
    let segments: Vec<&str> = path.split('/').collect();
    if segments.len() < MIN_SEGMENTS || segments[2] != TREE_MARKER {
        return Err(ResolveError::NotValidFormat);
    }
    Ok(path.to_string())
}
