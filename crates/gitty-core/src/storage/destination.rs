//! Lexical destination computation.
//!
//! Nothing here touches the filesystem: paths are compared and rewritten
//! component by component, so neither input has to exist.

use std::path::{Component, Path, PathBuf};

use super::SaveError;

/// Computes where `full_path` lands locally: the last segment of `base`
/// followed by `full_path` expressed relative to `base`.
///
/// # Examples
///
/// - `relative_destination("path/to/dir", "path/to/dir/sub/file.txt")` → `dir/sub/file.txt`
/// - `relative_destination("path/to/base", "path/to/dir/file.txt")` → `dir/file.txt`
/// - `relative_destination("/nonexistent/base", "path/to/dir/file.txt")` → `Err(RelativePath)`
pub fn relative_destination(
    base: impl AsRef<Path>,
    full_path: impl AsRef<Path>,
) -> Result<PathBuf, SaveError> {
    let base = base.as_ref();
    let full_path = full_path.as_ref();
    let rel = relative(base, full_path).ok_or_else(|| SaveError::RelativePath {
        base: base.to_path_buf(),
        target: full_path.to_path_buf(),
    })?;
    Ok(clean(&base_name(base).join(rel)))
}

/// Lexically simplifies `path`: drops `.` and empty segments and folds
/// `name/..` pairs. `..` directly under the root is dropped. An empty
/// result becomes `.`.
pub(crate) fn clean(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) => {}
                _ => out.push(comp),
            },
            other => out.push(other),
        }
    }
    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

/// Expresses `target` relative to `base`, or `None` when that cannot be done
/// lexically (one side rooted and the other not, or `base` climbs out
/// of the shared prefix with `..`).
pub(crate) fn relative(base: &Path, target: &Path) -> Option<PathBuf> {
    let base = clean(base);
    let target = clean(target);
    if base == target {
        return Some(PathBuf::from("."));
    }
    if base.has_root() != target.has_root() || prefix_of(&base) != prefix_of(&target) {
        return None;
    }

    let base_parts = significant(&base);
    let target_parts = significant(&target);
    let shared = base_parts
        .iter()
        .zip(&target_parts)
        .take_while(|(b, t)| b == t)
        .count();

    let base_rest = &base_parts[shared..];
    if base_rest.iter().any(|c| *c == Component::ParentDir) {
        return None;
    }

    let mut rel = PathBuf::new();
    for _ in base_rest {
        rel.push("..");
    }
    for comp in &target_parts[shared..] {
        rel.push(comp.as_os_str());
    }
    if rel.as_os_str().is_empty() {
        rel.push(".");
    }
    Some(rel)
}

/// Final raw segment of `path`, trailing separators ignored. A trailing `.`
/// is kept as `.`. A bare root maps to `.` so destinations stay relative.
pub(crate) fn base_name(path: &Path) -> PathBuf {
    if ends_in_cur_dir(path) {
        return PathBuf::from(".");
    }
    match path.components().next_back() {
        Some(Component::Normal(name)) => PathBuf::from(name),
        Some(Component::ParentDir) => PathBuf::from(".."),
        _ => PathBuf::from("."),
    }
}

/// `components()` folds away a trailing `.`, so look at the raw text.
fn ends_in_cur_dir(path: &Path) -> bool {
    let raw = path.to_string_lossy();
    let trimmed = raw.trim_end_matches(std::path::is_separator);
    trimmed.rsplit(std::path::is_separator).next() == Some(".")
}

fn prefix_of(path: &Path) -> Option<Component<'_>> {
    path.components()
        .next()
        .filter(|c| matches!(c, Component::Prefix(_)))
}

/// Components below the root and prefix, without `.` markers.
fn significant(path: &Path) -> Vec<Component<'_>> {
    path.components()
        .filter(|c| matches!(c, Component::Normal(_) | Component::ParentDir))
        .collect()
}
