//! GitHub URL resolution.
//!
//! Turns a browser URL such as `https://github.com/owner/repo/tree/main/docs`
//! into the canonical repository path `owner/repo/tree/main/docs`. Only the
//! `github.com` host and the `tree` URL shape are accepted.

mod error;
mod format;

use std::fmt;
use std::str::FromStr;

pub use error::ResolveError;
pub use format::validate;

use format::MIN_SEGMENTS;

const HTTPS_SCHEME: &str = "https://";
const GITHUB_HOST: &str = "github.com/";

/// Resolves a user-supplied URL to its validated `owner/repo/tree/<ref>/<path>` form.
///
/// # Examples
///
/// - `resolve_repo_path("github.com/o/r/tree/b/d1/file.txt")` → `Ok("o/r/tree/b/d1/file.txt")`
/// - `resolve_repo_path("https://gitlab.com/o/r/tree/b/d")` → `Err(NotValidUrl)`
/// - `resolve_repo_path("github.com/o/r")` → `Err(NotValidFormat)`
pub fn resolve_repo_path(url: &str) -> Result<String, ResolveError> {
    let without_scheme = url.strip_prefix(HTTPS_SCHEME).unwrap_or(url);
    let path = without_scheme
        .strip_prefix(GITHUB_HOST)
        .ok_or(ResolveError::NotValidUrl)?;
    validate(path)
}

/// Structured view of a validated repository path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
    /// Branch, tag, or commit the URL browses.
    pub reference: String,
    /// In-repo path below the ref; may name a directory or a file.
    pub path: String,
}

impl RepoRef {
    /// Parses a GitHub URL (scheme optional).
    pub fn parse(url: &str) -> Result<Self, ResolveError> {
        let path = resolve_repo_path(url)?;
        Self::from_validated(&path)
    }

    /// Builds a `RepoRef` from a host-less `owner/repo/tree/<ref>/<path>` string.
    pub fn from_validated(path: &str) -> Result<Self, ResolveError> {
        let path = validate(path)?;
        let mut parts = path.splitn(MIN_SEGMENTS, '/');
        let mut next = || parts.next().map(str::to_string).ok_or(ResolveError::NotValidFormat);
        let owner = next()?;
        let repo = next()?;
        let _tree = next()?;
        let reference = next()?;
        let path = next()?;
        Ok(RepoRef {
            owner,
            repo,
            reference,
            path,
        })
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/tree/{}/{}",
            self.owner, self.repo, self.reference, self.path
        )
    }
}

impl FromStr for RepoRef {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
