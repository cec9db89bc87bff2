//! Error type for repository URL resolution.

use thiserror::Error;

/// Why a user-supplied GitHub URL was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The input does not target `github.com`.
    #[error("not a valid GitHub URL")]
    NotValidUrl,
    /// The host is right but the path is not `owner/repo/tree/branch/path...`.
    #[error("not a valid GitHub path, expected owner/repo/tree/<ref>/<path>")]
    NotValidFormat,
}
