//! Error types for materializing remote files on disk.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Filesystem operation that failed while saving a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsOp {
    Mkdir,
    Open,
    Write,
}

impl FsOp {
    pub fn as_str(self) -> &'static str {
        match self {
            FsOp::Mkdir => "mkdir",
            FsOp::Open => "open",
            FsOp::Write => "write",
        }
    }
}

impl fmt::Display for FsOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by `save_file` and `relative_destination`.
#[derive(Debug, Error)]
pub enum SaveError {
    /// `target` cannot be expressed lexically relative to `base`.
    #[error("can't make {} relative to {}", target.display(), base.display())]
    RelativePath { base: PathBuf, target: PathBuf },

    /// A filesystem call failed; `source` is the untranslated OS error.
    #[error("{op} {}: {source}", path.display())]
    Fs {
        op: FsOp,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading the body failed partway through the copy.
    #[error(transparent)]
    Read(io::Error),
}

impl SaveError {
    pub(crate) fn fs(op: FsOp, path: &Path, source: io::Error) -> Self {
        SaveError::Fs {
            op,
            path: path.to_path_buf(),
            source,
        }
    }

    /// The failing filesystem operation, if this is a filesystem error.
    pub fn op(&self) -> Option<FsOp> {
        match self {
            SaveError::Fs { op, .. } => Some(*op),
            _ => None,
        }
    }

    /// Raw OS error code of the underlying I/O error, when there is one.
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            SaveError::Fs { source, .. } => source.raw_os_error(),
            SaveError::Read(e) => e.raw_os_error(),
            SaveError::RelativePath { .. } => None,
        }
    }
}
