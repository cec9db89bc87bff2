//! Materializes remote files on the local filesystem.
//!
//! A remote path is mapped below the final segment of the base directory,
//! missing parent directories are created, and the body is streamed into a
//! freshly truncated file.

mod destination;
mod error;

pub use destination::relative_destination;
pub use error::{FsOp, SaveError};

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

const BUF_SIZE: usize = 64 * 1024;

/// Outcome of a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Saved {
    /// Path the body was written to.
    pub path: PathBuf,
    /// Number of body bytes written.
    pub bytes: u64,
}

/// Saves `body` at the destination of `full_path` relative to `base`,
/// resolved against the current working directory.
pub fn save_file<R: Read>(
    base: impl AsRef<Path>,
    full_path: impl AsRef<Path>,
    body: R,
) -> Result<Saved, SaveError> {
    save_file_in(Path::new(""), base, full_path, body)
}

/// Like [`save_file`], but the destination is placed under `root`.
///
/// Errors are returned unchanged: a failed read leaves whatever was copied
/// before the failure on disk, and the file handle is closed on every path.
pub fn save_file_in<R: Read>(
    root: &Path,
    base: impl AsRef<Path>,
    full_path: impl AsRef<Path>,
    mut body: R,
) -> Result<Saved, SaveError> {
    let dest = root.join(relative_destination(base, full_path)?);

    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        mkdir_all(parent)?;
    }

    let mut file = File::create(&dest).map_err(|e| SaveError::fs(FsOp::Open, &dest, e))?;
    let bytes = copy_body(&mut body, &mut file, &dest)?;

    tracing::debug!(path = %dest.display(), bytes, "saved file");
    Ok(Saved { path: dest, bytes })
}

/// Creates `path` and its missing ancestors, top down. A failure names the
/// component that could not be created. Losing a creation race to another
/// caller is not an error.
fn mkdir_all(path: &Path) -> Result<(), SaveError> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => return Ok(()),
        Ok(_) => return Err(SaveError::fs(FsOp::Mkdir, path, not_a_directory())),
        Err(_) => {}
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        mkdir_all(parent)?;
    }

    match fs::create_dir(path) {
        Ok(()) => Ok(()),
        Err(_) if fs::symlink_metadata(path).map(|m| m.is_dir()).unwrap_or(false) => Ok(()),
        Err(e) => Err(SaveError::fs(FsOp::Mkdir, path, e)),
    }
}

#[cfg(unix)]
fn not_a_directory() -> io::Error {
    io::Error::from_raw_os_error(libc::ENOTDIR)
}

#[cfg(not(unix))]
fn not_a_directory() -> io::Error {
    io::Error::new(io::ErrorKind::Other, "not a directory")
}

/// Copies until EOF, keeping read failures apart from write failures.
fn copy_body<R: Read, W: Write>(body: &mut R, out: &mut W, dest: &Path) -> Result<u64, SaveError> {
    let mut buf = vec![0u8; BUF_SIZE];
    let mut written = 0u64;
    loop {
        let n = match body.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(SaveError::Read(e)),
        };
        out.write_all(&buf[..n])
            .map_err(|e| SaveError::fs(FsOp::Write, dest, e))?;
        written += n as u64;
    }
    out.flush().map_err(|e| SaveError::fs(FsOp::Write, dest, e))?;
    Ok(written)
}
