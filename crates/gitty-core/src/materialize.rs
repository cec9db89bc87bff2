//! Batch driver: pull files from a content source and save each one.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::repo_url::RepoRef;
use crate::source::ContentSource;
use crate::storage::{self, SaveError};

/// A file that was written in full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    pub remote_path: String,
    pub local_path: PathBuf,
    pub bytes: u64,
}

/// A file that was not fully saved. Bytes read before a body failure may
/// still be on disk.
#[derive(Debug)]
pub struct FailedFile {
    pub remote_path: String,
    pub error: SaveError,
}

#[derive(Debug, Default)]
pub struct MaterializeReport {
    pub saved: Vec<SavedFile>,
    pub failed: Vec<FailedFile>,
}

impl MaterializeReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Fetches the files for `repo` and saves each below `root`, anchored at the
/// repository path so the tree lands in a directory named after its last
/// segment. A failed file is recorded and the remaining files still run.
pub fn materialize<S: ContentSource>(
    source: &S,
    repo: &RepoRef,
    root: &Path,
) -> Result<MaterializeReport> {
    let files = source.fetch(repo)?;
    tracing::info!(repo = %repo, files = files.len(), "materializing");

    let mut report = MaterializeReport::default();
    for file in files {
        match storage::save_file_in(root, &repo.path, &file.path, file.body) {
            Ok(saved) => report.saved.push(SavedFile {
                remote_path: file.path,
                local_path: saved.path,
                bytes: saved.bytes,
            }),
            Err(error) => {
                tracing::warn!(remote = %file.path, "save failed: {}", error);
                report.failed.push(FailedFile {
                    remote_path: file.path,
                    error,
                });
            }
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::RemoteFile;
    use std::io::{self, Cursor, Read};

    struct MemorySource(Vec<(&'static str, &'static [u8])>);

    impl ContentSource for MemorySource {
        type Body = Cursor<&'static [u8]>;

        fn fetch(&self, _repo: &RepoRef) -> Result<Vec<RemoteFile<Self::Body>>> {
            Ok(self
                .0
                .iter()
                .map(|(path, body)| RemoteFile {
                    path: path.to_string(),
                    body: Cursor::new(*body),
                })
                .collect())
        }
    }

    #[test]
    fn saves_tree_under_last_path_segment() {
        let root = tempfile::tempdir().unwrap();
        let repo = RepoRef::parse("https://github.com/o/r/tree/main/src/lib").unwrap();
        let source = MemorySource(vec![
            ("src/lib/a.rs", &b"a"[..]),
            ("src/lib/nested/b.rs", &b"bb"[..]),
        ]);
        let report = materialize(&source, &repo, root.path()).unwrap();
        assert!(report.is_complete());
        assert_eq!(report.saved.len(), 2);
        assert_eq!(
            std::fs::read(root.path().join("lib/a.rs")).unwrap(),
            b"a"
        );
        assert_eq!(
            std::fs::read(root.path().join("lib/nested/b.rs")).unwrap(),
            b"bb"
        );
        assert_eq!(report.saved[1].bytes, 2);
    }

    #[test]
    fn records_failures_and_continues() {
        let root = tempfile::tempdir().unwrap();
        let repo = RepoRef::parse("github.com/o/r/tree/main/d").unwrap();
        let source = MemorySource(vec![("/abs/x.txt", &b"x"[..]), ("d/ok.txt", &b"ok"[..])]);
        let report = materialize(&source, &repo, root.path()).unwrap();
        assert!(!report.is_complete());
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].remote_path, "/abs/x.txt");
        assert!(matches!(
            report.failed[0].error,
            SaveError::RelativePath { .. }
        ));
        assert_eq!(report.saved.len(), 1);
        assert_eq!(report.saved[0].local_path, root.path().join("d").join("ok.txt"));
    }

    struct BrokenSource;

    struct BrokenBody;

    impl Read for BrokenBody {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stream closed"))
        }
    }

    impl ContentSource for BrokenSource {
        type Body = BrokenBody;

        fn fetch(&self, _repo: &RepoRef) -> Result<Vec<RemoteFile<Self::Body>>> {
            Ok(vec![RemoteFile {
                path: "d/f.txt".to_string(),
                body: BrokenBody,
            }])
        }
    }

    #[test]
    fn body_failure_is_reported_as_read_error() {
        let root = tempfile::tempdir().unwrap();
        let repo = RepoRef::parse("github.com/o/r/tree/main/d").unwrap();
        let report = materialize(&BrokenSource, &repo, root.path()).unwrap();
        assert_eq!(report.failed.len(), 1);
        assert!(matches!(report.failed[0].error, SaveError::Read(_)));
    }
}
