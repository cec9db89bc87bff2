//! Content source interface.
//!
//! The materializer only depends on this trait; how files under a
//! repository path are discovered and fetched is up to the implementation.

use std::io::Read;

use crate::repo_url::RepoRef;

/// One remote file: its repo-relative path and a stream of its bytes.
#[derive(Debug)]
pub struct RemoteFile<R> {
    /// Slash-separated path relative to the repository root.
    pub path: String,
    pub body: R,
}

/// Yields the files under a repository path.
pub trait ContentSource {
    type Body: Read;

    fn fetch(&self, repo: &RepoRef) -> anyhow::Result<Vec<RemoteFile<Self::Body>>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    struct Fixed(Vec<(&'static str, &'static [u8])>);

    impl ContentSource for Fixed {
        type Body = Cursor<&'static [u8]>;

        fn fetch(&self, _repo: &RepoRef) -> anyhow::Result<Vec<RemoteFile<Self::Body>>> {
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
    fn fixed_source_yields_files_in_order() {
        let repo = RepoRef::parse("github.com/o/r/tree/b/d").unwrap();
        let source = Fixed(vec![("d/a.txt", &b"a"[..]), ("d/b.txt", &b"bb"[..])]);
        let mut files = source.fetch(&repo).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path, "d/a.txt");
        let mut buf = Vec::new();
        files[1].body.read_to_end(&mut buf).unwrap();
        assert_eq!(buf, b"bb");
    }
}
