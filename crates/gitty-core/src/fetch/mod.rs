//! Raw file fetching over HTTP.
//!
//! Uses the curl crate (libcurl) to GET a single file from the raw content
//! host, `<raw_base_url>/<owner>/<repo>/<ref>/<path>`. The transfer runs on
//! a worker thread and the body is streamed to the caller through a bounded
//! channel, so a failure mid-transfer shows up as a body read error. Directory
//! listing is not performed here.

mod body;
mod transfer;

pub use body::HttpBody;

use anyhow::{Context, Result};
use std::sync::mpsc::sync_channel;
use std::thread;
use std::time::Duration;

use body::Event;
use transfer::TransferOptions;

use crate::config::GittyConfig;
use crate::repo_url::RepoRef;
use crate::source::{ContentSource, RemoteFile};

/// Body chunks buffered between curl and the reader.
const CHANNEL_CHUNKS: usize = 16;

/// Content source that treats the repository path as one file.
#[derive(Debug, Clone)]
pub struct RawFileSource {
    base_url: String,
    connect_timeout: Duration,
    timeout: Duration,
    user_agent: Option<String>,
}

impl RawFileSource {
    pub fn from_config(cfg: &GittyConfig) -> Self {
        Self {
            base_url: cfg.raw_base_url.clone(),
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            timeout: Duration::from_secs(cfg.timeout_secs),
            user_agent: cfg.user_agent.clone(),
        }
    }

    /// URL the file for `repo` is served from. Segments are percent-encoded as needed.
    pub fn raw_url(&self, repo: &RepoRef) -> Result<String> {
        let mut url = url::Url::parse(&self.base_url)
            .with_context(|| format!("invalid raw base URL: {}", self.base_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("raw base URL cannot be a base: {}", self.base_url))?
            .pop_if_empty()
            .push(&repo.owner)
            .push(&repo.repo)
            .push(&repo.reference)
            .extend(repo.path.split('/'));
        Ok(url.into())
    }

    /// Starts the GET on a worker thread and waits for the response status.
    /// The returned body streams the rest of the transfer.
    fn get(&self, url: &str) -> Result<HttpBody> {
        let (tx, rx) = sync_channel(CHANNEL_CHUNKS);
        let opts = self.transfer_options();
        let worker_url = url.to_string();
        thread::Builder::new()
            .name("gitty-fetch".to_string())
            .spawn(move || transfer::run(&worker_url, &opts, tx))
            .context("failed to spawn fetch thread")?;

        match rx.recv() {
            Ok(Event::Status(code)) if (200..300).contains(&code) => Ok(HttpBody::new(rx)),
            Ok(Event::Status(code)) => anyhow::bail!("GET {} returned HTTP {}", url, code),
            Ok(Event::Failed(msg)) => anyhow::bail!("GET {}: {}", url, msg),
            Ok(other) => anyhow::bail!("GET {}: unexpected transfer event {:?}", url, other),
            Err(_) => anyhow::bail!("GET {}: fetch thread exited without a response", url),
        }
    }

    fn transfer_options(&self) -> TransferOptions {
        TransferOptions {
            connect_timeout: self.connect_timeout,
            timeout: self.timeout,
            user_agent: self.user_agent.clone(),
        }
    }
}

impl ContentSource for RawFileSource {
    type Body = HttpBody;

    fn fetch(&self, repo: &RepoRef) -> Result<Vec<RemoteFile<Self::Body>>> {
        let url = self.raw_url(repo)?;
        tracing::debug!(%url, "fetching raw file");
        let body = self.get(&url)?;
        Ok(vec![RemoteFile {
            path: repo.path.clone(),
            body,
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(base: &str) -> RawFileSource {
        let cfg = GittyConfig {
            raw_base_url: base.to_string(),
            ..GittyConfig::default()
        };
        RawFileSource::from_config(&cfg)
    }

    #[test]
    fn raw_url_joins_repo_parts() {
        let repo = RepoRef::parse("github.com/o/r/tree/main/d1/file.txt").unwrap();
        assert_eq!(
            source("https://raw.githubusercontent.com")
                .raw_url(&repo)
                .unwrap(),
            "https://raw.githubusercontent.com/o/r/main/d1/file.txt"
        );
        assert_eq!(
            source("http://127.0.0.1:8080/").raw_url(&repo).unwrap(),
            "http://127.0.0.1:8080/o/r/main/d1/file.txt"
        );
    }

    #[test]
    fn raw_url_encodes_spaces() {
        let repo = RepoRef::parse("github.com/o/r/tree/main/my docs/a b.md").unwrap();
        assert_eq!(
            source("https://raw.githubusercontent.com")
                .raw_url(&repo)
                .unwrap(),
            "https://raw.githubusercontent.com/o/r/main/my%20docs/a%20b.md"
        );
    }

    #[test]
    fn raw_url_rejects_bad_base() {
        let repo = RepoRef::parse("github.com/o/r/tree/main/f").unwrap();
        assert!(source("not a url").raw_url(&repo).is_err());
        assert!(source("mailto:x@example.com").raw_url(&repo).is_err());
    }
}
