//! `gitty get <url>` – fetch and materialize the file behind a tree URL.

use anyhow::Result;
use gitty_core::checksum;
use gitty_core::config::GittyConfig;
use gitty_core::fetch::RawFileSource;
use gitty_core::materialize::materialize;
use gitty_core::repo_url::RepoRef;
use std::path::Path;

pub fn run_get(cfg: &GittyConfig, url: &str, root: &Path, with_checksum: bool) -> Result<()> {
    let repo = RepoRef::parse(url)?;
    let source = RawFileSource::from_config(cfg);
    let report = materialize(&source, &repo, root)?;

    for saved in &report.saved {
        if with_checksum {
            let digest = checksum::sha256_path(&saved.local_path)?;
            println!("{}  {}", digest, saved.local_path.display());
        } else {
            println!("{} ({} bytes)", saved.local_path.display(), saved.bytes);
        }
    }
    for failed in &report.failed {
        eprintln!("failed: {}: {}", failed.remote_path, failed.error);
    }

    if !report.is_complete() {
        anyhow::bail!(
            "{} of {} file(s) not saved",
            report.failed.len(),
            report.failed.len() + report.saved.len()
        );
    }
    tracing::info!(repo = %repo, files = report.saved.len(), "get completed");
    Ok(())
}
