//! `gitty resolve <url>` – print the canonical repository path.

use anyhow::Result;
use gitty_core::repo_url::resolve_repo_path;

pub fn run_resolve(url: &str) -> Result<()> {
    let path = resolve_repo_path(url)?;
    println!("{path}");
    Ok(())
}
