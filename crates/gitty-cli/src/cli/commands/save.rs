//! `gitty save <base> <remote-path>` – materialize one file from stdin or a local file.

use anyhow::{Context, Result};
use gitty_core::storage;
use std::fs::File;
use std::io;
use std::path::Path;

pub fn run_save(root: &Path, base: &str, remote_path: &str, input: Option<&Path>) -> Result<()> {
    let saved = match input {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
            storage::save_file_in(root, base, remote_path, file)?
        }
        None => storage::save_file_in(root, base, remote_path, io::stdin().lock())?,
    };
    println!("{} ({} bytes)", saved.path.display(), saved.bytes);
    Ok(())
}
