//! CLI for gitty.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use gitty_core::config;
use std::path::PathBuf;

use commands::{run_checksum, run_get, run_resolve, run_save};

/// Top-level CLI for gitty.
#[derive(Debug, Parser)]
#[command(name = "gitty")]
#[command(about = "gitty: download a directory or file from a GitHub tree URL", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Print the canonical owner/repo/tree/<ref>/<path> form of a GitHub URL.
    Resolve {
        /// GitHub tree URL, with or without https://.
        url: String,
    },

    /// Download the file a GitHub tree URL points at.
    Get {
        /// GitHub tree URL, with or without https://.
        url: String,
        /// Directory to materialize into (overrides config; default is the current directory).
        #[arg(long, short = 'o', value_name = "DIR")]
        output_dir: Option<PathBuf>,
        /// Print SHA-256 of each saved file.
        #[arg(long)]
        checksum: bool,
    },

    /// Save one file from stdin (or --input) at its destination below <BASE>'s last segment.
    Save {
        /// Base directory the remote path is relative to.
        base: String,
        /// Repo-relative path of the file.
        remote_path: String,
        /// Read the body from this file instead of stdin.
        #[arg(long, short = 'i', value_name = "FILE")]
        input: Option<PathBuf>,
        /// Directory to materialize into (overrides config; default is the current directory).
        #[arg(long, short = 'o', value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Compute SHA-256 of a file.
    Checksum {
        /// Path to the file.
        path: PathBuf,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Resolve { url } => run_resolve(&url)?,
            CliCommand::Get {
                url,
                output_dir,
                checksum,
            } => {
                let root = output_root(output_dir, cfg.output_dir.clone());
                run_get(&cfg, &url, &root, checksum)?;
            }
            CliCommand::Save {
                base,
                remote_path,
                input,
                output_dir,
            } => {
                let root = output_root(output_dir, cfg.output_dir.clone());
                run_save(&root, &base, &remote_path, input.as_deref())?;
            }
            CliCommand::Checksum { path } => run_checksum(&path)?,
        }

        Ok(())
    }
}

/// Flag wins over config; an empty path means the current directory.
fn output_root(flag: Option<PathBuf>, configured: Option<PathBuf>) -> PathBuf {
    flag.or(configured).unwrap_or_default()
}
