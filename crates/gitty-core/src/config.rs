//! Global configuration loaded from `~/.config/gitty/config.toml`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Host serving raw file contents for `owner/repo/ref/path`.
pub const DEFAULT_RAW_BASE_URL: &str = "https://raw.githubusercontent.com";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GittyConfig {
    /// Base URL raw file contents are fetched from.
    pub raw_base_url: String,
    /// Directory downloads are materialized under (None = current directory).
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// Connect timeout for HTTP requests, in seconds.
    pub connect_timeout_secs: u64,
    /// Overall timeout for a single file fetch, in seconds.
    pub timeout_secs: u64,
    /// Custom User-Agent header; curl's default when unset.
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for GittyConfig {
    fn default() -> Self {
        Self {
            raw_base_url: DEFAULT_RAW_BASE_URL.to_string(),
            output_dir: None,
            connect_timeout_secs: 15,
            timeout_secs: 300,
            user_agent: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("gitty")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<GittyConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = GittyConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: GittyConfig =
        toml::from_str(&data).with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}
