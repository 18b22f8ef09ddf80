use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Global configuration loaded from `~/.config/lpis/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LpisConfig {
    /// Per-request timeout for context/document fetches, in seconds.
    pub fetch_timeout_secs: u64,
    /// Whether allowlisted third-party contexts (RO-Crate, workflow-run)
    /// are fetched from their origin. When false, vendor copies under
    /// the override base are used instead.
    pub rocrate_online: bool,
    /// Default override base for `resolve` when none is given on the
    /// command line (e.g. a local dev server URL).
    #[serde(default)]
    pub default_base: Option<String>,
}

impl Default for LpisConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: 10,
            rocrate_online: true,
            default_base: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("lpis")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<LpisConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = LpisConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: LpisConfig = toml::from_str(&data)?;
    Ok(cfg)
}
