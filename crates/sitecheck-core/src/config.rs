use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Spreadsheet opened when no name is configured.
pub const DEFAULT_SPREADSHEET_NAME: &str = "Website Status Check";

/// Environment variable holding the service-account JSON blob.
pub const DEFAULT_CREDENTIALS_ENV: &str = "GOOGLE_CREDS_JSON";

/// Global configuration loaded from `~/.config/sitecheck/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitecheckConfig {
    /// Address the HTTP endpoint listens on.
    pub bind_addr: String,
    /// Title of the spreadsheet holding the `Website` column.
    pub spreadsheet_name: String,
    /// Zero-based tab index inside the spreadsheet (0 = first tab).
    #[serde(default)]
    pub worksheet_index: u32,
    /// Name of the environment variable carrying the service-account JSON.
    #[serde(default = "default_credentials_env")]
    pub credentials_env: String,
    /// Maximum site fetches in flight during one run. 1 = strictly sequential.
    #[serde(default = "default_concurrency")]
    pub classify_concurrency: usize,
}

fn default_credentials_env() -> String {
    DEFAULT_CREDENTIALS_ENV.to_string()
}

fn default_concurrency() -> usize {
    1
}

impl Default for SitecheckConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:5000".to_string(),
            spreadsheet_name: DEFAULT_SPREADSHEET_NAME.to_string(),
            worksheet_index: 0,
            credentials_env: default_credentials_env(),
            classify_concurrency: default_concurrency(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("sitecheck")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SitecheckConfig> {
    load_or_init_at(&config_path()?)
}

/// Same as [`load_or_init`] but against an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<SitecheckConfig> {
    if !path.exists() {
        let default_cfg = SitecheckConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: SitecheckConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
