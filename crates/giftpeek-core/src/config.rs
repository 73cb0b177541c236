use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Desktop Safari identification. Some hosts serve different (or no) preview
/// metadata to clients that do not look like a browser.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Safari/605.1.15";

/// Global configuration loaded from `~/.config/giftpeek/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Total wall-clock limit for one page or image fetch, in seconds.
    pub timeout_secs: u64,
    /// Limit for establishing the connection, in seconds.
    pub connect_timeout_secs: u64,
    /// User-Agent header sent with every request.
    pub user_agent: String,
    /// Maximum number of redirects followed per request.
    pub max_redirects: u32,
    /// Stop reading a response body after this many bytes.
    pub max_body_bytes: usize,
    /// Optional cap on concurrent resolutions for batch commands (None = 4).
    #[serde(default)]
    pub max_concurrent: Option<usize>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 12,
            connect_timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_redirects: 10,
            max_body_bytes: 8 * 1024 * 1024,
            max_concurrent: None,
        }
    }
}

impl PreviewConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// Connect timeout, never longer than the total timeout.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs.max(1)).min(self.timeout())
    }

    pub fn concurrency(&self) -> usize {
        self.max_concurrent.unwrap_or(4).max(1)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("giftpeek")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<PreviewConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = PreviewConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: PreviewConfig = toml::from_str(&data)?;
    Ok(cfg)
}
