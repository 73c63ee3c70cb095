use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Path of the upload endpoint on the processing server.
pub const DEFAULT_UPLOAD_PATH: &str = "/upload";

/// Global configuration loaded from `~/.config/bomup/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BomupConfig {
    /// Base URL of the processing server (scheme, host, port).
    pub server_url: String,
    /// Path the upload form posts to, joined onto `server_url`.
    #[serde(default = "default_upload_path")]
    pub upload_path: String,
    /// Seconds allowed for establishing the connection.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Optional cap on the whole request. Unset means the request may stay
    /// pending for as long as the server takes.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// Directory processed files are saved to (None = current directory).
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
    /// Save under the server's Content-Disposition filename when it sends one.
    #[serde(default)]
    pub prefer_server_filename: bool,
}

fn default_upload_path() -> String {
    DEFAULT_UPLOAD_PATH.to_string()
}

fn default_connect_timeout() -> u64 {
    30
}

impl Default for BomupConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".to_string(),
            upload_path: default_upload_path(),
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: None,
            download_dir: None,
            prefer_server_filename: false,
        }
    }
}

impl BomupConfig {
    /// Full URL of the upload endpoint.
    pub fn upload_url(&self) -> anyhow::Result<String> {
        endpoint_url(&self.server_url, &self.upload_path)
    }
}

/// Joins an absolute endpoint path onto a server base URL, dropping any path
/// the base already carries.
pub fn endpoint_url(server_url: &str, path: &str) -> anyhow::Result<String> {
    let base = url::Url::parse(server_url)
        .map_err(|e| anyhow::anyhow!("invalid server URL {server_url:?}: {e}"))?;
    let joined = base
        .join(path)
        .map_err(|e| anyhow::anyhow!("invalid endpoint path {path:?}: {e}"))?;
    Ok(joined.to_string())
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::{config_path, load_or_init};

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::BomupConfig;
    use anyhow::{Context, Result};
    use std::fs;
    use std::path::PathBuf;

    pub fn config_path() -> Result<PathBuf> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("bomup")?;
        Ok(xdg_dirs.place_config_file("config.toml")?)
    }

    /// Load configuration from disk, creating a default file if none exists.
    pub fn load_or_init() -> Result<BomupConfig> {
        let path = config_path()?;
        if !path.exists() {
            let default_cfg = BomupConfig::default();
            let toml = toml::to_string_pretty(&default_cfg)?;
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, toml)?;
            tracing::info!("created default config at {}", path.display());
            return Ok(default_cfg);
        }

        let data = fs::read_to_string(&path)?;
        let cfg: BomupConfig =
            toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
        Ok(cfg)
    }
}
