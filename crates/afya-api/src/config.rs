//! Configuration loading for the `afya` binary.
//!
//! Reads `~/.afya/config.toml` (optional -- defaults apply when absent)
//! and applies environment overrides on top, so deployments can point at
//! different endpoints without touching the file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use afya_types::config::AfyaConfig;

/// Environment variables recognized on top of the config file.
const ENV_STORE_URL: &str = "AFYA_STORE_URL";
const ENV_INFERENCE_URL: &str = "AFYA_INFERENCE_URL";
const ENV_INFERENCE_TIMEOUT: &str = "AFYA_INFERENCE_TIMEOUT_SECS";
const ENV_INFERENCE_API_KEY: &str = "AFYA_INFERENCE_API_KEY";

/// Default config file location: `~/.afya/config.toml`.
pub fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".afya")
        .join("config.toml")
}

/// Load configuration from `path`, then apply env overrides.
///
/// A missing file is not an error; defaults are used.
pub fn load(path: &Path) -> anyhow::Result<AfyaConfig> {
    let mut config = if path.exists() {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing config file {}", path.display()))?
    } else {
        AfyaConfig::default()
    };

    if let Ok(url) = std::env::var(ENV_STORE_URL) {
        config.store_url = url;
    }
    if let Ok(url) = std::env::var(ENV_INFERENCE_URL) {
        config.inference_url = url;
    }
    if let Ok(secs) = std::env::var(ENV_INFERENCE_TIMEOUT) {
        config.inference_timeout_secs = secs
            .parse()
            .with_context(|| format!("{ENV_INFERENCE_TIMEOUT} must be a number, got '{secs}'"))?;
    }
    if let Ok(key) = std::env::var(ENV_INFERENCE_API_KEY) {
        config.inference_api_key = Some(key);
    }

    Ok(config)
}
