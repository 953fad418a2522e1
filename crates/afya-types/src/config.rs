//! Configuration for the Afya chat core.
//!
//! `AfyaConfig` represents the top-level `config.toml` controlling the
//! endpoints of the two external collaborators and the inference timeout.
//! All fields have sensible defaults so an empty file is valid.

use serde::{Deserialize, Serialize};

/// Top-level configuration, loaded from `~/.afya/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AfyaConfig {
    /// Base URL of the durable document store.
    #[serde(default = "default_store_url")]
    pub store_url: String,

    /// Base URL of the inference service.
    #[serde(default = "default_inference_url")]
    pub inference_url: String,

    /// Client-side timeout for a single inference call, in seconds.
    /// A call exceeding this is classified as a timeout, not a
    /// connection failure.
    #[serde(default = "default_inference_timeout_secs")]
    pub inference_timeout_secs: u64,

    /// Optional bearer token for the inference service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inference_api_key: Option<String>,
}

fn default_store_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_inference_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_inference_timeout_secs() -> u64 {
    30
}

impl Default for AfyaConfig {
    fn default() -> Self {
        Self {
            store_url: default_store_url(),
            inference_url: default_inference_url(),
            inference_timeout_secs: default_inference_timeout_secs(),
            inference_api_key: None,
        }
    }
}
