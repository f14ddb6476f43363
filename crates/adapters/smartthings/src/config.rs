//! SmartThings API configuration.

use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SmartThingsConfig {
    /// Base URL of the REST API, without trailing slash.
    pub api_url: String,
    /// Request timeout, in seconds.
    pub timeout_secs: u64,
    /// PEM public key the lifecycle calls are signed with. Signatures are
    /// not checked when unset.
    pub public_key_path: Option<PathBuf>,
}

impl Default for SmartThingsConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.smartthings.com/v1".to_string(),
            timeout_secs: 10,
            public_key_path: None,
        }
    }
}
