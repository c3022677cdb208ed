use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SyncError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SyncConfig {
    /// Where the catalog document is written.
    #[serde(default = "default_output_path")]
    pub output_path: String,
    /// Base URL of the creature API, without a trailing slash.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Number of creatures requested from the API list endpoint.
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Per-request HTTP timeout.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Skip the network and build from the built-in dataset.
    #[serde(default)]
    pub offline_only: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            api_base_url: default_api_base_url(),
            limit: default_limit(),
            request_timeout_seconds: default_request_timeout(),
            offline_only: false,
        }
    }
}

impl SyncConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn validate(&self) -> Result<(), SyncError> {
        if self.output_path.trim().is_empty() {
            return Err(SyncError::Config("output_path must not be empty".to_string()));
        }
        if !self.offline_only {
            if self.limit == 0 {
                return Err(SyncError::Config("limit must be at least 1".to_string()));
            }
            if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://")
            {
                return Err(SyncError::Config(format!(
                    "api_base_url must be an http(s) URL, got {:?}",
                    self.api_base_url
                )));
            }
        }
        Ok(())
    }
}

fn default_output_path() -> String {
    "data/pokemon-go-db.json".to_string()
}
fn default_api_base_url() -> String {
    "https://pokeapi.co/api/v2".to_string()
}
fn default_limit() -> u32 {
    151
}
fn default_request_timeout() -> u64 {
    20
}
