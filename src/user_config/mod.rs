mod loader;
pub use loader::load_user_config;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum UserConfigError {
    #[error("Failed to read user config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse user config TOML: {0}")]
    Toml(#[from] toml::de::Error),
}
fn default_base_url() -> String {
    "http://localhost:3000/api".to_string()
}
/// API connection settings (`[api]` table in the TOML file).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token; command-line and environment values take precedence.
    #[serde(default)]
    pub token: Option<String>,
}
impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
        }
    }
}
/// Top-level user configuration, deserialized from `~/.kb-console/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserConfig {
    #[serde(default)]
    pub api: ApiConfig,
}
/// Resolve the canonical path for the user config file.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".kb-console").join("config.toml"))
}
#[cfg(test)]
#[path = "../user_config_tests.rs"]
mod user_config_tests;
