use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::debug;

pub const DEFAULT_API_URL: &str = "https://api.fleet.example.com";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub api_token: Option<String>,
    pub trust_invalid_server_cert: bool,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            trust_invalid_server_cert: false,
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load the config file (defaults if absent) and apply `FLEET_*` overrides.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_file_path() {
            Some(path) if path.exists() => {
                debug!("Loading config from: {:?}", path);
                let contents =
                    std::fs::read_to_string(&path).context("Failed to read config file")?;
                serde_json::from_str(&contents).context("Failed to parse config file")?
            }
            _ => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("FLEET_API_URL").filter(|v| !v.is_empty()) {
            self.api_url = url;
        }
        if let Some(token) = var("FLEET_TOKEN").filter(|v| !v.is_empty()) {
            self.api_token = Some(token);
        }
        if let Some(level) = var("FLEET_LOG_LEVEL").filter(|v| !v.is_empty()) {
            self.log_level = level;
        }
        if let Some(trust) = var("FLEET_TRUST_INVALID_SERVER_CERT").filter(|v| !v.is_empty()) {
            self.trust_invalid_server_cert = matches!(trust.as_str(), "1" | "true" | "yes");
        }
    }

    /// `FLEET_CONFIG` if set, else `<config dir>/fleet/config.json`.
    pub fn config_file_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os("FLEET_CONFIG").filter(|p| !p.is_empty()) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("fleet").join("config.json"))
    }
}
