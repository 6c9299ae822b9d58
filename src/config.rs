use crate::common::error::{Result, ValidationError};
use serde::Deserialize;
use std::fs;
use std::path::Path;

const CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub registry: RegistryConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistryConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "https://npiregistry.cms.hhs.gov/api/".to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            registry: RegistryConfig::default(),
        }
    }
}

impl Config {
    /// Loads `config.toml` from the working directory, falling back to
    /// defaults when the file is absent.
    pub fn load() -> Result<Self> {
        if !Path::new(CONFIG_PATH).exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(CONFIG_PATH)?;
        toml::from_str(&content).map_err(|e| {
            ValidationError::Config(format!("Failed to parse '{}': {}", CONFIG_PATH, e))
        })
    }
}
