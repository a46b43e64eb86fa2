use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};
use crate::domain::api_config::{EsgApiConfig, LLMConfig};

pub const CONFIG_FILE: &str = "esgbridge.toml";
pub const ENV_PREFIX: &str = "ESGBRIDGE_";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadConfig {
    /// Directory that receives multipart uploads while they are parsed.
    pub dir: PathBuf,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("uploads"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub esg: EsgApiConfig,
    pub llm: LLMConfig,
    pub uploads: UploadConfig,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            esg: EsgApiConfig::default(),
            llm: LLMConfig::default(),
            uploads: UploadConfig::default(),
            request_timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// Layers defaults, `esgbridge.toml`, `ESGBRIDGE_*` variables and finally `PORT`.
    pub fn load() -> Result<Self> {
        Self::from_figment(Self::figment(Path::new(CONFIG_FILE)))
    }

    pub fn figment(config_path: &Path) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(Env::raw().only(&["PORT"]).map(|_| "server.port".into()))
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: AppConfig = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn validate(&self) -> Result<()> {
        validate_base_url("esg.base_url", &self.esg.base_url)?;
        validate_base_url("llm.base_url", &self.llm.base_url)?;
        if self.request_timeout_secs == 0 {
            return Err(AppError::ConfigError(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn validate_base_url(key: &str, value: &str) -> Result<()> {
    let parsed = url::Url::parse(value)
        .map_err(|e| AppError::ConfigError(format!("Invalid {} '{}': {}", key, value, e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(AppError::ConfigError(format!(
            "Unsupported scheme '{}' for {}",
            other, key
        ))),
    }
}
