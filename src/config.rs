use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub artifacts: ArtifactsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ArtifactsConfig {
    pub model_path: PathBuf,
    pub normalizer_path: PathBuf,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("artifacts/classifier.json"),
            normalizer_path: PathBuf::from("artifacts/normalizer.json"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub dir: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("logs"),
        }
    }
}

impl Config {
    /// Load from an explicit TOML file, or from `config.toml` when present.
    ///
    /// An explicit path that cannot be read is an error; a missing default
    /// file just means built-in defaults. Environment overrides are applied
    /// afterwards.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_PATH))?
            }
            None => Self::default(),
        };
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Overlay `SHIPMENT_ETA_*` (and `PORT`) values from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SHIPMENT_ETA_HOST") {
            self.server.host = host;
        }
        // The more specific name wins over the platform-provided PORT
        for name in ["PORT", "SHIPMENT_ETA_PORT"] {
            if let Some(raw) = lookup(name) {
                self.server.port = raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidEnv { name, value: raw })?;
            }
        }
        if let Some(p) = lookup("SHIPMENT_ETA_MODEL_PATH") {
            self.artifacts.model_path = PathBuf::from(p);
        }
        if let Some(p) = lookup("SHIPMENT_ETA_NORMALIZER_PATH") {
            self.artifacts.normalizer_path = PathBuf::from(p);
        }
        if let Some(p) = lookup("SHIPMENT_ETA_LOG_DIR") {
            self.logging.dir = PathBuf::from(p);
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
