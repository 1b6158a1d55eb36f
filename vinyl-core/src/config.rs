use crate::discogs::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_USER_AGENT: &str = concat!("vinyl-notes/", env!("CARGO_PKG_VERSION"));
const CONFIG_FILE: &str = "config.yaml";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// YAML config file structure. Never holds the Discogs token, which comes
/// from the environment or the command line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigYaml {
    pub api_base_url: Option<String>,
    pub user_agent: Option<String>,
    /// Directory exported documents are written to
    pub output_dir: Option<PathBuf>,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub discogs_token: Option<String>,
    pub api_base_url: String,
    pub user_agent: String,
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_yaml(ConfigYaml::default())
    }
}

impl Config {
    /// `.env` (if any), then `~/.vinyl-notes/config.yaml` (if any), then
    /// `VINYL_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        if dotenvy::dotenv().is_ok() {
            info!("Loaded environment from .env");
        }
        let mut config = match Self::config_dir() {
            Some(dir) => Self::load_from_dir(&dir)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".vinyl-notes"))
    }

    fn load_from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let yaml: ConfigYaml = serde_yaml::from_str(&std::fs::read_to_string(&path)?)
            .map_err(|e| {
                ConfigError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
            })?;
        info!("Loaded config from {}", path.display());
        Ok(Self::from_yaml(yaml))
    }

    fn from_yaml(yaml: ConfigYaml) -> Self {
        Self {
            discogs_token: None,
            api_base_url: yaml
                .api_base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            user_agent: yaml
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            output_dir: yaml.output_dir.unwrap_or_else(|| PathBuf::from(".")),
        }
    }

    /// Override fields from `VINYL_DISCOGS_TOKEN`, `VINYL_API_BASE_URL` and
    /// `VINYL_OUTPUT_DIR`. Empty values are ignored.
    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| var(key).filter(|v| !v.is_empty());
        if let Some(token) = get("VINYL_DISCOGS_TOKEN") {
            self.discogs_token = Some(token);
        }
        if let Some(url) = get("VINYL_API_BASE_URL") {
            self.api_base_url = url;
        }
        if let Some(dir) = get("VINYL_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(dir);
        }
    }

    /// Persist the non-secret settings to `<dir>/config.yaml`.
    pub fn save_to_dir(&self, dir: &Path) -> Result<PathBuf, ConfigError> {
        std::fs::create_dir_all(dir)?;
        let yaml = ConfigYaml {
            api_base_url: Some(self.api_base_url.clone()),
            user_agent: Some(self.user_agent.clone()),
            output_dir: Some(self.output_dir.clone()),
        };
        let content =
            serde_yaml::to_string(&yaml).map_err(|e| ConfigError::Serialization(e.to_string()))?;
        let path = dir.join(CONFIG_FILE);
        std::fs::write(&path, content)?;
        info!("Saved config to {}", path.display());
        Ok(path)
    }
}
