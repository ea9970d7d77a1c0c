use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the SQLite document store
    pub database_path: PathBuf,
    /// Path to the persisted sync state file
    pub sync_state_path: PathBuf,
    /// Remote mirror endpoint
    pub mirror_url: String,
}

impl Default for Config {
    fn default() -> Self {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        let data_dir = PathBuf::from(&home).join(".opsdesk");
        Self {
            database_path: data_dir.join("opsdesk.db"),
            sync_state_path: data_dir.join("sync.json"),
            mirror_url: "http://localhost:8787/api/sync".to_string(),
        }
    }
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            config = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;
        }

        if let Ok(db_path) = std::env::var("OPSDESK_DATABASE_PATH") {
            config.database_path = PathBuf::from(db_path);
        }
        if let Ok(state_path) = std::env::var("OPSDESK_SYNC_STATE_PATH") {
            config.sync_state_path = PathBuf::from(state_path);
        }
        if let Ok(mirror_url) = std::env::var("OPSDESK_MIRROR_URL") {
            config.mirror_url = mirror_url;
        }

        Ok(config)
    }

    /// Default config file path: ~/.config/opsdesk/config.yaml
    pub fn default_config_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home)
            .join(".config")
            .join("opsdesk")
            .join("config.yaml")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
