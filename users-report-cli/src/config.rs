use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use accounts_aggregator::ClientConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AppError, Result};

const APP_DIR: &str = "users-report";
const CONFIG_FILE: &str = "config.toml";

/// Settings read from `config.toml`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Per-request timeout in seconds, 0 waits indefinitely
    pub timeout_secs: u64,
    pub user_agent: String,
    /// RPC handler path below each site endpoint
    pub rpc_path: String,
    pub colored: bool,
    /// Ask on the terminal for credentials missing from the table
    pub prompt_for_credentials: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientConfig::default();
        Self {
            timeout_secs: 120,
            user_agent: client.user_agent,
            rpc_path: client.rpc_path,
            colored: true,
            prompt_for_credentials: true,
        }
    }
}

impl AppConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    fn resolve_path(path: Option<&Path>) -> Option<PathBuf> {
        path.map(Path::to_path_buf).or_else(Self::default_path)
    }

    /// Load the configuration, falling back to defaults when the file does not exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = Self::resolve_path(path) else {
            return Ok(Self::default());
        };
        if !path.exists() {
            debug!(path = %path.display(), "No configuration file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config = toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Write the default configuration, returning where it went.
    pub fn reset(path: Option<&Path>) -> Result<PathBuf> {
        let path = Self::resolve_path(path)
            .ok_or_else(|| AppError::Config("cannot determine config directory".to_owned()))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, Self::default().show()?)?;
        Ok(path)
    }

    pub fn show(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            rpc_path: self.rpc_path.clone(),
            user_agent: self.user_agent.clone(),
            timeout: self.timeout(),
        }
    }
}
