// Configuration: tokens and service endpoints, read once from a TOML file
// before the client is built.

use crate::api::{AUTH_API, STORAGE_API};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "RMCLOUD_CONFIG";

/// On-disk configuration. Unknown sections are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tokens: TokenConfig,
    pub endpoints: EndpointConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenConfig {
    /// Long-lived device token issued by device registration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,
    /// Short-lived session token, only present if the user chose to save one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub auth_api: String,
    pub storage_api: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            auth_api: AUTH_API.to_string(),
            storage_api: STORAGE_API.to_string(),
        }
    }
}

/// Validated credentials captured by the client at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub device_token: String,
    pub session_token: Option<String>,
}

impl Config {
    /// Resolve the config path: `$RMCLOUD_CONFIG`, else
    /// `<config dir>/rmcloud/config.toml`.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("rmcloud")
            .join("config.toml")
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, path)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Self::parse(contents, Path::new("<inline>"))
    }

    /// `origin` only labels parse errors.
    fn parse(contents: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Write the config back out, creating the parent directory if needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, contents).map_err(io_err)
    }

    /// Extract the tokens. A blank `bearer_token` counts as missing.
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        let device_token = self
            .tokens
            .bearer_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingKey("bearer_token"))?;
        let session_token = self
            .tokens
            .session_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        Ok(Credentials {
            device_token: device_token.to_string(),
            session_token,
        })
    }

    pub fn store_device_token(&mut self, token: &str) {
        self.tokens.bearer_token = Some(token.trim().to_string());
    }

    pub fn store_session_token(&mut self, token: &str) {
        self.tokens.session_token = Some(token.trim().to_string());
    }
}
