//! Configuration discovery and named-client resolution
//!
//! Loads YAML configuration from a handful of standard locations and resolves
//! the endpoint of a client by its symbolic name.
//!
//! # Configuration Discovery
//!
//! The system searches for a config file in the following order:
//!
//! 1. **GRAPHQL_CLIENT_CONFIG environment variable**: Explicit override path
//!    - If set but the file doesn't exist, returns error (fail-fast)
//!
//! 2. **./graphql-client.yaml**: Current working directory
//!
//! 3. **~/.config/graphql-client/config.yaml**: XDG standard location
//!
//! 4. **Defaults**: No named clients, `info` logging
//!
//! # URL Resolution
//!
//! The URL of client `NAME` is the property `smallrye.graphql.client.NAME/url`.
//! It is looked up first in the environment, under the property name with every
//! non-alphanumeric character replaced by `_` and upper-cased
//! (`SMALLRYE_GRAPHQL_CLIENT_INVENTORY_URL`), then under `clients.NAME.url` in
//! the YAML. A blank value counts as missing.
//!
//! # Example
//!
//! ```yaml
//! clients:
//!   inventory:
//!     url: "http://localhost:8080/graphql"
//!     timeout_secs: 10
//!     headers:
//!       Authorization: "Bearer abc"
//!
//! logging:
//!   level: "debug"
//! ```

use crate::error::{ConfigError, NotFoundError};
use crate::messages;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV_VAR: &str = "GRAPHQL_CLIENT_CONFIG";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub clients: BTreeMap<String, NamedClientConfig>,
    pub logging: LoggingConfig,
}

/// Settings for one named client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NamedClientConfig {
    pub url: Option<String>,
    pub timeout_secs: u64,
    pub headers: BTreeMap<String, String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for NamedClientConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_secs: 30,
            headers: BTreeMap::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Property key holding the URL of client `name`
pub fn url_property(name: &str) -> String {
    format!("smallrye.graphql.client.{}/url", name)
}

/// Environment variable name for a property key
pub fn env_var_name(property: &str) -> String {
    property
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Reject endpoint URLs that are not http(s); `source` names where the URL came from
pub fn check_url_scheme(source: &str, url: &str) -> Result<(), ConfigError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!(
            "{} must start with http:// or https://, got: {}",
            source, url
        )))
    }
}

impl Config {
    /// Load config with the location search described in the module docs
    pub fn load() -> Result<Self, ConfigError> {
        match Self::find_config_file()? {
            Some(path) => Self::from_file(&path),
            None => {
                tracing::warn!("No graphql-client config found, using defaults");
                Ok(Config::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        tracing::info!("Loading config from: {}", path.display());

        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config =
            serde_yaml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn find_config_file() -> Result<Option<PathBuf>, ConfigError> {
        if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
            let path = PathBuf::from(env_path);
            if path.exists() {
                return Ok(Some(path));
            } else {
                return Err(ConfigError::Io(format!(
                    "{} points to non-existent file: {}",
                    CONFIG_ENV_VAR,
                    path.display()
                )));
            }
        }

        let cwd_config = PathBuf::from("./graphql-client.yaml");
        if cwd_config.exists() {
            return Ok(Some(cwd_config));
        }

        if let Some(proj_dirs) = ProjectDirs::from("", "", "graphql-client") {
            let xdg_config = proj_dirs.config_dir().join("config.yaml");
            if xdg_config.exists() {
                return Ok(Some(xdg_config));
            }
        }

        Ok(None)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, client) in &self.clients {
            if client.timeout_secs == 0 {
                return Err(ConfigError::Validation(format!(
                    "clients.{}.timeout_secs must be greater than zero",
                    name
                )));
            }
            if let Some(url) = client.url.as_deref().filter(|u| !u.trim().is_empty()) {
                check_url_scheme(&format!("clients.{}.url", name), url)?;
            }
        }
        Ok(())
    }

    /// Settings for `name`, or the defaults if the client isn't listed
    pub fn client(&self, name: &str) -> NamedClientConfig {
        self.clients.get(name).cloned().unwrap_or_default()
    }

    /// Resolve the endpoint URL of client `name` (environment, then YAML)
    ///
    /// Environment values are returned as found; [`check_url_scheme`] is applied
    /// when a client is built from them.
    pub fn client_url(&self, name: &str) -> Result<String, NotFoundError> {
        self.client_url_with(name, |var| std::env::var(var).ok())
    }

    pub(crate) fn client_url_with<F>(&self, name: &str, env: F) -> Result<String, NotFoundError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = env_var_name(&url_property(name));
        if let Some(url) = env(&var).filter(|u| !u.trim().is_empty()) {
            tracing::debug!("Client '{}' url taken from {}", name, var);
            return Ok(url);
        }

        self.clients
            .get(name)
            .and_then(|c| c.url.clone())
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| messages::url_not_configured_for_named_client(name))
    }
}
