//! Connection configuration

use crate::client::ClientError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default address of a local H2O node
pub const DEFAULT_URL: &str = "http://localhost:54321";

/// Name of the per-user config file, looked up in the home directory
pub const CONFIG_FILE_NAME: &str = ".h2o-assembly.yaml";

/// Configuration for the H2O connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Base URL of the H2O server, without a trailing slash
    #[serde(default = "default_url")]
    pub url: String,

    /// User for basic authentication
    #[serde(default)]
    pub username: Option<String>,

    /// Password for basic authentication
    #[serde(default)]
    pub password: Option<String>,

    /// Per-request timeout in seconds; `None` keeps the HTTP client default
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_url() -> String {
    DEFAULT_URL.to_string()
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            username: None,
            password: None,
            timeout_secs: None,
        }
    }
}

impl ConnectionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ConnectionConfig = serde_yaml::from_str(&content)?;
        let url = config.url.clone();
        Ok(config.with_url(url))
    }

    /// Default location of the per-user config file
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
    }

    /// Resolve configuration: defaults, then the user config file, then environment
    pub fn load() -> anyhow::Result<Self> {
        let base = match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        Ok(base.apply_env(|key| std::env::var(key).ok()))
    }

    /// Apply `H2O_URL`, `H2O_USER` and `H2O_PASSWORD` overrides
    pub fn apply_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("H2O_URL").filter(|v| !v.trim().is_empty()) {
            self = self.with_url(url);
        }
        if let Some(user) = lookup("H2O_USER") {
            self.username = Some(user);
        }
        if let Some(password) = lookup("H2O_PASSWORD") {
            self.password = Some(password);
        }
        self
    }

    /// Check that the URL is usable as a base for REST paths
    pub fn validate(&self) -> Result<(), ClientError> {
        let parsed = reqwest::Url::parse(&self.url).map_err(|e| ClientError::InvalidUrl {
            url: self.url.clone(),
            reason: e.to_string(),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl {
                url: self.url.clone(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }
        Ok(())
    }
}
