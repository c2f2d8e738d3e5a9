use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

pub const ENV_BIND_ADDR: &str = "GUESTBOOK_BIND_ADDR";
pub const ENV_DATA_DIR: &str = "GUESTBOOK_DATA_DIR";
pub const ENV_DELETE_SECRET: &str = "GUESTBOOK_DELETE_SECRET";
pub const ENV_WEBHOOK_URL: &str = "GUESTBOOK_WEBHOOK_URL";

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub storage: StorageConfig,
    /// Secret a caller must present to delete drawings. Unset disables deletion.
    pub delete_secret: Option<String>,
    /// Moderation webhook. Unset disables notifications.
    pub webhook_url: Option<String>,
    pub webhook_timeout_ms: u64,
    pub max_drawing_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8787)),
            storage: StorageConfig::default(),
            delete_secret: None,
            webhook_url: None,
            webhook_timeout_ms: 5_000,
            max_drawing_bytes: 1024 * 1024,
        }
    }
}

// Hand-written so the delete secret never reaches a log line.
impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bind_addr", &self.bind_addr)
            .field("storage", &self.storage)
            .field("has_delete_secret", &self.delete_secret.is_some())
            .field("webhook_url", &self.webhook_url)
            .field("webhook_timeout_ms", &self.webhook_timeout_ms)
            .field("max_drawing_bytes", &self.max_drawing_bytes)
            .finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StorageConfig {
    Memory,
    Filesystem { root: PathBuf },
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::Filesystem {
            root: PathBuf::from("data"),
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(s: &str) -> ServerResult<Self> {
        toml::from_str(s).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Read the optional TOML file, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> ServerResult<Self> {
        let mut config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|e| {
                    ServerError::Config(format!("reading {}: {e}", path.display()))
                })?;
                Self::from_toml_str(&text)?
            }
            None => {
                tracing::info!("no config file given, using defaults");
                Self::default()
            }
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Override fields from a key lookup (the process environment in practice).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ServerResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup(ENV_BIND_ADDR) {
            self.bind_addr = addr
                .parse()
                .map_err(|e| ServerError::Config(format!("invalid {ENV_BIND_ADDR} value: {e}")))?;
        }
        if let Some(dir) = lookup(ENV_DATA_DIR) {
            self.storage = StorageConfig::Filesystem {
                root: PathBuf::from(dir),
            };
        }
        if let Some(secret) = lookup(ENV_DELETE_SECRET) {
            self.delete_secret = Some(secret.trim().to_string()).filter(|s| !s.is_empty());
        }
        if let Some(url) = lookup(ENV_WEBHOOK_URL) {
            self.webhook_url = Some(url.trim().to_string()).filter(|s| !s.is_empty());
        }
        Ok(())
    }
}
