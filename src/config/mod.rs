//! Configuration loading.
//!
//! [`ConfigService`] is a flat key/value view over the process environment.
//! [`ExtensionSettings`] is the typed view the rest of the crate consumes.

use crate::error::{ExtensionError, Result};
use dashmap::DashMap;
use std::env;
use std::sync::Arc;

pub const HOST_KEY: &str = "EXTENSION_HOST";
pub const PORT_KEY: &str = "EXTENSION_PORT";
pub const API_TOKENS_KEY: &str = "EXTENSION_API_TOKENS";
pub const REQUIRED_PERMISSION_KEY: &str = "EXTENSION_REQUIRED_PERMISSION";
pub const TOKEN_PERMISSIONS_KEY: &str = "EXTENSION_TOKEN_PERMISSIONS";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

/// Configuration service
#[derive(Clone, Default)]
pub struct ConfigService {
    config: Arc<DashMap<String, String>>,
}

impl ConfigService {
    /// Empty configuration; every setting falls back to its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current process environment.
    pub fn from_env() -> Self {
        let service = Self::default();
        for (key, value) in env::vars() {
            service.set(&key, &value);
        }
        service
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.config.get(key).map(|v| v.clone())
    }

    pub fn set(&self, key: &str, value: &str) {
        self.config.insert(key.to_string(), value.to_string());
    }

    /// Value for `key`, treating blank strings as unset.
    fn get_non_empty(&self, key: &str) -> Option<String> {
        self.get(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn get_list(&self, key: &str, separator: char) -> Vec<String> {
        self.get(key)
            .map(|raw| {
                raw.split(separator)
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Typed settings for the standalone host.
///
/// The greeting text and admin page id are part of the extension's contract
/// and are not configurable; see [`crate::greeting::GREETING`] and
/// [`crate::ui::ADMIN_PAGE_ID`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionSettings {
    pub host: String,
    pub port: u16,
    pub api_tokens: Vec<String>,
    pub token_permissions: Vec<String>,
    pub required_permission: Option<String>,
}

impl Default for ExtensionSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            api_tokens: Vec::new(),
            token_permissions: Vec::new(),
            required_permission: None,
        }
    }
}

impl ExtensionSettings {
    pub fn from_config(config: &ConfigService) -> Result<Self> {
        let port = match config.get_non_empty(PORT_KEY) {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| ExtensionError::config(PORT_KEY, format!("{raw:?}: {e}")))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: config
                .get_non_empty(HOST_KEY)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            api_tokens: config.get_list(API_TOKENS_KEY, ','),
            token_permissions: config.get_list(TOKEN_PERMISSIONS_KEY, '|'),
            required_permission: config.get_non_empty(REQUIRED_PERMISSION_KEY),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
