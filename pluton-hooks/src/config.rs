//! Hook configuration read from `pluton.toml`.

use crate::error::Result;
use pluton_types::Realm;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Default maximum chat line length, in characters.
pub const DEFAULT_CHAT_MAX_LENGTH: usize = 128;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default)]
    pub realm: Realm,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Mirror every broadcast chat line into the server log.
    #[serde(default = "default_true")]
    pub server_log: bool,
    #[serde(default = "default_max_length")]
    pub max_length: usize,
}

fn default_true() -> bool {
    true
}

fn default_max_length() -> usize {
    DEFAULT_CHAT_MAX_LENGTH
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            server_log: true,
            max_length: DEFAULT_CHAT_MAX_LENGTH,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub chat: ChatConfig,
}

impl HookConfig {
    /// Config for the given realm with every other setting at its default.
    pub fn for_realm(realm: Realm) -> Self {
        Self {
            server: ServerSection { realm },
            ..Self::default()
        }
    }

    pub fn realm(&self) -> Realm {
        self.server.realm
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Reads and parses `path`, failing on any error.
    pub fn read(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Loads the config at `path`, falling back to defaults when the file is
    /// missing or unusable.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No config file found at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(config) => {
                    info!("Loaded hook config from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!(
                        "Failed to parse config file {:?}: {}. Falling back to defaults.",
                        path, e
                    );
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read config file {:?}: {}", path, e);
                Self::default()
            }
        }
    }
}
