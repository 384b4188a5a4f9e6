//! Named subnet allow-lists loaded from a JSON file.
//!
//! ```json
//! { "lists": { "trusted": ["127.0.0.1/8", "::1/128", "10.0.0.0/8"] } }
//! ```
//!
//! Every entry is parsed while the file is read, so a bad CIDR is reported
//! with its JSON path (e.g. `lists.trusted[2]`).

use crate::models::SubnetDescriptor;
use crate::processing::SubnetChecker;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Environment variable naming the default allow-list file.
pub const CONFIG_ENV: &str = "IN_SUBNET_CONFIG";

/// Errors raised while loading an allow-list file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing config {origin}: path={json_path} error={message}")]
    Parse {
        origin: String,
        json_path: String,
        message: String,
    },

    #[error("Unknown subnet list {name:?} (available: {available})")]
    UnknownList { name: String, available: String },
}

/// Allow-list file contents.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct AllowListConfig {
    /// Subnet lists keyed by name.
    #[serde(default)]
    pub lists: BTreeMap<String, Vec<SubnetDescriptor>>,
}

impl AllowListConfig {
    /// Parse config JSON; `origin` names the source in error messages.
    pub fn from_json_str(json: &str, origin: &str) -> Result<Self, ConfigError> {
        let mut deserializer = serde_json::Deserializer::from_str(json);
        serde_path_to_error::deserialize(&mut deserializer).map_err(|e| ConfigError::Parse {
            origin: origin.to_string(),
            json_path: e.path().to_string(),
            message: e.inner().to_string(),
        })
    }

    pub fn list_names(&self) -> Vec<&str> {
        self.lists.keys().map(String::as_str).collect()
    }

    /// Build a [`SubnetChecker`] for the list called `name`.
    pub fn checker(&self, name: &str) -> Result<SubnetChecker, ConfigError> {
        let subnets = self
            .lists
            .get(name)
            .ok_or_else(|| ConfigError::UnknownList {
                name: name.to_string(),
                available: self.list_names().join(", "),
            })?;
        Ok(SubnetChecker::from_descriptors(subnets.clone()))
    }
}

/// Read and parse an allow-list file.
pub fn load_config(path: &Path) -> Result<AllowListConfig, ConfigError> {
    let origin = path.display().to_string();
    let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: origin.clone(),
        source,
    })?;
    log::info!("Reading allow-lists from config file: {origin}");

    let config = AllowListConfig::from_json_str(&json, &origin)?;
    log::debug!(
        "Loaded {} allow-lists from {origin}: {:?}",
        config.lists.len(),
        config.list_names()
    );
    Ok(config)
}
