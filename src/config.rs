use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Per-connection settings consulted by the spooled file provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionConfig {
    /// Every resource opened over this connection is read-only
    #[serde(default)]
    pub read_only_mode: bool,

    #[serde(default)]
    pub object_filters: Vec<ObjectFilter>,
}

/// A named object filter as configured for the connection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectFilter {
    pub name: String,

    #[serde(default)]
    pub library: String,

    #[serde(default = "default_wildcard")]
    pub object: String,

    #[serde(default = "default_types")]
    pub types: Vec<String>,

    #[serde(default = "default_wildcard")]
    pub member: String,

    /// Objects reached through a protected filter must not be modified
    #[serde(default = "default_false")]
    pub protected: bool,
}

fn default_wildcard() -> String {
    "*".to_string()
}

fn default_types() -> Vec<String> {
    vec!["*ALL".to_string()]
}

fn default_false() -> bool {
    false
}

impl ConnectionConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(e.to_string()))?;

        let config: ConnectionConfig =
            serde_json::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;

        std::fs::write(path.as_ref(), contents).map_err(|e| ConfigError::Io(e.to_string()))?;

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for filter in &self.object_filters {
            if filter.name.is_empty() {
                return Err(ConfigError::Validation(
                    "object filter name cannot be empty".to_string(),
                ));
            }
            if !seen.insert(filter.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate object filter name: {}",
                    filter.name
                )));
            }
        }

        Ok(())
    }

    pub fn filter(&self, name: &str) -> Option<&ObjectFilter> {
        self.object_filters.iter().find(|f| f.name == name)
    }

    /// True when `name` refers to a configured filter marked protected.
    /// Missing or unknown names are not protected.
    pub fn is_protected_filter(&self, name: Option<&str>) -> bool {
        name.and_then(|name| self.filter(name))
            .is_some_and(|f| f.protected)
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Serialize error: {0}")]
    Serialize(String),
    #[error("Validation error: {0}")]
    Validation(String),
}
