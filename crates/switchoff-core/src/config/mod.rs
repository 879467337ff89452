//! Configuration: the raw property map, the typed TOML file and the property keys.

pub mod keys;
pub mod scan_config;
pub mod settings;

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

pub use scan_config::ScanConfig;
pub use settings::Settings;

/// Top-level configuration file.
///
/// ```toml
/// [scan]
/// threads = 4
///
/// [properties]
/// "switchoff.block" = "1"
/// "switchoff.block.1.beginBlockRegexp" = "// SWITCHOFF-OFF"
/// "switchoff.block.1.endBlockRegexp" = "// SWITCHOFF-ON"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SwitchOffConfig {
    pub scan: ScanConfig,
    /// Rule properties, keyed as listed in [`keys`].
    pub properties: BTreeMap<String, String>,
}

impl SwitchOffConfig {
    /// Load config from a TOML string, falling back to defaults for missing fields.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load config from a TOML file on disk.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| ConfigError::ConfigFileUnreadable {
                path: path.to_path_buf(),
                source,
            })?;
        let config = Self::from_toml(&content)?;
        ::tracing::debug!(
            path = %path.display(),
            properties = config.properties.len(),
            "loaded switchoff configuration"
        );
        Ok(config)
    }

    /// Runtime view of the rule properties.
    pub fn settings(&self) -> Settings {
        self.properties
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}
