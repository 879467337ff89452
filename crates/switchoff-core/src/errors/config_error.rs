//! Configuration loading errors.

use std::path::PathBuf;

use super::error_code::{self, SwitchOffErrorCode};
use super::DecodeError;

/// Errors raised while turning configuration into suppression rules.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("File not found. Please check the parameter {key}: {location}")]
    RuleFileNotFound { key: String, location: String },

    #[error("Fail to load the file: {}", path.display())]
    RuleFileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Rule group '{group}.{id}' has no value for '{field}'")]
    IncompleteGroup {
        group: String,
        id: String,
        field: String,
    },

    #[error("Rule group '{group}.{id}' has an invalid '{field}': {value}")]
    InvalidGroupValue {
        group: String,
        id: String,
        field: String,
        value: String,
    },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("Failed to read configuration file {}: {source}", path.display())]
    ConfigFileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl SwitchOffErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::RuleFileNotFound { .. } => error_code::CONFIG_FILE_NOT_FOUND,
            Self::RuleFileUnreadable { .. } | Self::ConfigFileUnreadable { .. } => {
                error_code::CONFIG_FILE_UNREADABLE
            }
            Self::IncompleteGroup { .. } | Self::InvalidGroupValue { .. } => {
                error_code::CONFIG_INVALID_GROUP
            }
            Self::Decode(e) => e.error_code(),
            Self::TomlParse(_) => error_code::CONFIG_PARSE_ERROR,
        }
    }
}
