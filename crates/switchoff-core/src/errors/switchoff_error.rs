use super::error_code::SwitchOffErrorCode;
use super::{ConfigError, DecodeError, ScanError};

/// Top-level error for a SwitchOff run.
/// All subsystem errors convert into this via `From` impls.
#[derive(Debug, thiserror::Error)]
pub enum SwitchOffError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("scan error: {0}")]
    Scan(#[from] ScanError),
}

impl From<DecodeError> for SwitchOffError {
    fn from(e: DecodeError) -> Self {
        Self::Config(ConfigError::Decode(e))
    }
}

impl SwitchOffErrorCode for SwitchOffError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Scan(e) => e.error_code(),
        }
    }
}

/// Convenience type alias.
pub type SwitchOffResult<T> = Result<T, SwitchOffError>;
