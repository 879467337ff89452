//! Source scanning errors.

use std::path::PathBuf;

use super::error_code::{self, SwitchOffErrorCode};

/// Errors raised while scanning source units for suppression markers.
/// All of them abort the run.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Unable to read the source file: '{}' with the charset: '{charset}'", path.display())]
    Unreadable {
        path: PathBuf,
        charset: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported charset: '{charset}'")]
    UnsupportedCharset { charset: String },

    #[error("Invalid marker regular expression '{regexp}': {message}")]
    InvalidMarker { regexp: String, message: String },

    #[error("Failed to build scan thread pool: {message}")]
    ThreadPool { message: String },
}

impl SwitchOffErrorCode for ScanError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Unreadable { .. } => error_code::SCAN_IO_ERROR,
            Self::UnsupportedCharset { .. } => error_code::SCAN_UNSUPPORTED_CHARSET,
            Self::InvalidMarker { .. } => error_code::SCAN_INVALID_MARKER,
            Self::ThreadPool { .. } => error_code::SCAN_THREAD_POOL,
        }
    }
}
