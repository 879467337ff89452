//! Error types for every SwitchOff subsystem.
//! Each subsystem has its own enum; all of them convert into [`SwitchOffError`].

pub mod error_code;

mod config_error;
mod decode_error;
mod scan_error;
mod switchoff_error;

pub use config_error::ConfigError;
pub use decode_error::DecodeError;
pub use scan_error::ScanError;
pub use switchoff_error::{SwitchOffError, SwitchOffResult};
