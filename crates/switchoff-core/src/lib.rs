//! # switchoff-core
//!
//! Foundation crate for the SwitchOff suppression engine.
//! Defines the shared types, traits, errors, config and tracing setup.
//! `switchoff-analysis` depends on this.

pub mod config;
pub mod errors;
pub mod tracing;
pub mod traits;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::{ScanConfig, Settings, SwitchOffConfig};
pub use errors::error_code::SwitchOffErrorCode;
pub use errors::{ConfigError, DecodeError, ScanError, SwitchOffError, SwitchOffResult};
pub use traits::SourceProvider;
pub use types::collections::{FxHashMap, FxHashSet};
pub use types::finding::{Finding, RuleKey};
pub use types::source::{SourceSet, SourceUnit};
