//! Scanner configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the source scanning phase.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScanConfig {
    /// Number of scan threads. 0 = rayon's global pool.
    pub threads: Option<usize>,
}

impl ScanConfig {
    /// Returns the effective thread count, defaulting to 0 (global pool).
    pub fn effective_threads(&self) -> usize {
        self.threads.unwrap_or(0)
    }
}
