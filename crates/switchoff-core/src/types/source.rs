//! Source units handed over by the file discovery collaborator.

use std::path::PathBuf;

use crate::traits::SourceProvider;

/// One source file together with the key findings use to address it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    /// Opaque unit key, resolved by the caller.
    pub key: String,
    pub path: PathBuf,
    pub is_test: bool,
}

impl SourceUnit {
    pub fn main(key: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            key: key.into(),
            path: path.into(),
            is_test: false,
        }
    }

    pub fn test(key: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            key: key.into(),
            path: path.into(),
            is_test: true,
        }
    }
}

/// In-memory [`SourceProvider`] for callers that already hold the unit list.
#[derive(Debug, Clone)]
pub struct SourceSet {
    units: Vec<SourceUnit>,
    charset: String,
}

impl SourceSet {
    pub fn new(charset: impl Into<String>) -> Self {
        Self {
            units: Vec::new(),
            charset: charset.into(),
        }
    }

    pub fn utf8() -> Self {
        Self::new("UTF-8")
    }

    pub fn push(&mut self, unit: SourceUnit) -> &mut Self {
        self.units.push(unit);
        self
    }

    pub fn with_unit(mut self, unit: SourceUnit) -> Self {
        self.units.push(unit);
        self
    }
}

impl SourceProvider for SourceSet {
    fn main_units(&self) -> Vec<SourceUnit> {
        self.units.iter().filter(|u| !u.is_test).cloned().collect()
    }

    fn test_units(&self) -> Vec<SourceUnit> {
        self.units.iter().filter(|u| u.is_test).cloned().collect()
    }

    fn charset(&self) -> &str {
        &self.charset
    }
}
