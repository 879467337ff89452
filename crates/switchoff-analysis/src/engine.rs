//! One suppression run: rules are loaded on construction, then sources are
//! scanned for markers and findings filtered.

use std::path::PathBuf;

use switchoff_core::config::{ScanConfig, Settings, SwitchOffConfig};
use switchoff_core::errors::{ConfigError, SwitchOffResult};
use switchoff_core::traits::SourceProvider;
use switchoff_core::types::Finding;
use tracing::info;

use crate::filter::{FilterOutcome, FindingFilter};
use crate::registry::RuleRegistry;
use crate::scanner::{ScanSummary, SourceScanner};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// `None` when no marker rule is configured and scanning was skipped.
    pub scan: Option<ScanSummary>,
    pub kept: Vec<Finding>,
    pub suppressed: usize,
}

#[derive(Debug)]
pub struct Engine {
    registry: RuleRegistry,
    scan_config: ScanConfig,
}

impl Engine {
    pub fn new(config: &SwitchOffConfig, base_dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        Self::from_settings(config.settings(), config.scan.clone(), base_dir)
    }

    pub fn from_settings(
        settings: Settings,
        scan_config: ScanConfig,
        base_dir: impl Into<PathBuf>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            registry: RuleRegistry::load(settings, base_dir)?,
            scan_config,
        })
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Scan `sources` for markers, if any marker rule is configured.
    pub fn scan(&self, sources: &dyn SourceProvider) -> SwitchOffResult<Option<ScanSummary>> {
        let scanner = SourceScanner::new(&self.registry, self.scan_config.clone());
        if !scanner.should_execute() {
            return Ok(None);
        }
        Ok(Some(scanner.analyse(sources)?))
    }

    pub fn filter(&self, findings: Vec<Finding>) -> FilterOutcome {
        FindingFilter::new(&self.registry).retain(findings)
    }

    pub fn run(&self, sources: &dyn SourceProvider, findings: Vec<Finding>) -> SwitchOffResult<RunReport> {
        let scan = self.scan(sources)?;
        let FilterOutcome { kept, suppressed } = self.filter(findings);
        info!(
            scanned = scan.is_some(),
            kept = kept.len(),
            suppressed,
            "switchoff run complete"
        );
        Ok(RunReport {
            scan,
            kept,
            suppressed,
        })
    }
}

#[cfg(test)]
mod tests {
    use switchoff_core::types::{RuleKey, SourceSet};

    use super::*;

    #[test]
    fn run_without_marker_rules_skips_scanning() {
        let config = SwitchOffConfig::from_toml(
            r#"
            [properties]
            "switchoff.multicriteria" = "1"
            "switchoff.multicriteria.1.ruleKey" = "pmd:*"
            "#,
        )
        .unwrap();
        let engine = Engine::new(&config, ".").unwrap();

        // The unit does not exist; it would fail if scanning ran.
        let sources = SourceSet::utf8().with_unit(switchoff_core::types::SourceUnit::main("X", "missing"));
        let findings = vec![
            Finding::new("X", RuleKey::new("pmd", "Foo")),
            Finding::new("X", RuleKey::new("squid", "Bar")),
        ];
        let report = engine.run(&sources, findings).unwrap();

        assert!(report.scan.is_none());
        assert_eq!(report.suppressed, 1);
        assert_eq!(report.kept.len(), 1);
    }
}
