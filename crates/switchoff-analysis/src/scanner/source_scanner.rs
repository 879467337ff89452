//! Runs the marker scanner over every source unit of a project and records the
//! outcome of each unit in the registry.

use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use switchoff_core::config::ScanConfig;
use switchoff_core::errors::ScanError;
use switchoff_core::traits::SourceProvider;
use switchoff_core::types::SourceUnit;
use tracing::{debug, info};

use super::charset::Charset;
use super::marker_scanner::{MarkerScanner, ScanOutcome};
use crate::registry::RuleRegistry;

/// Counters for one scan pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub units_scanned: usize,
    /// Units a whole-unit marker excluded.
    pub units_excluded: usize,
    /// Units with at least one suppressed block.
    pub units_with_excluded_lines: usize,
    pub lines_excluded: usize,
    pub duration_ms: u64,
}

impl ScanSummary {
    fn merge(self, other: Self) -> Self {
        Self {
            units_scanned: self.units_scanned + other.units_scanned,
            units_excluded: self.units_excluded + other.units_excluded,
            units_with_excluded_lines: self.units_with_excluded_lines
                + other.units_with_excluded_lines,
            lines_excluded: self.lines_excluded + other.lines_excluded,
            duration_ms: self.duration_ms + other.duration_ms,
        }
    }
}

/// Scans main units, then test units, in parallel.
pub struct SourceScanner<'a> {
    registry: &'a RuleRegistry,
    config: ScanConfig,
}

impl<'a> SourceScanner<'a> {
    pub fn new(registry: &'a RuleRegistry, config: ScanConfig) -> Self {
        Self { registry, config }
    }

    /// Scanning is only worth it when a block or whole-unit rule exists.
    pub fn should_execute(&self) -> bool {
        self.registry.has_marker_rules()
    }

    /// Scan every unit `sources` provides. The first unreadable unit aborts the pass.
    pub fn analyse(&self, sources: &dyn SourceProvider) -> Result<ScanSummary, ScanError> {
        let start = Instant::now();
        let charset_name = sources.charset();
        let charset = Charset::for_name(charset_name)?;
        let markers = MarkerScanner::from_registry(self.registry)?;
        if markers.is_empty() {
            debug!("no marker rules, skipping source scan");
            return Ok(ScanSummary::default());
        }

        let threads = self.config.effective_threads();
        let mut summary = if threads > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| ScanError::ThreadPool {
                    message: e.to_string(),
                })?;
            pool.install(|| self.scan_all(sources, &markers, charset, charset_name))?
        } else {
            self.scan_all(sources, &markers, charset, charset_name)?
        };
        summary.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            units_scanned = summary.units_scanned,
            units_excluded = summary.units_excluded,
            units_with_excluded_lines = summary.units_with_excluded_lines,
            lines_excluded = summary.lines_excluded,
            duration_ms = summary.duration_ms,
            "switchoff marker scan complete"
        );
        Ok(summary)
    }

    fn scan_all(
        &self,
        sources: &dyn SourceProvider,
        markers: &MarkerScanner,
        charset: Charset,
        charset_name: &str,
    ) -> Result<ScanSummary, ScanError> {
        let main = self.scan_units(&sources.main_units(), markers, charset, charset_name)?;
        let test = self.scan_units(&sources.test_units(), markers, charset, charset_name)?;
        Ok(main.merge(test))
    }

    fn scan_units(
        &self,
        units: &[SourceUnit],
        markers: &MarkerScanner,
        charset: Charset,
        charset_name: &str,
    ) -> Result<ScanSummary, ScanError> {
        units
            .par_iter()
            .map(|unit| self.scan_unit(unit, markers, charset, charset_name))
            .try_reduce(ScanSummary::default, |a, b| Ok(a.merge(b)))
    }

    fn scan_unit(
        &self,
        unit: &SourceUnit,
        markers: &MarkerScanner,
        charset: Charset,
        charset_name: &str,
    ) -> Result<ScanSummary, ScanError> {
        let outcome =
            markers
                .scan_file(&unit.path, charset)
                .map_err(|source| ScanError::Unreadable {
                    path: absolute_path(&unit.path),
                    charset: charset_name.to_string(),
                    source,
                })?;

        let mut summary = ScanSummary {
            units_scanned: 1,
            ..ScanSummary::default()
        };
        match outcome {
            ScanOutcome::Clean => {}
            ScanOutcome::ExcludeUnit { line } => {
                debug!(unit = %unit.key, line, "whole-unit marker found");
                self.registry.exclude_unit(&unit.key);
                summary.units_excluded = 1;
            }
            ScanOutcome::ExcludeLines(ranges) => {
                summary.units_with_excluded_lines = 1;
                summary.lines_excluded = ranges.iter().map(|r| r.len()).sum();
                self.registry.exclude_lines(&unit.key, ranges);
            }
        }
        Ok(summary)
    }
}

fn absolute_path(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use switchoff_core::config::Settings;
    use switchoff_core::types::SourceSet;

    use super::*;

    fn block_registry() -> RuleRegistry {
        let settings: Settings = [("switchoff.patterns", "// OFF;// ON")].into_iter().collect();
        RuleRegistry::load(settings, ".").unwrap()
    }

    #[test]
    fn should_execute_only_with_marker_rules() {
        let registry = RuleRegistry::load(Settings::new(), ".").unwrap();
        assert!(!SourceScanner::new(&registry, ScanConfig::default()).should_execute());
        assert!(SourceScanner::new(&block_registry(), ScanConfig::default()).should_execute());
    }

    #[test]
    fn scans_main_and_test_units() {
        let dir = tempfile::tempdir().unwrap();
        let main = dir.path().join("Main.java");
        let test = dir.path().join("MainTest.java");
        fs::write(&main, "a\n// OFF\nb\n// ON\nc\n").unwrap();
        fs::write(&test, "nothing here\n").unwrap();

        let registry = block_registry();
        let sources = SourceSet::utf8()
            .with_unit(SourceUnit::main("Main", &main))
            .with_unit(SourceUnit::test("MainTest", &test));
        let summary = SourceScanner::new(&registry, ScanConfig { threads: Some(2) })
            .analyse(&sources)
            .unwrap();

        assert_eq!(summary.units_scanned, 2);
        assert_eq!(summary.units_with_excluded_lines, 1);
        assert_eq!(summary.lines_excluded, 3);
        assert!(registry.extra_rule("Main").is_some());
        assert!(registry.extra_rule("MainTest").is_none());
    }

    #[test]
    fn missing_unit_reports_path_and_charset() {
        let registry = block_registry();
        let sources = SourceSet::new("ISO-8859-1")
            .with_unit(SourceUnit::main("Gone", "does/not/exist.java"));
        let err = SourceScanner::new(&registry, ScanConfig::default())
            .analyse(&sources)
            .unwrap_err();

        let message = err.to_string();
        assert!(message.starts_with("Unable to read the source file: '"));
        assert!(message.contains("exist.java"));
        assert!(message.ends_with("with the charset: 'ISO-8859-1'"));
    }

    #[test]
    fn nothing_is_read_without_marker_rules() {
        let registry = RuleRegistry::load(Settings::new(), ".").unwrap();
        let sources = SourceSet::utf8().with_unit(SourceUnit::main("Gone", "does/not/exist.java"));
        let summary = SourceScanner::new(&registry, ScanConfig::default())
            .analyse(&sources)
            .unwrap();
        assert_eq!(summary, ScanSummary::default());
        assert_eq!(registry.extra_rule_count(), 0);
    }

    #[test]
    fn unknown_charset_is_fatal() {
        let registry = block_registry();
        let sources = SourceSet::new("KOI8-R");
        assert!(matches!(
            SourceScanner::new(&registry, ScanConfig::default()).analyse(&sources),
            Err(ScanError::UnsupportedCharset { .. })
        ));
    }
}
