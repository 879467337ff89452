//! Rule registry: every configured rule plus the per-unit rules the marker
//! scanner produces during a run.
//!
//! The three configured lists are fixed once loaded. The extra-rule map grows
//! while units are scanned (possibly from several threads) and is only read
//! once filtering starts.

pub mod loader;

use std::path::PathBuf;

use dashmap::mapref::one::Ref;
use dashmap::DashMap;
use switchoff_core::config::Settings;
use switchoff_core::errors::ConfigError;
use tracing::{debug, info};

use crate::rules::{BlockRule, LineRange, MatchRule, WholeUnitRule, WildcardPattern};

pub use loader::LoadedRules;

/// Registry of suppression rules for one analysis run.
#[derive(Debug)]
pub struct RuleRegistry {
    settings: Settings,
    base_dir: PathBuf,
    match_rules: Vec<MatchRule>,
    block_rules: Vec<BlockRule>,
    whole_unit_rules: Vec<WholeUnitRule>,
    extra_rules: DashMap<String, MatchRule>,
}

impl RuleRegistry {
    /// Load all rules from `settings`. A relative rule-file location is
    /// resolved against `base_dir`.
    pub fn load(settings: Settings, base_dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let mut registry = Self {
            settings,
            base_dir: base_dir.into(),
            match_rules: Vec::new(),
            block_rules: Vec::new(),
            whole_unit_rules: Vec::new(),
            extra_rules: DashMap::new(),
        };
        registry.reload()?;
        Ok(registry)
    }

    /// Re-read the configured rules. On error the previous lists are kept.
    /// Extra rules are left untouched.
    pub fn reload(&mut self) -> Result<(), ConfigError> {
        let loaded = loader::load_rules(&self.settings, &self.base_dir)?;
        info!(
            match_rules = loaded.match_rules.len(),
            block_rules = loaded.block_rules.len(),
            whole_unit_rules = loaded.whole_unit_rules.len(),
            "switchoff rules loaded"
        );
        self.match_rules = loaded.match_rules;
        self.block_rules = loaded.block_rules;
        self.whole_unit_rules = loaded.whole_unit_rules;
        Ok(())
    }

    pub fn match_rules(&self) -> &[MatchRule] {
        &self.match_rules
    }

    pub fn block_rules(&self) -> &[BlockRule] {
        &self.block_rules
    }

    pub fn whole_unit_rules(&self) -> &[WholeUnitRule] {
        &self.whole_unit_rules
    }

    /// True when there is anything for the marker scanner to look for.
    pub fn has_marker_rules(&self) -> bool {
        !self.block_rules.is_empty() || !self.whole_unit_rules.is_empty()
    }

    /// Suppress every finding of `unit_key`, whatever its rule or line.
    pub fn exclude_unit(&self, unit_key: &str) {
        debug!(unit = unit_key, "excluding whole unit");
        let rule = MatchRule::new(WildcardPattern::literal(unit_key), WildcardPattern::any())
            .with_check_lines(false);
        self.extra_rules.insert(unit_key.to_string(), rule);
    }

    /// Suppress every finding of `unit_key` located inside one of `ranges`.
    pub fn exclude_lines(&self, unit_key: &str, ranges: Vec<LineRange>) {
        debug!(unit = unit_key, ranges = ranges.len(), "excluding line ranges");
        let rule = MatchRule::new(WildcardPattern::literal(unit_key), WildcardPattern::any())
            .with_line_ranges(ranges);
        self.extra_rules.insert(unit_key.to_string(), rule);
    }

    /// The rule the scanner registered for `unit_key`, if any.
    pub fn extra_rule(&self, unit_key: &str) -> Option<Ref<'_, String, MatchRule>> {
        self.extra_rules.get(unit_key)
    }

    pub fn extra_rule_count(&self) -> usize {
        self.extra_rules.len()
    }
}
