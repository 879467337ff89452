//! Keep/drop decision for findings.

use rayon::prelude::*;
use switchoff_core::types::Finding;
use tracing::debug;

use crate::registry::RuleRegistry;

/// Result of filtering a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Findings that survived, in input order.
    pub kept: Vec<Finding>,
    pub suppressed: usize,
}

/// Read-only view over a loaded registry, used once scanning is done.
#[derive(Debug, Clone, Copy)]
pub struct FindingFilter<'a> {
    registry: &'a RuleRegistry,
}

impl<'a> FindingFilter<'a> {
    pub fn new(registry: &'a RuleRegistry) -> Self {
        Self { registry }
    }

    /// True if a configured match rule, or the extra rule of the finding's unit, matches.
    pub fn is_suppressed(&self, finding: &Finding) -> bool {
        if self.registry.match_rules().iter().any(|r| r.matches(finding)) {
            return true;
        }
        finding
            .unit_key
            .as_deref()
            .and_then(|key| self.registry.extra_rule(key))
            .is_some_and(|rule| rule.matches(finding))
    }

    pub fn accept(&self, finding: &Finding) -> bool {
        !self.is_suppressed(finding)
    }

    pub fn retain(&self, findings: Vec<Finding>) -> FilterOutcome {
        let total = findings.len();
        let kept: Vec<Finding> = findings
            .into_par_iter()
            .filter(|f| self.accept(f))
            .collect();
        let suppressed = total - kept.len();
        debug!(total, suppressed, "findings filtered");
        FilterOutcome { kept, suppressed }
    }
}
