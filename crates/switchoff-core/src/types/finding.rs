//! Findings reported by the upstream analysis pipeline.

use std::fmt;

/// Fully-qualified identity of the rule that raised a finding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuleKey {
    pub repository: String,
    pub key: String,
}

impl RuleKey {
    pub fn new(repository: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            key: key.into(),
        }
    }

    /// Parses `repository:key`. The split happens at the first colon.
    pub fn parse(s: &str) -> Option<Self> {
        let (repository, key) = s.split_once(':')?;
        Some(Self::new(repository, key))
    }
}

impl fmt::Display for RuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.repository, self.key)
    }
}

/// One static-analysis result. Every field may be missing; a finding with a
/// missing unit key or rule identity is never suppressed by a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub unit_key: Option<String>,
    pub rule: Option<RuleKey>,
    /// 1-based line, if the finding is attached to one.
    pub line: Option<u32>,
}

impl Finding {
    pub fn new(unit_key: impl Into<String>, rule: RuleKey) -> Self {
        Self {
            unit_key: Some(unit_key.into()),
            rule: Some(rule),
            line: None,
        }
    }

    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }
}
