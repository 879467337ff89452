//! The suppression rule model.
//!
//! A rule plays exactly one role: it either matches findings directly ([`MatchRule`]),
//! delimits suppressed blocks inside a source file ([`BlockRule`]), or suppresses a
//! whole unit when a marker appears in it ([`WholeUnitRule`]).

use std::fmt;

use switchoff_core::types::collections::FxHashSet;
use switchoff_core::types::finding::{Finding, RuleKey};

use super::line_range::LineRange;
use super::wildcard::WildcardPattern;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Match(MatchRule),
    Block(BlockRule),
    WholeUnit(WholeUnitRule),
}

impl Rule {
    pub fn unit_pattern(&self) -> Option<&WildcardPattern> {
        match self {
            Self::Match(r) => Some(&r.unit_pattern),
            _ => None,
        }
    }

    pub fn rule_key_pattern(&self) -> Option<&WildcardPattern> {
        match self {
            Self::Match(r) => Some(&r.rule_key_pattern),
            _ => None,
        }
    }

    pub fn begin_block_regexp(&self) -> Option<&str> {
        match self {
            Self::Block(r) => Some(&r.begin),
            _ => None,
        }
    }

    pub fn end_block_regexp(&self) -> Option<&str> {
        match self {
            Self::Block(r) => r.end.as_deref(),
            _ => None,
        }
    }

    pub fn whole_unit_regexp(&self) -> Option<&str> {
        match self {
            Self::WholeUnit(r) => Some(&r.regexp),
            _ => None,
        }
    }

    /// Only match rules ever check lines; the others report the default.
    pub fn check_lines(&self) -> bool {
        match self {
            Self::Match(r) => r.check_lines,
            _ => true,
        }
    }

    /// Block and whole-unit rules never match a finding directly.
    pub fn matches(&self, finding: &Finding) -> bool {
        match self {
            Self::Match(r) => r.matches(finding),
            _ => false,
        }
    }
}

impl From<MatchRule> for Rule {
    fn from(rule: MatchRule) -> Self {
        Self::Match(rule)
    }
}

impl From<BlockRule> for Rule {
    fn from(rule: BlockRule) -> Self {
        Self::Block(rule)
    }
}

impl From<WholeUnitRule> for Rule {
    fn from(rule: WholeUnitRule) -> Self {
        Self::WholeUnit(rule)
    }
}

/// Matches findings by unit key, rule key and optionally line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRule {
    unit_pattern: WildcardPattern,
    rule_key_pattern: WildcardPattern,
    lines: Vec<u32>,
    line_ranges: Vec<LineRange>,
    check_lines: bool,
}

impl MatchRule {
    /// A rule with no lines and `check_lines = true`: it suppresses nothing on a
    /// finding that carries a line until lines or ranges are added.
    pub fn new(unit_pattern: WildcardPattern, rule_key_pattern: WildcardPattern) -> Self {
        Self {
            unit_pattern,
            rule_key_pattern,
            lines: Vec::new(),
            line_ranges: Vec::new(),
            check_lines: true,
        }
    }

    pub fn add_line(mut self, line: u32) -> Self {
        if !self.lines.contains(&line) {
            self.lines.push(line);
        }
        self
    }

    pub fn add_line_range(mut self, range: LineRange) -> Self {
        if !self.line_ranges.contains(&range) {
            self.line_ranges.push(range);
        }
        self
    }

    pub fn with_line_ranges(self, ranges: impl IntoIterator<Item = LineRange>) -> Self {
        ranges.into_iter().fold(self, Self::add_line_range)
    }

    pub fn with_check_lines(mut self, check_lines: bool) -> Self {
        self.check_lines = check_lines;
        self
    }

    pub fn unit_pattern(&self) -> &WildcardPattern {
        &self.unit_pattern
    }

    pub fn rule_key_pattern(&self) -> &WildcardPattern {
        &self.rule_key_pattern
    }

    pub fn lines(&self) -> &[u32] {
        &self.lines
    }

    pub fn line_ranges(&self) -> &[LineRange] {
        &self.line_ranges
    }

    pub fn check_lines(&self) -> bool {
        self.check_lines
    }

    /// Explicit lines followed by the expansion of every range, without duplicates,
    /// in insertion order.
    pub fn all_lines(&self) -> Vec<u32> {
        let mut seen: FxHashSet<u32> = self.lines.iter().copied().collect();
        let mut all = self.lines.clone();
        for line in self.line_ranges.iter().flat_map(LineRange::to_lines) {
            if seen.insert(line) {
                all.push(line);
            }
        }
        all
    }

    pub fn matches(&self, finding: &Finding) -> bool {
        let matched = self.match_unit(finding.unit_key.as_deref())
            && self.match_rule(finding.rule.as_ref());
        match finding.line {
            Some(line) if self.check_lines => matched && self.match_line(line),
            _ => matched,
        }
    }

    pub fn match_line(&self, line: u32) -> bool {
        self.lines.contains(&line) || self.line_ranges.iter().any(|r| r.contains(line))
    }

    pub fn match_rule(&self, rule: Option<&RuleKey>) -> bool {
        match rule {
            Some(rule) => self.rule_key_pattern.matches(&rule.to_string()),
            None => false,
        }
    }

    pub fn match_unit(&self, unit_key: Option<&str>) -> bool {
        unit_key.is_some_and(|key| self.unit_pattern.matches(key))
    }
}

/// Suppresses the lines between a begin marker and an end marker.
/// Without an end marker the block runs to the end of the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRule {
    begin: String,
    end: Option<String>,
}

impl BlockRule {
    pub fn new(begin: impl Into<String>, end: Option<String>) -> Self {
        Self {
            begin: begin.into(),
            end,
        }
    }

    pub fn begin_regexp(&self) -> &str {
        &self.begin
    }

    pub fn end_regexp(&self) -> Option<&str> {
        self.end.as_deref()
    }
}

/// Suppresses every finding of a unit whose text contains the marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WholeUnitRule {
    regexp: String,
}

impl WholeUnitRule {
    pub fn new(regexp: impl Into<String>) -> Self {
        Self {
            regexp: regexp.into(),
        }
    }

    pub fn regexp(&self) -> &str {
        &self.regexp
    }
}

struct Field<'a, T: ?Sized>(Option<&'a T>);

impl<T: fmt::Display + ?Sized> fmt::Display for Field<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => v.fmt(f),
            None => f.write_str("<null>"),
        }
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        item.fmt(f)?;
    }
    f.write_str("]")
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (lines, ranges): (&[u32], &[LineRange]) = match self {
            Self::Match(r) => (&r.lines, &r.line_ranges),
            _ => (&[], &[]),
        };
        write!(
            f,
            "Rule[unitPattern={},ruleKeyPattern={},lines=",
            Field(self.unit_pattern()),
            Field(self.rule_key_pattern()),
        )?;
        write_list(f, lines)?;
        f.write_str(",lineRanges=")?;
        write_list(f, ranges)?;
        write!(
            f,
            ",beginBlockRegexp={},endBlockRegexp={},wholeUnitRegexp={},checkLines={}]",
            Field(self.begin_block_regexp()),
            Field(self.end_block_regexp()),
            Field(self.whole_unit_regexp()),
            self.check_lines(),
        )
    }
}

impl fmt::Display for MatchRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Rule::Match(self.clone()).fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(unit: &str, key: &str) -> MatchRule {
        MatchRule::new(
            WildcardPattern::new(unit).unwrap(),
            WildcardPattern::new(key).unwrap(),
        )
    }

    fn checkstyle() -> RuleKey {
        RuleKey::new("checkstyle", "IllegalRegexp")
    }

    #[test]
    fn matches_lines_and_ranges() {
        let r = rule("*", "*")
            .add_line(12)
            .add_line(15)
            .add_line_range(LineRange::new(20, 25).unwrap());

        assert!(!r.match_line(3));
        assert!(r.match_line(12));
        assert!(!r.match_line(14));
        assert!(r.match_line(21));
        assert!(!r.match_line(6599));
    }

    #[test]
    fn matches_finding() {
        let r = rule("*", "*").add_line(12);
        let finding = Finding::new("org.foo.Bar", checkstyle());

        assert!(r.matches(&finding));
        assert!(r.matches(&finding.clone().with_line(12)));
        assert!(!r.matches(&finding.clone().with_line(13)));

        let no_rule = Finding {
            unit_key: Some("org.foo.Bar".into()),
            rule: None,
            line: Some(5),
        };
        assert!(!r.matches(&no_rule));

        let no_unit = Finding {
            unit_key: None,
            rule: Some(checkstyle()),
            line: None,
        };
        assert!(!r.matches(&no_unit));

        let nothing = Finding {
            unit_key: None,
            rule: None,
            line: None,
        };
        assert!(!r.matches(&nothing));
    }

    #[test]
    fn empty_lines_suppress_nothing_but_unchecked_lines_suppress_all() {
        let finding = Finding::new("org.foo.Bar", checkstyle()).with_line(40);

        let empty = rule("*", "*");
        assert!(empty.check_lines());
        assert!(empty.all_lines().is_empty());
        assert!(!empty.matches(&finding));

        let all = rule("*", "*").with_check_lines(false);
        assert!(all.matches(&finding));
    }

    #[test]
    fn finding_without_line_ignores_line_set() {
        let r = rule("org.foo.*", "checkstyle:*").add_line(1);
        assert!(r.matches(&Finding::new("org.foo.Bar", checkstyle())));
    }

    #[test]
    fn null_rule_never_matches() {
        assert!(!rule("*", "*").match_rule(None));
    }

    #[test]
    fn all_lines_merges_lines_and_ranges() {
        let r = rule("*", "*")
            .add_line(25)
            .add_line_range(LineRange::new(10, 12).unwrap())
            .add_line_range(LineRange::new(97, 100).unwrap());
        let mut lines = r.all_lines();
        lines.sort_unstable();
        assert_eq!(lines, vec![10, 11, 12, 25, 97, 98, 99, 100]);
    }

    #[test]
    fn block_and_whole_unit_rules_never_match_findings() {
        let finding = Finding::new("org.foo.Bar", checkstyle()).with_line(1);
        let block: Rule = BlockRule::new("OFF", Some("ON".into())).into();
        let whole: Rule = WholeUnitRule::new("ALL-OFF").into();
        assert!(!block.matches(&finding));
        assert!(!whole.matches(&finding));
        assert!(block.unit_pattern().is_none());
        assert_eq!(block.begin_block_regexp(), Some("OFF"));
        assert_eq!(whole.whole_unit_regexp(), Some("ALL-OFF"));
    }

    #[test]
    fn display_lists_every_field() {
        let r: Rule = rule("*", "checkstyle:*").into();
        assert_eq!(
            r.to_string(),
            "Rule[unitPattern=*,ruleKeyPattern=checkstyle:*,lines=[],lineRanges=[],\
             beginBlockRegexp=<null>,endBlockRegexp=<null>,wholeUnitRegexp=<null>,checkLines=true]"
        );

        let block: Rule = BlockRule::new("// OFF", None).into();
        assert_eq!(
            block.to_string(),
            "Rule[unitPattern=<null>,ruleKeyPattern=<null>,lines=[],lineRanges=[],\
             beginBlockRegexp=// OFF,endBlockRegexp=<null>,wholeUnitRegexp=<null>,checkLines=true]"
        );

        let lines = rule("a", "b")
            .add_line(3)
            .add_line_range(LineRange::new(5, 7).unwrap())
            .with_check_lines(true);
        assert!(lines.to_string().contains("lines=[3],lineRanges=[5-7]"));
    }
}
