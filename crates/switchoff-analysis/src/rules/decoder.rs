//! Decoder for the flat-text rule language.
//!
//! One rule per line. Blank lines and lines starting with `#` are skipped.
//!
//! ```text
//! # match rule: unit pattern; rule key pattern; lines
//! com.foo.Bar;checkstyle:IllegalRegexp;[10,25-30]
//! # block rule: begin marker; end marker
//! // SWITCHOFF-OFF;// SWITCHOFF-ON
//! # whole-unit rule: marker
//! @generated
//! ```
//!
//! Any malformed line fails the whole decode.

use std::path::Path;

use regex::Regex;
use switchoff_core::errors::{ConfigError, DecodeError};

use super::line_range::LineRange;
use super::rule::{BlockRule, MatchRule, Rule, WholeUnitRule};
use super::wildcard::WildcardPattern;

const FIELD_SEPARATOR: char = ';';
const COMMENT_PREFIX: char = '#';

/// Decoded third field of a match rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineSpec {
    /// `*`: every line.
    All,
    /// `[...]`: the listed lines and ranges. May be empty, which suppresses no line.
    Lines {
        lines: Vec<u32>,
        ranges: Vec<LineRange>,
    },
}

impl LineSpec {
    /// Applies the spec to a freshly built match rule.
    pub fn apply(self, rule: MatchRule) -> MatchRule {
        match self {
            Self::All => rule.with_check_lines(false),
            Self::Lines { lines, ranges } => lines
                .into_iter()
                .fold(rule, MatchRule::add_line)
                .with_line_ranges(ranges)
                .with_check_lines(true),
        }
    }
}

/// Decode a whole text blob.
pub fn decode_str(text: &str) -> Result<Vec<Rule>, DecodeError> {
    let mut rules = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
            continue;
        }
        rules.push(decode_numbered_line(line, idx + 1)?);
    }
    Ok(rules)
}

/// Decode a UTF-8 rule file.
pub fn decode_file(path: &Path) -> Result<Vec<Rule>, ConfigError> {
    let content =
        std::fs::read_to_string(path).map_err(|source| ConfigError::RuleFileUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(decode_str(&content)?)
}

/// Decode a single non-comment line.
pub fn decode_line(line: &str) -> Result<Rule, DecodeError> {
    decode_numbered_line(line.trim(), 1)
}

fn decode_numbered_line(line: &str, line_number: usize) -> Result<Rule, DecodeError> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    if fields.len() > 3 {
        return Err(DecodeError::TooManyFields {
            line_number,
            line: line.to_string(),
        });
    }

    let text = || line.to_string();

    match fields.as_slice() {
        [unit, rule, lines] => {
            if !is_unit_pattern(unit) {
                return Err(DecodeError::InvalidUnitPattern { line_number, line: text() });
            }
            if !is_rule_pattern(rule) {
                return Err(DecodeError::InvalidRulePattern { line_number, line: text() });
            }
            let spec = decode_line_spec(lines)
                .ok_or_else(|| DecodeError::InvalidLineSpec { line_number, line: text() })?;
            let unit_pattern = WildcardPattern::new(unit.trim())
                .map_err(|_| DecodeError::InvalidUnitPattern { line_number, line: text() })?;
            let rule_pattern = WildcardPattern::new(rule.trim())
                .map_err(|_| DecodeError::InvalidRulePattern { line_number, line: text() })?;
            Ok(Rule::Match(spec.apply(MatchRule::new(unit_pattern, rule_pattern))))
        }
        [begin, end] => {
            if !is_regexp(begin) {
                return Err(DecodeError::InvalidBeginRegexp { line_number, line: text() });
            }
            if !is_regexp(end) {
                return Err(DecodeError::InvalidEndRegexp { line_number, line: text() });
            }
            Ok(Rule::Block(BlockRule::new(*begin, Some(end.to_string()))))
        }
        [marker] => {
            if !is_regexp(marker) {
                return Err(DecodeError::InvalidWholeUnitRegexp { line_number, line: text() });
            }
            Ok(Rule::WholeUnit(WholeUnitRule::new(*marker)))
        }
        // `split` yields at least one field and more than three was rejected above.
        _ => Err(DecodeError::TooManyFields { line_number, line: text() }),
    }
}

/// A unit pattern is any non-blank field.
pub fn is_unit_pattern(field: &str) -> bool {
    !field.trim().is_empty()
}

/// A rule key pattern is any non-blank field.
pub fn is_rule_pattern(field: &str) -> bool {
    !field.trim().is_empty()
}

/// `*`, or a bracketed, comma-separated list of lines and `a-b` ranges.
pub fn is_line_spec(field: &str) -> bool {
    decode_line_spec(field).is_some()
}

/// A non-blank field that compiles as a regular expression.
pub fn is_regexp(field: &str) -> bool {
    !field.trim().is_empty() && Regex::new(field).is_ok()
}

/// Parses `*`, `[]`, `[n]`, `[n,m]`, `[a-b]`, `[a-b,c,d-e,...]`.
///
/// A single trailing comma inside the brackets is tolerated. Ranges with
/// `from > to` are rejected.
pub fn decode_line_spec(field: &str) -> Option<LineSpec> {
    let field = field.trim();
    if field == "*" {
        return Some(LineSpec::All);
    }

    let inner = field.strip_prefix('[')?.strip_suffix(']')?;
    let mut lines = Vec::new();
    let mut ranges = Vec::new();
    if inner.is_empty() {
        return Some(LineSpec::Lines { lines, ranges });
    }

    let inner = inner.strip_suffix(',').unwrap_or(inner);
    for item in inner.split(',') {
        match item.split_once('-') {
            Some((from, to)) => ranges.push(LineRange::new(parse_line(from)?, parse_line(to)?)?),
            None => lines.push(parse_line(item)?),
        }
    }
    Some(LineSpec::Lines { lines, ranges })
}

fn parse_line(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
