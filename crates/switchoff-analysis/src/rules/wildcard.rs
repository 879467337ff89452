//! Wildcard patterns over unit keys and rule keys.
//!
//! `*` matches any sequence of characters (including none), `?` matches exactly one.
//! Every other character matches itself. Matching is case-sensitive and anchored on
//! both ends.

use std::fmt;

use regex::Regex;

/// A wildcard pattern compiled once, matched many times.
#[derive(Debug, Clone)]
pub struct WildcardPattern {
    source: String,
    matcher: Matcher,
}

#[derive(Debug, Clone)]
enum Matcher {
    /// `*`: matches every candidate.
    Any,
    /// No wildcard characters: plain string equality.
    Literal,
    Regex(Regex),
}

impl WildcardPattern {
    /// Compile `pattern`. Only fails if the translated regex exceeds the regex size limit.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let matcher = if pattern == "*" {
            Matcher::Any
        } else if !pattern.contains(|c| c == '*' || c == '?') {
            Matcher::Literal
        } else {
            Matcher::Regex(Regex::new(&to_regex(pattern))?)
        };
        Ok(Self {
            source: pattern.to_string(),
            matcher,
        })
    }

    /// A pattern that matches `key` and nothing else, even if `key` contains `*` or `?`.
    pub fn literal(key: &str) -> Self {
        Self {
            source: key.to_string(),
            matcher: Matcher::Literal,
        }
    }

    /// The pattern `*`.
    pub fn any() -> Self {
        Self {
            source: "*".to_string(),
            matcher: Matcher::Any,
        }
    }

    pub fn matches(&self, candidate: &str) -> bool {
        match &self.matcher {
            Matcher::Any => true,
            Matcher::Literal => self.source == candidate,
            Matcher::Regex(re) => re.is_match(candidate),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl PartialEq for WildcardPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for WildcardPattern {}

impl fmt::Display for WildcardPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// `*` → `.*`, `?` → `.`, everything else escaped.
fn to_regex(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2 + 8);
    out.push_str("(?s)^");
    let mut buf = [0u8; 4];
    for c in pattern.chars() {
        match c {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            _ => out.push_str(&regex::escape(c.encode_utf8(&mut buf))),
        }
    }
    out.push('$');
    out
}
