//! Inclusive line intervals.

use std::fmt;

/// An inclusive `[from, to]` interval of 1-based line numbers. `from <= to` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineRange {
    from: u32,
    to: u32,
}

impl LineRange {
    /// Returns `None` when `from > to`.
    pub fn new(from: u32, to: u32) -> Option<Self> {
        (from <= to).then_some(Self { from, to })
    }

    pub fn single(line: u32) -> Self {
        Self {
            from: line,
            to: line,
        }
    }

    pub fn start(&self) -> u32 {
        self.from
    }

    pub fn end(&self) -> u32 {
        self.to
    }

    pub fn contains(&self, line: u32) -> bool {
        self.from <= line && line <= self.to
    }

    /// Every line in the interval, ascending.
    pub fn to_lines(&self) -> impl Iterator<Item = u32> {
        self.from..=self.to
    }

    pub fn len(&self) -> usize {
        (self.to - self.from) as usize + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}
