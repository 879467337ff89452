//! Line-by-line search for suppression markers inside one source unit.
//!
//! The scanner is a two-state machine. While `Active` it looks for a block
//! begin marker; while `Suppressing` it looks for the end marker of the block
//! that opened. Whole-unit markers are checked on every line in both states and
//! end the scan on the first hit.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use regex::Regex;
use switchoff_core::errors::ScanError;

use super::charset::Charset;
use crate::registry::RuleRegistry;
use crate::rules::{BlockRule, LineRange, WholeUnitRule};

/// What a scan decided for one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// No marker fired.
    Clean,
    /// A whole-unit marker matched on `line`.
    ExcludeUnit { line: u32 },
    /// Lines covered by one or more blocks, in file order.
    ExcludeLines(Vec<LineRange>),
}

#[derive(Debug)]
struct CompiledBlock {
    begin: Regex,
    end: Option<Regex>,
}

#[derive(Debug, Clone, Copy)]
enum State {
    Active,
    Suppressing { first_line: u32, block: usize },
}

/// Marker regexes compiled once per run and shared by every unit scan.
#[derive(Debug)]
pub struct MarkerScanner {
    blocks: Vec<CompiledBlock>,
    whole_unit: Vec<Regex>,
}

impl MarkerScanner {
    pub fn new(blocks: &[BlockRule], whole_unit: &[WholeUnitRule]) -> Result<Self, ScanError> {
        let blocks = blocks
            .iter()
            .map(|rule| -> Result<CompiledBlock, ScanError> {
                Ok(CompiledBlock {
                    begin: compile(rule.begin_regexp())?,
                    end: rule.end_regexp().map(compile).transpose()?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let whole_unit = whole_unit
            .iter()
            .map(|rule| compile(rule.regexp()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { blocks, whole_unit })
    }

    pub fn from_registry(registry: &RuleRegistry) -> Result<Self, ScanError> {
        Self::new(registry.block_rules(), registry.whole_unit_rules())
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.whole_unit.is_empty()
    }

    /// Scan in-memory text.
    pub fn scan_str(&self, text: &str) -> ScanOutcome {
        let mut machine = Machine::new(self);
        for line in text.lines() {
            if machine.feed(line) {
                break;
            }
        }
        machine.finish()
    }

    /// Scan a stream one line at a time, decoding each line with `charset`.
    pub fn scan_reader<R: BufRead>(&self, mut reader: R, charset: Charset) -> io::Result<ScanOutcome> {
        let mut machine = Machine::new(self);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let line = charset.decode(strip_line_ending(&buf))?;
            if machine.feed(&line) {
                break;
            }
        }
        Ok(machine.finish())
    }

    pub fn scan_file(&self, path: &Path, charset: Charset) -> io::Result<ScanOutcome> {
        let file = File::open(path)?;
        self.scan_reader(BufReader::new(file), charset)
    }
}

fn compile(regexp: &str) -> Result<Regex, ScanError> {
    Regex::new(regexp).map_err(|e| ScanError::InvalidMarker {
        regexp: regexp.to_string(),
        message: e.to_string(),
    })
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Per-unit scan state.
struct Machine<'a> {
    scanner: &'a MarkerScanner,
    state: State,
    line_number: u32,
    ranges: Vec<LineRange>,
    excluded_at: Option<u32>,
}

impl<'a> Machine<'a> {
    fn new(scanner: &'a MarkerScanner) -> Self {
        Self {
            scanner,
            state: State::Active,
            line_number: 0,
            ranges: Vec::new(),
            excluded_at: None,
        }
    }

    /// Returns true once the unit is excluded and reading can stop.
    fn feed(&mut self, line: &str) -> bool {
        self.line_number += 1;
        let n = self.line_number;

        if self.scanner.whole_unit.iter().any(|re| re.is_match(line)) {
            self.excluded_at = Some(n);
            return true;
        }

        match self.state {
            State::Active => {
                if let Some(block) = self
                    .scanner
                    .blocks
                    .iter()
                    .position(|b| b.begin.is_match(line))
                {
                    self.state = State::Suppressing {
                        first_line: n,
                        block,
                    };
                }
            }
            State::Suppressing { first_line, block } => {
                let closes = self.scanner.blocks[block]
                    .end
                    .as_ref()
                    .is_some_and(|end| end.is_match(line));
                if closes {
                    self.close(first_line, n);
                    self.state = State::Active;
                }
            }
        }
        false
    }

    fn close(&mut self, first_line: u32, last_line: u32) {
        if let Some(range) = LineRange::new(first_line, last_line) {
            self.ranges.push(range);
        }
    }

    fn finish(mut self) -> ScanOutcome {
        if let Some(line) = self.excluded_at {
            return ScanOutcome::ExcludeUnit { line };
        }
        if let State::Suppressing { first_line, .. } = self.state {
            self.close(first_line, self.line_number);
        }
        if self.ranges.is_empty() {
            ScanOutcome::Clean
        } else {
            ScanOutcome::ExcludeLines(self.ranges)
        }
    }
}
