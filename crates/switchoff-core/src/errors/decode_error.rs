//! Grammar errors raised while decoding the flat-text rule language.

use super::error_code::{self, SwitchOffErrorCode};

/// A malformed line in a flat-text rule blob or file.
///
/// `line_number` is 1-based and counts every input line, including comments and blanks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("Invalid format. The following line has more than 3 fields separated by semicolons: {line} (line {line_number})")]
    TooManyFields { line_number: usize, line: String },

    #[error("Invalid format. The first field does not define a unit pattern: {line} (line {line_number})")]
    InvalidUnitPattern { line_number: usize, line: String },

    #[error("Invalid format. The second field does not define a rule pattern: {line} (line {line_number})")]
    InvalidRulePattern { line_number: usize, line: String },

    #[error("Invalid format. The third field does not define a range of lines: {line} (line {line_number})")]
    InvalidLineSpec { line_number: usize, line: String },

    #[error("Invalid format. The first field does not define a regular expression: {line} (line {line_number})")]
    InvalidBeginRegexp { line_number: usize, line: String },

    #[error("Invalid format. The second field does not define a regular expression: {line} (line {line_number})")]
    InvalidEndRegexp { line_number: usize, line: String },

    #[error("Invalid format. The field does not define a regular expression: {line} (line {line_number})")]
    InvalidWholeUnitRegexp { line_number: usize, line: String },
}

impl DecodeError {
    /// The offending input line, as written.
    pub fn line(&self) -> &str {
        match self {
            Self::TooManyFields { line, .. }
            | Self::InvalidUnitPattern { line, .. }
            | Self::InvalidRulePattern { line, .. }
            | Self::InvalidLineSpec { line, .. }
            | Self::InvalidBeginRegexp { line, .. }
            | Self::InvalidEndRegexp { line, .. }
            | Self::InvalidWholeUnitRegexp { line, .. } => line,
        }
    }

    pub fn line_number(&self) -> usize {
        match self {
            Self::TooManyFields { line_number, .. }
            | Self::InvalidUnitPattern { line_number, .. }
            | Self::InvalidRulePattern { line_number, .. }
            | Self::InvalidLineSpec { line_number, .. }
            | Self::InvalidBeginRegexp { line_number, .. }
            | Self::InvalidEndRegexp { line_number, .. }
            | Self::InvalidWholeUnitRegexp { line_number, .. } => *line_number,
        }
    }
}

impl SwitchOffErrorCode for DecodeError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::TooManyFields { .. } => error_code::DECODE_TOO_MANY_FIELDS,
            Self::InvalidUnitPattern { .. } => error_code::DECODE_INVALID_UNIT_PATTERN,
            Self::InvalidRulePattern { .. } => error_code::DECODE_INVALID_RULE_PATTERN,
            Self::InvalidLineSpec { .. } => error_code::DECODE_INVALID_LINE_SPEC,
            Self::InvalidBeginRegexp { .. }
            | Self::InvalidEndRegexp { .. }
            | Self::InvalidWholeUnitRegexp { .. } => error_code::DECODE_INVALID_REGEXP,
        }
    }
}
