//! Suppression rules: wildcard patterns, line ranges, the rule model and the
//! flat-text rule decoder.

pub mod decoder;
pub mod line_range;
pub mod rule;
pub mod wildcard;

pub use decoder::{decode_file, decode_line, decode_str, LineSpec};
pub use line_range::LineRange;
pub use rule::{BlockRule, MatchRule, Rule, WholeUnitRule};
pub use wildcard::WildcardPattern;
