//! Property keys understood by the rule registry.
//!
//! The three rule groups are indexed: `<group>` holds a comma-separated list of ids and
//! each id owns one property per field, `<group>.<id>.<field>`.

/// Multi-criteria (match) rule groups.
pub const MULTICRITERIA: &str = "switchoff.multicriteria";
pub const UNIT_KEY: &str = "unitKey";
pub const RULE_KEY: &str = "ruleKey";
pub const LINE_RANGE: &str = "lineRange";

/// Block rule groups.
pub const BLOCK: &str = "switchoff.block";
pub const BEGIN_BLOCK_REGEXP: &str = "beginBlockRegexp";
pub const END_BLOCK_REGEXP: &str = "endBlockRegexp";

/// Whole-unit rule groups.
pub const ALLFILE: &str = "switchoff.allfile";
pub const FILE_REGEXP: &str = "fileRegexp";

/// Deprecated: inline flat-text rules.
pub const PATTERNS: &str = "switchoff.patterns";

/// Deprecated: path of a flat-text rule file, relative to the project base directory.
pub const CONFIG_FILE: &str = "switchoff.configFile";

/// Builds `<group>.<id>.<field>`.
pub fn group_field(group: &str, id: &str, field: &str) -> String {
    format!("{group}.{id}.{field}")
}
