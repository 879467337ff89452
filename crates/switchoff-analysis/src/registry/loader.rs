//! Reads rules out of [`Settings`]: the indexed rule groups first, then the
//! deprecated flat-text properties.

use std::path::{Path, PathBuf};

use switchoff_core::config::{keys, Settings};
use switchoff_core::errors::ConfigError;
use tracing::info;

use crate::rules::decoder::{self, is_regexp};
use crate::rules::{BlockRule, MatchRule, Rule, WholeUnitRule, WildcardPattern};

/// The three rule collections, in configuration order.
#[derive(Debug, Clone, Default)]
pub struct LoadedRules {
    pub match_rules: Vec<MatchRule>,
    pub block_rules: Vec<BlockRule>,
    pub whole_unit_rules: Vec<WholeUnitRule>,
}

impl LoadedRules {
    /// Files a rule under the collection its role belongs to.
    pub fn push(&mut self, rule: Rule) {
        match rule {
            Rule::Match(r) => self.match_rules.push(r),
            Rule::Block(r) => self.block_rules.push(r),
            Rule::WholeUnit(r) => self.whole_unit_rules.push(r),
        }
    }

    pub fn len(&self) -> usize {
        self.match_rules.len() + self.block_rules.len() + self.whole_unit_rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Load every rule the settings define.
pub fn load_rules(settings: &Settings, base_dir: &Path) -> Result<LoadedRules, ConfigError> {
    let mut rules = LoadedRules::default();
    load_multicriteria_groups(settings, &mut rules)?;
    load_block_groups(settings, &mut rules)?;
    load_allfile_groups(settings, &mut rules)?;
    for rule in load_deprecated_rules(settings, base_dir)? {
        rules.push(rule);
    }
    Ok(rules)
}

fn load_multicriteria_groups(settings: &Settings, rules: &mut LoadedRules) -> Result<(), ConfigError> {
    for id in settings.get_ids(keys::MULTICRITERIA) {
        let field = |name: &str| {
            settings
                .get_non_blank(&keys::group_field(keys::MULTICRITERIA, id, name))
                .unwrap_or("*")
        };
        let invalid = |name: &str, value: &str| ConfigError::InvalidGroupValue {
            group: keys::MULTICRITERIA.to_string(),
            id: id.to_string(),
            field: name.to_string(),
            value: value.to_string(),
        };

        let unit = field(keys::UNIT_KEY).trim();
        let rule_key = field(keys::RULE_KEY).trim();
        let line_range = field(keys::LINE_RANGE);

        let unit_pattern =
            WildcardPattern::new(unit).map_err(|_| invalid(keys::UNIT_KEY, unit))?;
        let rule_pattern =
            WildcardPattern::new(rule_key).map_err(|_| invalid(keys::RULE_KEY, rule_key))?;
        let spec = decoder::decode_line_spec(line_range)
            .ok_or_else(|| invalid(keys::LINE_RANGE, line_range))?;

        rules
            .match_rules
            .push(spec.apply(MatchRule::new(unit_pattern, rule_pattern)));
    }
    Ok(())
}

fn load_block_groups(settings: &Settings, rules: &mut LoadedRules) -> Result<(), ConfigError> {
    for id in settings.get_ids(keys::BLOCK) {
        let begin_key = keys::group_field(keys::BLOCK, id, keys::BEGIN_BLOCK_REGEXP);
        let end_key = keys::group_field(keys::BLOCK, id, keys::END_BLOCK_REGEXP);

        let begin = settings
            .get_non_blank(&begin_key)
            .ok_or_else(|| ConfigError::IncompleteGroup {
                group: keys::BLOCK.to_string(),
                id: id.to_string(),
                field: keys::BEGIN_BLOCK_REGEXP.to_string(),
            })?;
        let end = settings.get_non_blank(&end_key);

        for (name, value) in [(keys::BEGIN_BLOCK_REGEXP, Some(begin)), (keys::END_BLOCK_REGEXP, end)] {
            if let Some(value) = value.filter(|v| !is_regexp(v)) {
                return Err(ConfigError::InvalidGroupValue {
                    group: keys::BLOCK.to_string(),
                    id: id.to_string(),
                    field: name.to_string(),
                    value: value.to_string(),
                });
            }
        }

        rules
            .block_rules
            .push(BlockRule::new(begin, end.map(str::to_string)));
    }
    Ok(())
}

fn load_allfile_groups(settings: &Settings, rules: &mut LoadedRules) -> Result<(), ConfigError> {
    for id in settings.get_ids(keys::ALLFILE) {
        let key = keys::group_field(keys::ALLFILE, id, keys::FILE_REGEXP);
        let regexp = settings
            .get_non_blank(&key)
            .ok_or_else(|| ConfigError::IncompleteGroup {
                group: keys::ALLFILE.to_string(),
                id: id.to_string(),
                field: keys::FILE_REGEXP.to_string(),
            })?;
        if !is_regexp(regexp) {
            return Err(ConfigError::InvalidGroupValue {
                group: keys::ALLFILE.to_string(),
                id: id.to_string(),
                field: keys::FILE_REGEXP.to_string(),
                value: regexp.to_string(),
            });
        }
        rules.whole_unit_rules.push(WholeUnitRule::new(regexp));
    }
    Ok(())
}

/// Inline text wins; the file is only read when the inline property is blank.
fn load_deprecated_rules(settings: &Settings, base_dir: &Path) -> Result<Vec<Rule>, ConfigError> {
    if let Some(text) = settings.get_non_blank(keys::PATTERNS) {
        return Ok(decoder::decode_str(text)?);
    }
    if let Some(location) = settings.get_non_blank(keys::CONFIG_FILE) {
        let file = locate_file(base_dir, location)?;
        info!(path = %file.display(), "switchoff configured with rule file");
        return decoder::decode_file(&file);
    }
    Ok(Vec::new())
}

/// Resolves `location` against `base_dir` (absolute locations are used as-is).
fn locate_file(base_dir: &Path, location: &str) -> Result<PathBuf, ConfigError> {
    let file = base_dir.join(location.trim());
    if !file.is_file() {
        return Err(ConfigError::RuleFileNotFound {
            key: keys::CONFIG_FILE.to_string(),
            location: location.to_string(),
        });
    }
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(pairs: &[(&str, &str)]) -> Settings {
        pairs.iter().copied().collect()
    }

    #[test]
    fn multicriteria_fields_default_to_star() {
        let s = settings(&[("switchoff.multicriteria", "1")]);
        let rules = load_rules(&s, Path::new(".")).unwrap();
        assert_eq!(rules.match_rules.len(), 1);
        let rule = &rules.match_rules[0];
        assert_eq!(rule.unit_pattern().as_str(), "*");
        assert_eq!(rule.rule_key_pattern().as_str(), "*");
        assert!(!rule.check_lines());
    }

    #[test]
    fn invalid_group_line_range_is_reported_with_its_field() {
        let s = settings(&[
            ("switchoff.multicriteria", "7"),
            ("switchoff.multicriteria.7.lineRange", "15-200"),
        ]);
        let err = load_rules(&s, Path::new(".")).unwrap_err();
        match err {
            ConfigError::InvalidGroupValue { id, field, value, .. } => {
                assert_eq!(id, "7");
                assert_eq!(field, "lineRange");
                assert_eq!(value, "15-200");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn block_group_without_end_runs_to_end_of_file() {
        let s = settings(&[
            ("switchoff.block", "1"),
            ("switchoff.block.1.beginBlockRegexp", "// OFF"),
            ("switchoff.block.1.endBlockRegexp", "  "),
        ]);
        let rules = load_rules(&s, Path::new(".")).unwrap();
        assert_eq!(rules.block_rules, vec![BlockRule::new("// OFF", None)]);
    }

    #[test]
    fn block_group_without_begin_is_incomplete() {
        let s = settings(&[
            ("switchoff.block", "1"),
            ("switchoff.block.1.endBlockRegexp", "// ON"),
        ]);
        assert!(matches!(
            load_rules(&s, Path::new(".")).unwrap_err(),
            ConfigError::IncompleteGroup { .. }
        ));
    }

    #[test]
    fn allfile_group_with_bad_regexp_is_rejected() {
        let s = settings(&[
            ("switchoff.allfile", "1"),
            ("switchoff.allfile.1.fileRegexp", "(unclosed"),
        ]);
        assert!(matches!(
            load_rules(&s, Path::new(".")).unwrap_err(),
            ConfigError::InvalidGroupValue { .. }
        ));
    }

    #[test]
    fn deprecated_text_rules_are_classified_by_role() {
        let s = settings(&[(
            "switchoff.patterns",
            "SONAR-ALL-OFF\norg.foo.Bar;*;*\nSONAR-ALL-ON\norg.foo.Hello;checkstyle:MagicNumber;[15-200]\nSONAR-OFF;SONAR-ON",
        )]);
        let rules = load_rules(&s, Path::new(".")).unwrap();
        assert_eq!(rules.match_rules.len(), 2);
        assert_eq!(rules.block_rules.len(), 1);
        assert_eq!(rules.whole_unit_rules.len(), 2);
        assert_eq!(rules.len(), 5);
    }

    #[test]
    fn missing_rule_file_names_the_property() {
        let s = settings(&[("switchoff.configFile", "/path/to/unknown/file")]);
        let err = load_rules(&s, Path::new(".")).unwrap_err();
        assert!(matches!(err, ConfigError::RuleFileNotFound { .. }));
        assert!(err.to_string().contains("switchoff.configFile"));
    }
}
