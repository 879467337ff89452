//! End-to-end runs: TOML config, rule loading, marker scanning and filtering.

#![allow(clippy::unwrap_used)]

use std::fs;

use switchoff_analysis::Engine;
use switchoff_core::config::SwitchOffConfig;
use switchoff_core::errors::{ScanError, SwitchOffError};
use switchoff_core::types::{Finding, RuleKey, SourceSet, SourceUnit};
use switchoff_core::SwitchOffErrorCode;

const CONFIG: &str = r#"
[scan]
threads = 2

[properties]
"switchoff.multicriteria" = "1"
"switchoff.multicriteria.1.unitKey" = "com.foo.Legacy"
"switchoff.multicriteria.1.ruleKey" = "checkstyle:*"
"switchoff.block" = "1"
"switchoff.block.1.beginBlockRegexp" = "// SONAR-OFF"
"switchoff.block.1.endBlockRegexp" = "// SONAR-ON"
"switchoff.allfile" = "1"
"switchoff.allfile.1.fileRegexp" = "@generated"
"#;

fn finding(unit: &str, rule: &str, line: u32) -> Finding {
    Finding::new(unit, RuleKey::parse(rule).unwrap()).with_line(line)
}

#[test]
fn full_run_suppresses_by_rule_block_and_whole_unit() {
    let dir = tempfile::tempdir().unwrap();
    let blocks = dir.path().join("Blocks.java");
    let generated = dir.path().join("Generated.java");
    let plain = dir.path().join("Plain.java");
    fs::write(&blocks, "a\n// SONAR-OFF\nb\n// SONAR-ON\nc\n").unwrap();
    fs::write(&generated, "// @generated\nclass G {}\n").unwrap();
    fs::write(&plain, "class P {}\n").unwrap();

    let config = SwitchOffConfig::from_toml(CONFIG).unwrap();
    let engine = Engine::new(&config, dir.path()).unwrap();
    let sources = SourceSet::utf8()
        .with_unit(SourceUnit::main("com.foo.Blocks", &blocks))
        .with_unit(SourceUnit::main("com.foo.Generated", &generated))
        .with_unit(SourceUnit::test("com.foo.Plain", &plain));

    let findings = vec![
        finding("com.foo.Blocks", "squid:S1", 1),
        finding("com.foo.Blocks", "squid:S1", 3),
        finding("com.foo.Generated", "pmd:Any", 2),
        finding("com.foo.Legacy", "checkstyle:MagicNumber", 50),
        finding("com.foo.Legacy", "pmd:Unused", 50),
        finding("com.foo.Plain", "squid:S2", 1),
    ];
    let report = engine.run(&sources, findings).unwrap();

    let scan = report.scan.unwrap();
    assert_eq!(scan.units_scanned, 3);
    assert_eq!(scan.units_excluded, 1);
    assert_eq!(scan.units_with_excluded_lines, 1);

    assert_eq!(report.suppressed, 3);
    let kept: Vec<_> = report
        .kept
        .iter()
        .map(|f| (f.unit_key.clone().unwrap(), f.line.unwrap()))
        .collect();
    assert_eq!(
        kept,
        [
            ("com.foo.Blocks".to_string(), 1),
            ("com.foo.Legacy".to_string(), 50),
            ("com.foo.Plain".to_string(), 1),
        ]
    );
}

#[test]
fn unreadable_source_aborts_the_run() {
    let config = SwitchOffConfig::from_toml(CONFIG).unwrap();
    let engine = Engine::new(&config, ".").unwrap();
    let sources = SourceSet::utf8().with_unit(SourceUnit::main("Gone", "missing/Gone.java"));

    let err = engine.run(&sources, Vec::new()).unwrap_err();
    assert!(matches!(err, SwitchOffError::Scan(ScanError::Unreadable { .. })));
    assert_eq!(err.error_code(), "SCAN_IO_ERROR");
}

#[test]
fn bad_rule_configuration_fails_construction() {
    let config = SwitchOffConfig::from_toml(
        r#"
        [properties]
        "switchoff.patterns" = "*;*;[5-1]"
        "#,
    )
    .unwrap();
    let err = Engine::new(&config, ".").unwrap_err();
    assert_eq!(err.error_code(), "DECODE_INVALID_LINE_SPEC");
    assert!(err
        .to_string()
        .starts_with("Invalid format. The third field does not define a range of lines: *;*;[5-1]"));
}
