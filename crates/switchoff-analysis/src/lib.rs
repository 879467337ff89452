//! # switchoff-analysis
//!
//! Suppression engine for static-analysis findings.
//! Contains the rule model, the flat-text rule decoder, the rule registry,
//! the in-source marker scanner and the finding filter.

pub mod engine;
pub mod filter;
pub mod registry;
pub mod rules;
pub mod scanner;

pub use engine::{Engine, RunReport};
pub use filter::{FilterOutcome, FindingFilter};
pub use registry::RuleRegistry;
pub use rules::{BlockRule, LineRange, MatchRule, Rule, WholeUnitRule, WildcardPattern};
pub use scanner::{MarkerScanner, ScanOutcome, ScanSummary, SourceScanner};
