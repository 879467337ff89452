pub mod collections;
pub mod finding;
pub mod source;

pub use finding::{Finding, RuleKey};
pub use source::{SourceSet, SourceUnit};
