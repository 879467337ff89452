//! Marker scanning: block and whole-unit suppression markers found in source text.

pub mod charset;
pub mod marker_scanner;
pub mod source_scanner;

pub use charset::Charset;
pub use marker_scanner::{MarkerScanner, ScanOutcome};
pub use source_scanner::{ScanSummary, SourceScanner};
