use crate::types::source::SourceUnit;

/// Supplies the source units of a project and the charset they are encoded in.
///
/// Unit discovery and unit key resolution live behind this trait; the scanner only
/// needs an opaque key and a readable path per unit.
pub trait SourceProvider: Send + Sync {
    fn main_units(&self) -> Vec<SourceUnit>;

    fn test_units(&self) -> Vec<SourceUnit>;

    /// Charset name, e.g. `UTF-8`.
    fn charset(&self) -> &str;
}
