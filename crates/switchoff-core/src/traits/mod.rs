//! Interfaces implemented by the collaborators around the core.

pub mod source_provider;

pub use source_provider::SourceProvider;
