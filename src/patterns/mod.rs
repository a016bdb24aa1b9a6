//! Provider patterns - typed matchers for storage provider identifiers.

pub mod error;
pub mod provider;

pub use error::PatternError;
pub use provider::{ProviderMatcher, ProviderPattern};
