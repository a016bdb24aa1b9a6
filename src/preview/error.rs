//! Preview error types

use thiserror::Error;

use crate::patterns::PatternError;

/// Errors detected while building a preview rule registry
///
/// These only ever surface at startup; resolution itself cannot fail.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Rule has no display name
    #[error("Preview rule has an empty name")]
    EmptyName,

    /// Provider filter did not compile
    #[error("Invalid provider filter on rule '{rule}': {source}")]
    InvalidProvider {
        rule: String,
        #[source]
        source: PatternError,
    },

    /// Extension filter entry is empty or still carries its leading dot
    #[error("Invalid extension '{extension}' on rule '{rule}'")]
    InvalidExtension { rule: String, extension: String },
}

/// Result type for registry construction
pub type Result<T> = std::result::Result<T, RegistryError>;
