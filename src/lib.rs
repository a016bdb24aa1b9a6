//! Peekr - preview resolution for remote file browsers
//!
//! This library decides which renderers apply to a listed resource and in
//! what order, expands iframe viewer templates, builds deep links into
//! native player apps, and owns the lifecycle of the in-page media player.

use thiserror::Error;

pub mod cli;
pub mod config;
pub mod patterns;
pub mod player;
pub mod preview;
pub mod resource;

#[cfg(test)]
pub mod testing;

pub use resource::{MediaType, ResourceDescriptor};

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum PeekrError {
    /// Preview registry could not be built
    #[error("Registry error: {0}")]
    RegistryError(#[from] preview::RegistryError),
    /// External player catalog is invalid
    #[error("Player catalog error: {0}")]
    CatalogError(#[from] player::CatalogError),
    /// Provider pattern did not compile
    #[error("Pattern error: {0}")]
    PatternError(#[from] patterns::PatternError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents a JSON output error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
