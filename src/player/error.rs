//! Player error types

use thiserror::Error;

/// Errors detected while assembling the external player catalog
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Scheme has no icon to label it
    #[error("External player scheme has an empty icon")]
    EmptyIcon,

    /// Two schemes share an icon
    #[error("Duplicate external player icon: {0}")]
    DuplicateIcon(String),

    /// Scheme template never inserts the resource URL
    #[error("Scheme template for '{icon}' has no $url or $e_url token: {template}")]
    MissingUrlToken { icon: String, template: String },
}

/// Result type for catalog construction
pub type Result<T> = std::result::Result<T, CatalogError>;
