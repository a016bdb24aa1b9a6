//! Resource descriptors as handed over by the listing layer

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Coarse media classification of a listed resource
#[derive(ValueEnum, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// Type could not be determined
    #[default]
    Unknown,
    /// Directory entry
    Folder,
    /// Video file
    Video,
    /// Audio file
    Audio,
    /// Plain or structured text
    Text,
    /// Raster or vector image
    Image,
    /// Anything else (archives, packages, binaries)
    Other,
}

/// A single listed file entry
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    /// Display name, including extension
    pub name: String,
    /// Media classification reported by the listing layer
    #[serde(rename = "type", default)]
    pub media_type: MediaType,
    /// Identifier of the storage provider the entry lives on
    #[serde(default)]
    pub provider: String,
}

impl ResourceDescriptor {
    /// Create a new descriptor
    #[must_use]
    pub fn new(name: impl Into<String>, media_type: MediaType, provider: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            media_type,
            provider: provider.into(),
        }
    }

    /// Lowercase substring after the last `.`, empty if there is none
    #[must_use]
    pub fn extension(&self) -> String {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default()
    }

    /// Name without its final extension
    #[must_use]
    pub fn base_name(&self) -> &str {
        self.name
            .rsplit_once('.')
            .map_or(self.name.as_str(), |(base, _)| base)
    }
}
