//! Preview resolution
//!
//! This module decides which renderers apply to a resource:
//! - An ordered registry of preview rules
//! - Iframe templates supplied by an external source
//! - The resolver combining both, always ending with `Download`

mod error;
mod iframe;
mod registry;
mod resolver;
mod types;

pub use error::{RegistryError, Result};
pub use iframe::{
    expand, expand_url, ConfiguredIframeTemplates, IframePreviewEntry, IframeTemplate, IframeTemplateSource,
    NoIframeTemplates,
};
pub use registry::{ExtensionFilter, PreviewRule, Registry, RegistryBuilder};
pub use resolver::{resolve, Resolver, DOWNLOAD};
pub use types::{Preview, PreviewContext, RendererBinding, RendererRef};
