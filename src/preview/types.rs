//! Renderer handles and the previews they produce

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use crate::resource::ResourceDescriptor;

/// Description of the view a host should mount for a selected renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Preview {
    /// Rendered markdown
    Markdown,
    /// Editable plain text
    TextEditor,
    /// Sandboxed HTML render
    Html,
    /// Image viewer
    Image,
    /// Video player, backed by a `PlaybackAdapter`
    Video,
    /// Audio player
    Audio,
    /// iOS package with an over-the-air install link
    Ipa {
        /// `itms-services` link pointing at the generated manifest
        install_url: String,
    },
    /// Property list viewer
    Plist,
    /// Third-party viewer embedded in a frame
    Iframe {
        /// Final frame URL
        src: String,
    },
    /// Plain download page
    Download {
        /// Direct link to the resource
        url: String,
    },
}

/// Inputs available when a renderer handle is finally instantiated
#[derive(Debug, Clone, Copy)]
pub struct PreviewContext<'a> {
    /// Resource being previewed
    pub resource: &'a ResourceDescriptor,
    /// Direct URL of the resource content
    pub raw_url: &'a str,
    /// Base URL of the API serving install manifests
    pub api_base: &'a str,
}

impl<'a> PreviewContext<'a> {
    #[must_use]
    pub const fn new(resource: &'a ResourceDescriptor, raw_url: &'a str) -> Self {
        Self {
            resource,
            raw_url,
            api_base: "",
        }
    }

    #[must_use]
    pub const fn with_api_base(mut self, api_base: &'a str) -> Self {
        self.api_base = api_base;
        self
    }
}

type Factory = dyn Fn(&PreviewContext<'_>) -> Preview + Send + Sync;

/// Opaque, lazily evaluated renderer handle
///
/// Cloning is cheap. Nothing runs until [`RendererRef::instantiate`] is
/// called, so hosts only pay for the renderer the user actually selects.
#[derive(Clone)]
pub struct RendererRef {
    factory: Arc<Factory>,
}

impl RendererRef {
    /// Wrap a factory closure
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn(&PreviewContext<'_>) -> Preview + Send + Sync + 'static,
    {
        Self {
            factory: Arc::new(factory),
        }
    }

    /// Handle that always yields the same preview
    #[must_use]
    pub fn fixed(preview: Preview) -> Self {
        Self::new(move |_| preview.clone())
    }

    /// Run the factory
    #[must_use]
    pub fn instantiate(&self, ctx: &PreviewContext<'_>) -> Preview {
        (self.factory)(ctx)
    }
}

impl fmt::Debug for RendererRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RendererRef(..)")
    }
}

/// One entry of a resolution result: a label and the handle behind it
#[derive(Debug, Clone)]
pub struct RendererBinding {
    pub name: String,
    pub renderer: RendererRef,
}

impl RendererBinding {
    #[must_use]
    pub fn new(name: impl Into<String>, renderer: RendererRef) -> Self {
        Self {
            name: name.into(),
            renderer,
        }
    }

    /// Shorthand for `self.renderer.instantiate(ctx)`
    #[must_use]
    pub fn instantiate(&self, ctx: &PreviewContext<'_>) -> Preview {
        self.renderer.instantiate(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::MediaType;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_factory_runs_only_on_instantiate() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let handle = RendererRef::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Preview::Markdown
        });
        let binding = RendererBinding::new("Markdown", handle.clone());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let resource = ResourceDescriptor::new("a.md", MediaType::Text, "local");
        let ctx = PreviewContext::new(&resource, "http://h/a.md");
        assert_eq!(binding.instantiate(&ctx), Preview::Markdown);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_context_sees_raw_url() {
        let handle = RendererRef::new(|ctx| Preview::Download {
            url: ctx.raw_url.to_string(),
        });
        let resource = ResourceDescriptor::new("a.bin", MediaType::Other, "local");
        let ctx = PreviewContext::new(&resource, "http://h/a.bin");
        assert_eq!(
            handle.instantiate(&ctx),
            Preview::Download { url: "http://h/a.bin".to_string() }
        );
    }

    #[test]
    fn test_preview_serializes_with_kind_tag() {
        let json = serde_json::to_string(&Preview::Iframe { src: "x".into() }).unwrap();
        assert_eq!(json, r#"{"kind":"iframe","src":"x"}"#);
    }
}
