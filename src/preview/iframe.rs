//! Third-party viewers embedded through URL templates

use serde::{Deserialize, Serialize};

use super::types::{Preview, RendererRef};
use crate::player::links::substitute;
use crate::resource::ResourceDescriptor;

/// A named URL pattern for embedding a resource in a third-party viewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IframeTemplate {
    pub key: String,
    pub url_template: String,
}

impl IframeTemplate {
    #[must_use]
    pub fn new(key: impl Into<String>, url_template: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            url_template: url_template.into(),
        }
    }
}

/// External lookup of the iframe templates relevant to a resource name
///
/// Relevance is entirely the source's decision. It is queried once per
/// resolution and never cached by the resolver.
pub trait IframeTemplateSource: Send + Sync {
    fn templates_for(&self, name: &str) -> Vec<IframeTemplate>;
}

impl<F> IframeTemplateSource for F
where
    F: Fn(&str) -> Vec<IframeTemplate> + Send + Sync,
{
    fn templates_for(&self, name: &str) -> Vec<IframeTemplate> {
        self(name)
    }
}

/// Source that never offers a template
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIframeTemplates;

impl IframeTemplateSource for NoIframeTemplates {
    fn templates_for(&self, _name: &str) -> Vec<IframeTemplate> {
        Vec::new()
    }
}

/// One `[[iframe_previews]]` table of the configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IframePreviewEntry {
    /// Extensions (without dot) this viewer handles
    pub extensions: Vec<String>,
    /// Label shown to the user
    pub name: String,
    /// URL template
    pub url: String,
}

/// Template source backed by the configuration file
///
/// An entry is offered when the resource name ends with `.<ext>` for one of
/// its extensions, compared case-insensitively. Entries keep file order.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredIframeTemplates {
    entries: Vec<IframePreviewEntry>,
}

impl ConfiguredIframeTemplates {
    #[must_use]
    pub const fn new(entries: Vec<IframePreviewEntry>) -> Self {
        Self { entries }
    }
}

impl IframeTemplateSource for ConfiguredIframeTemplates {
    fn templates_for(&self, name: &str) -> Vec<IframeTemplate> {
        let name = name.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| {
                entry
                    .extensions
                    .iter()
                    .any(|ext| name.ends_with(&format!(".{}", ext.to_lowercase())))
            })
            .map(|entry| IframeTemplate::new(&entry.name, &entry.url))
            .collect()
    }
}

/// Final frame URL for `template` applied to a resource.
///
/// Uses the same token table as the external player links. A template with
/// no token is returned unchanged.
#[must_use]
pub fn expand_url(template: &str, resource: &ResourceDescriptor, raw_url: &str) -> String {
    substitute(template, raw_url, &resource.name)
}

/// Renderer embedding the expanded template in a frame
#[must_use]
pub fn expand(template: &str, resource: &ResourceDescriptor, raw_url: &str) -> RendererRef {
    RendererRef::fixed(Preview::Iframe {
        src: expand_url(template, resource, raw_url),
    })
}

/// Handle bound to `resource` now, expanded once the raw URL is known
pub(crate) fn deferred(template: String, resource: &ResourceDescriptor) -> RendererRef {
    let resource = resource.clone();
    RendererRef::new(move |ctx| Preview::Iframe {
        src: expand_url(&template, &resource, ctx.raw_url),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::types::PreviewContext;
    use crate::resource::MediaType;

    fn office() -> IframePreviewEntry {
        IframePreviewEntry {
            extensions: vec!["doc".into(), "docx".into()],
            name: "Microsoft".into(),
            url: "https://view.officeapps.live.com/op/view.aspx?src=$url".into(),
        }
    }

    fn google() -> IframePreviewEntry {
        IframePreviewEntry {
            extensions: vec!["docx".into(), "pdf".into()],
            name: "Google".into(),
            url: "https://docs.google.com/gview?url=$url&embedded=true".into(),
        }
    }

    #[test]
    fn test_expand_inserts_encoded_url() {
        let doc = ResourceDescriptor::new("a.docx", MediaType::Other, "local");
        let src = expand_url(&office().url, &doc, "http://h/a.docx");
        assert_eq!(
            src,
            "https://view.officeapps.live.com/op/view.aspx?src=http%3A%2F%2Fh%2Fa.docx"
        );
    }

    #[test]
    fn test_expand_without_placeholder_is_verbatim() {
        let doc = ResourceDescriptor::new("a.docx", MediaType::Other, "local");
        let handle = expand("https://static.example/viewer", &doc, "http://h/a.docx");
        let ctx = PreviewContext::new(&doc, "http://h/a.docx");
        assert_eq!(
            handle.instantiate(&ctx),
            Preview::Iframe { src: "https://static.example/viewer".into() }
        );
    }

    #[test]
    fn test_configured_source_matches_suffix_in_order() {
        let source = ConfiguredIframeTemplates::new(vec![office(), google()]);
        let keys: Vec<_> = source.templates_for("Report.DOCX").into_iter().map(|t| t.key).collect();
        assert_eq!(keys, ["Microsoft", "Google"]);
        let keys: Vec<_> = source.templates_for("paper.pdf").into_iter().map(|t| t.key).collect();
        assert_eq!(keys, ["Google"]);
        assert!(source.templates_for("docx").is_empty());
    }

    #[test]
    fn test_closure_as_source() {
        let source = |name: &str| {
            if name.contains("sheet") {
                vec![IframeTemplate::new("Sheets", "https://s/$url")]
            } else {
                Vec::new()
            }
        };
        assert_eq!(source.templates_for("my-sheet.xlsx").len(), 1);
        assert!(source.templates_for("a.txt").is_empty());
    }

    #[test]
    fn test_deferred_uses_context_url() {
        let doc = ResourceDescriptor::new("a.pdf", MediaType::Other, "local");
        let handle = deferred("v?u=$url&n=$name".into(), &doc);
        let ctx = PreviewContext::new(&doc, "http://h/a.pdf");
        assert_eq!(
            handle.instantiate(&ctx),
            Preview::Iframe { src: "v?u=http%3A%2F%2Fh%2Fa.pdf&n=a.pdf".into() }
        );
    }
}
