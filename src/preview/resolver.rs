//! Turns a resource into the ordered list of renderers to offer

use tracing::debug;

use super::iframe::{self, IframeTemplateSource};
use super::registry::Registry;
use super::types::{Preview, RendererBinding, RendererRef};
use crate::resource::ResourceDescriptor;

/// Label of the trailing fallback binding
pub const DOWNLOAD: &str = "Download";

/// Resolves resources against a fixed registry and an iframe template source
///
/// Resolution is pure: same resource, same registry, same template source
/// state gives the same list. Safe to share across threads.
#[derive(Debug, Clone)]
pub struct Resolver<S> {
    registry: Registry,
    templates: S,
}

impl<S: IframeTemplateSource> Resolver<S> {
    #[must_use]
    pub const fn new(registry: Registry, templates: S) -> Self {
        Self { registry, templates }
    }

    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Matching registry rules in order, then one binding per iframe
    /// template, then `Download`. Never empty.
    #[must_use]
    pub fn resolve(&self, resource: &ResourceDescriptor) -> Vec<RendererBinding> {
        resolve(&self.registry, &self.templates, resource)
    }
}

/// Free-standing form of [`Resolver::resolve`]
#[must_use]
pub fn resolve<S>(registry: &Registry, templates: &S, resource: &ResourceDescriptor) -> Vec<RendererBinding>
where
    S: IframeTemplateSource + ?Sized,
{
    let mut bindings: Vec<RendererBinding> = registry
        .matching(resource)
        .map(|rule| RendererBinding::new(rule.name(), rule.renderer().clone()))
        .collect();
    let matched = bindings.len();

    for template in templates.templates_for(&resource.name) {
        let renderer = iframe::deferred(template.url_template, resource);
        bindings.push(RendererBinding::new(template.key, renderer));
    }

    bindings.push(RendererBinding::new(DOWNLOAD, download_renderer()));

    debug!(
        name = %resource.name,
        provider = %resource.provider,
        rules = matched,
        iframes = bindings.len() - matched - 1,
        "resolved previews"
    );
    bindings
}

fn download_renderer() -> RendererRef {
    RendererRef::new(|ctx| Preview::Download {
        url: ctx.raw_url.to_string(),
    })
}
