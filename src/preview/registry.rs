//! Ordered catalog of preview rules

use std::collections::BTreeSet;
use std::sync::Arc;

use super::error::{RegistryError, Result};
use super::types::{Preview, PreviewContext, RendererRef};
use crate::patterns::{ProviderMatcher, ProviderPattern};
use crate::resource::{MediaType, ResourceDescriptor};

/// Which extensions a rule accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionFilter {
    /// Every resource, whatever its extension
    Any,
    /// Lowercase extensions without the leading dot
    Only(BTreeSet<String>),
}

impl ExtensionFilter {
    /// Build an `Only` filter, lowercasing each entry
    pub fn only<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::Only(
            extensions
                .into_iter()
                .map(|e| e.as_ref().to_lowercase())
                .collect(),
        )
    }

    #[must_use]
    pub fn accepts(&self, extension: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Only(set) => set.contains(extension),
        }
    }
}

/// A registry entry declaring which resources a renderer applies to
///
/// A missing filter means "no constraint on that axis".
#[derive(Debug, Clone)]
pub struct PreviewRule {
    name: String,
    media_type: Option<MediaType>,
    extensions: Option<ExtensionFilter>,
    provider: Option<Arc<dyn ProviderMatcher>>,
    renderer: RendererRef,
}

impl PreviewRule {
    #[must_use]
    pub fn new(name: impl Into<String>, renderer: RendererRef) -> Self {
        Self {
            name: name.into(),
            media_type: None,
            extensions: None,
            provider: None,
            renderer,
        }
    }

    #[must_use]
    pub const fn media_type(mut self, media_type: MediaType) -> Self {
        self.media_type = Some(media_type);
        self
    }

    #[must_use]
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = Some(ExtensionFilter::only(extensions));
        self
    }

    #[must_use]
    pub fn any_extension(mut self) -> Self {
        self.extensions = Some(ExtensionFilter::Any);
        self
    }

    /// Restrict the rule to providers accepted by `matcher`
    #[must_use]
    pub fn provider(mut self, matcher: impl ProviderMatcher + 'static) -> Self {
        self.provider = Some(Arc::new(matcher));
        self
    }

    /// Restrict the rule to providers matching an unanchored regex
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::InvalidProvider` if the regex does not compile.
    pub fn provider_regex(self, pattern: &str) -> Result<Self> {
        let matcher = ProviderPattern::regex(pattern).map_err(|source| RegistryError::InvalidProvider {
            rule: self.name.clone(),
            source,
        })?;
        Ok(self.provider(matcher))
    }

    /// Restrict the rule to providers matching a glob
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::InvalidProvider` if the glob does not parse.
    pub fn provider_glob(self, pattern: &str) -> Result<Self> {
        let matcher = ProviderPattern::glob(pattern).map_err(|source| RegistryError::InvalidProvider {
            rule: self.name.clone(),
            source,
        })?;
        Ok(self.provider(matcher))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn renderer(&self) -> &RendererRef {
        &self.renderer
    }

    /// Provider gate first, then type OR wildcard OR extension membership.
    ///
    /// A rule carrying both a type and an extension filter is included when
    /// either one matches.
    #[must_use]
    pub fn matches(&self, resource: &ResourceDescriptor) -> bool {
        if let Some(provider) = &self.provider
            && !provider.matches(&resource.provider)
        {
            return false;
        }
        if self.media_type == Some(resource.media_type) {
            return true;
        }
        match &self.extensions {
            Some(ExtensionFilter::Any) => true,
            Some(filter) => filter.accepts(&resource.extension()),
            None => false,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if let Some(ExtensionFilter::Only(set)) = &self.extensions
            && let Some(bad) = set.iter().find(|e| e.is_empty() || e.starts_with('.'))
        {
            return Err(RegistryError::InvalidExtension {
                rule: self.name.clone(),
                extension: bad.clone(),
            });
        }
        Ok(())
    }
}

/// Immutable, ordered list of preview rules
///
/// Order is fixed at construction and decides the order of resolved bindings.
#[derive(Debug, Clone)]
pub struct Registry {
    rules: Arc<[PreviewRule]>,
}

impl Registry {
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// The stock rule set of the file browser
    #[must_use]
    pub fn builtin() -> Self {
        let rules = vec![
            PreviewRule::new("Markdown", RendererRef::fixed(Preview::Markdown)).media_type(MediaType::Text),
            PreviewRule::new("Text Editor", RendererRef::fixed(Preview::TextEditor)).media_type(MediaType::Text),
            PreviewRule::new("HTML render", RendererRef::fixed(Preview::Html)).extensions(["html"]),
            PreviewRule::new("Image", RendererRef::fixed(Preview::Image)).media_type(MediaType::Image),
            PreviewRule::new("Video", RendererRef::fixed(Preview::Video)).media_type(MediaType::Video),
            PreviewRule::new("Audio", RendererRef::fixed(Preview::Audio)).media_type(MediaType::Audio),
            PreviewRule::new("Ipa", RendererRef::new(|ctx| Preview::Ipa {
                install_url: ipa_install_url(ctx),
            }))
            .extensions(["ipa"]),
            PreviewRule::new("Plist", RendererRef::fixed(Preview::Plist)).extensions(["plist"]),
        ];
        Self { rules: rules.into() }
    }

    #[must_use]
    pub fn rules(&self) -> &[PreviewRule] {
        &self.rules
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules that apply to `resource`, in registry order
    pub fn matching<'a>(&'a self, resource: &'a ResourceDescriptor) -> impl Iterator<Item = &'a PreviewRule> + 'a {
        self.rules.iter().filter(move |rule| rule.matches(resource))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Collects rules and validates them once
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    rules: Vec<PreviewRule>,
}

impl RegistryBuilder {
    #[must_use]
    pub fn rule(mut self, rule: PreviewRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Freeze the collected rules
    ///
    /// # Errors
    ///
    /// Returns `RegistryError` for a rule with an empty name or a malformed
    /// extension entry.
    pub fn build(self) -> Result<Registry> {
        for rule in &self.rules {
            rule.validate()?;
        }
        Ok(Registry {
            rules: self.rules.into(),
        })
    }
}

/// Over-the-air install link for an iOS package
fn ipa_install_url(ctx: &PreviewContext<'_>) -> String {
    let once = urlencoding::encode(ctx.raw_url);
    format!(
        "itms-services://?action=download-manifest&url={}/i/{}/{}.plist",
        ctx.api_base,
        urlencoding::encode(&once),
        ctx.resource.base_name()
    )
}
