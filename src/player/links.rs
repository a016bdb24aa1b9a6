//! Deep links into third-party player apps

use serde::Serialize;

use super::error::{CatalogError, Result};

/// Raw URL, percent-encoded once
pub const URL_TOKEN: &str = "$url";
/// Raw URL, percent-encoded twice
pub const DOUBLE_ENCODED_URL_TOKEN: &str = "$e_url";
/// Display name, percent-encoded
pub const NAME_TOKEN: &str = "$name";

/// A third-party player reachable through a custom URI scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExternalPlayerScheme {
    /// Icon identifier the host uses to label the link
    pub icon: &'static str,
    /// URI template containing substitution tokens
    pub template: &'static str,
}

const BUILTIN_SCHEMES: &[ExternalPlayerScheme] = &[
    ExternalPlayerScheme { icon: "iina", template: "iina://weblink?url=$url" },
    ExternalPlayerScheme { icon: "potplayer", template: "potplayer://$e_url" },
    ExternalPlayerScheme { icon: "vlc", template: "vlc://$url" },
    ExternalPlayerScheme { icon: "nplayer", template: "nplayer-$url" },
    ExternalPlayerScheme {
        icon: "mxplayer",
        template: "intent:$url#Intent;package=com.mxtech.videoplayer.ad;S.title=$name;end",
    },
    ExternalPlayerScheme {
        icon: "mxplayer-pro",
        template: "intent:$url#Intent;package=com.mxtech.videoplayer.pro;S.title=$name;end",
    },
];

/// A ready-to-render deep link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalLink {
    pub icon: &'static str,
    pub href: String,
}

/// Immutable, validated list of external player schemes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerCatalog {
    schemes: Vec<ExternalPlayerScheme>,
}

impl PlayerCatalog {
    /// Validate and wrap a list of schemes
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` for an empty or duplicate icon, or a template
    /// that never inserts the resource URL.
    pub fn new(schemes: Vec<ExternalPlayerScheme>) -> Result<Self> {
        for (i, scheme) in schemes.iter().enumerate() {
            if scheme.icon.is_empty() {
                return Err(CatalogError::EmptyIcon);
            }
            if schemes[..i].iter().any(|s| s.icon == scheme.icon) {
                return Err(CatalogError::DuplicateIcon(scheme.icon.to_string()));
            }
            if !scheme.template.contains(URL_TOKEN) && !scheme.template.contains(DOUBLE_ENCODED_URL_TOKEN) {
                return Err(CatalogError::MissingUrlToken {
                    icon: scheme.icon.to_string(),
                    template: scheme.template.to_string(),
                });
            }
        }
        Ok(Self { schemes })
    }

    /// The compiled-in catalog of desktop and mobile players
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            schemes: BUILTIN_SCHEMES.to_vec(),
        }
    }

    #[must_use]
    pub fn schemes(&self) -> &[ExternalPlayerScheme] {
        &self.schemes
    }

    /// Build one link per scheme, in catalog order
    #[must_use]
    pub fn links(&self, raw_url: &str, name: &str) -> Vec<ExternalLink> {
        self.schemes
            .iter()
            .map(|scheme| ExternalLink {
                icon: scheme.icon,
                href: build_link(scheme, raw_url, name),
            })
            .collect()
    }
}

impl Default for PlayerCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Build the deep link for a single scheme
#[must_use]
pub fn build_link(scheme: &ExternalPlayerScheme, raw_url: &str, name: &str) -> String {
    substitute(scheme.template, raw_url, name)
}

/// Replace every `$e_url`, `$url` and `$name` token in `template`.
///
/// Tokens are matched literally, longest first, in one left-to-right pass so
/// inserted values are never scanned again. Any other `$` sequence is kept.
#[must_use]
pub fn substitute(template: &str, raw_url: &str, name: &str) -> String {
    let url = urlencoding::encode(raw_url);
    let e_url = urlencoding::encode(&url).into_owned();
    let name = urlencoding::encode(name);
    let table: [(&str, &str); 3] = [
        (DOUBLE_ENCODED_URL_TOKEN, e_url.as_str()),
        (NAME_TOKEN, &*name),
        (URL_TOKEN, &*url),
    ];

    let mut out = String::with_capacity(template.len() + e_url.len());
    let mut rest = template;
    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match table.iter().find(|(token, _)| tail.starts_with(token)) {
            Some((token, value)) => {
                out.push_str(value);
                rest = &tail[token.len()..];
            }
            None => {
                out.push('$');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheme(template: &'static str) -> ExternalPlayerScheme {
        ExternalPlayerScheme { icon: "test", template }
    }

    #[test]
    fn test_vlc_link() {
        let link = build_link(&scheme("vlc://$url"), "http://h/f.mp4", "f.mp4");
        assert_eq!(link, "vlc://http%3A%2F%2Fh%2Ff.mp4");
    }

    #[test]
    fn test_double_encoded_url() {
        let link = build_link(&scheme("potplayer://$e_url"), "http://h/f.mp4", "f.mp4");
        assert_eq!(link, "potplayer://http%253A%252F%252Fh%252Ff.mp4");
    }

    #[test]
    fn test_name_is_encoded() {
        let link = build_link(&scheme("x:$url;title=$name"), "http://h/a", "my movie.mp4");
        assert_eq!(link, "x:http%3A%2F%2Fh%2Fa;title=my%20movie.mp4");
    }

    #[test]
    fn test_all_occurrences_replaced() {
        assert_eq!(substitute("$url|$url", "a b", "n"), "a%20b|a%20b");
    }

    #[test]
    fn test_unknown_tokens_left_literal() {
        assert_eq!(substitute("$foo/$url/$", "u", "n"), "$foo/u/$");
        assert_eq!(substitute("$e_ur", "u", "n"), "$e_ur");
    }

    #[test]
    fn test_inserted_value_not_rescanned() {
        // '$' encodes to %24 so the name never reintroduces a token
        assert_eq!(substitute("$name", "u", "$url"), "%24url");
    }

    #[test]
    fn test_template_without_tokens_is_verbatim() {
        assert_eq!(substitute("https://static/viewer", "u", "n"), "https://static/viewer");
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let builtin = PlayerCatalog::builtin();
        assert_eq!(PlayerCatalog::new(builtin.schemes().to_vec()), Ok(builtin));
    }

    #[test]
    fn test_builtin_links_in_order() {
        let links = PlayerCatalog::builtin().links("http://h/f.mp4", "f.mp4");
        let icons: Vec<_> = links.iter().map(|l| l.icon).collect();
        assert_eq!(icons, ["iina", "potplayer", "vlc", "nplayer", "mxplayer", "mxplayer-pro"]);
        assert_eq!(links[0].href, "iina://weblink?url=http%3A%2F%2Fh%2Ff.mp4");
        assert_eq!(
            links[4].href,
            "intent:http%3A%2F%2Fh%2Ff.mp4#Intent;package=com.mxtech.videoplayer.ad;S.title=f.mp4;end"
        );
    }

    #[test]
    fn test_catalog_rejects_missing_url_token() {
        let err = PlayerCatalog::new(vec![scheme("static://player")]).unwrap_err();
        assert!(matches!(err, CatalogError::MissingUrlToken { .. }));
    }

    #[test]
    fn test_catalog_rejects_duplicate_icon() {
        let err = PlayerCatalog::new(vec![scheme("a://$url"), scheme("b://$url")]).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateIcon("test".to_string()));
    }

    #[test]
    fn test_catalog_rejects_empty_icon() {
        let s = ExternalPlayerScheme { icon: "", template: "a://$url" };
        assert_eq!(PlayerCatalog::new(vec![s]).unwrap_err(), CatalogError::EmptyIcon);
    }
}
