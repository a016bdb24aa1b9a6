use std::fmt;

use glob::Pattern as GlobPattern;
use regex::Regex;

use super::error::PatternError;

/// Anything that can decide whether a storage provider name is accepted
pub trait ProviderMatcher: fmt::Debug + Send + Sync {
    /// Test a provider identifier against this matcher
    fn matches(&self, provider: &str) -> bool;

    /// The pattern as written by whoever configured it
    fn original(&self) -> &str;
}

/// Provider pattern representation (exact name, regex, or glob)
#[derive(Debug, Clone)]
pub enum ProviderPattern {
    Exact(String),
    Regex { original: String, compiled: Regex },
    Glob { original: String, spec: GlobPattern },
}

impl ProviderPattern {
    /// Construct an exact-name provider pattern.
    ///
    /// # Errors
    /// Returns `PatternError::InvalidEmpty` if `name` is empty.
    pub fn exact(name: &str) -> Result<Self, PatternError> {
        if name.is_empty() {
            return Err(PatternError::InvalidEmpty);
        }
        Ok(Self::Exact(name.to_string()))
    }

    /// Construct a regex provider pattern. The regex is unanchored, so
    /// `"Alias"` accepts any provider whose name contains `Alias`.
    ///
    /// # Errors
    /// * Returns `PatternError::InvalidEmpty` if `p` is empty.
    /// * Returns `PatternError::InvalidRegex` if the regex fails to compile.
    pub fn regex(p: &str) -> Result<Self, PatternError> {
        if p.is_empty() {
            return Err(PatternError::InvalidEmpty);
        }
        Regex::new(p)
            .map(|r| Self::Regex {
                original: p.to_string(),
                compiled: r,
            })
            .map_err(|e| PatternError::regex_compile(p, &e.to_string()))
    }

    /// Construct a glob provider pattern.
    ///
    /// # Errors
    /// * Returns `PatternError::InvalidEmpty` if `p` is empty.
    /// * Returns `PatternError::InvalidGlob` if the glob specification is invalid.
    pub fn glob(p: &str) -> Result<Self, PatternError> {
        if p.is_empty() {
            return Err(PatternError::InvalidEmpty);
        }
        GlobPattern::new(p)
            .map(|g| Self::Glob {
                original: p.to_string(),
                spec: g,
            })
            .map_err(|e| PatternError::glob_parse(p, &e.to_string()))
    }
}

impl ProviderMatcher for ProviderPattern {
    fn matches(&self, provider: &str) -> bool {
        match self {
            Self::Exact(name) => name == provider,
            Self::Regex { compiled, .. } => compiled.is_match(provider),
            Self::Glob { spec, .. } => spec.matches(provider),
        }
    }

    fn original(&self) -> &str {
        match self {
            Self::Exact(name) => name,
            Self::Regex { original, .. } | Self::Glob { original, .. } => original,
        }
    }
}

impl PartialEq for ProviderPattern {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Exact(a), Self::Exact(b))
            | (Self::Regex { original: a, .. }, Self::Regex { original: b, .. })
            | (Self::Glob { original: a, .. }, Self::Glob { original: b, .. }) => a == b,
            _ => false,
        }
    }
}

impl Eq for ProviderPattern {}
