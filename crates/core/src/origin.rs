//! Origin derivation and relative reference resolution.
//!
//! The base of every extraction is the page's origin (`scheme://host`), not
//! the page URL itself: relative references are joined against the origin.
//!
//! ```rust
//! use siteprint_core::origin::Origin;
//!
//! let origin = Origin::from_source("https://site.ch/about/team?lang=de");
//! assert_eq!(origin.base_url(), "https://site.ch");
//! assert_eq!(origin.resolve("/hero.jpg").as_deref(), Some("https://site.ch/hero.jpg"));
//! ```

use url::Url;

use crate::{Result, SiteprintError};

/// The origin of a source document.
///
/// An `Origin` built from an unusable URL is empty: [`Origin::base_url`]
/// returns `""` and only references that are absolute on their own resolve.
#[derive(Debug, Clone, Default)]
pub struct Origin {
    base: Option<Url>,
    base_url: String,
}

impl Origin {
    /// Derive the origin from a source URL.
    ///
    /// Any URL without a usable host gives the empty origin.
    pub fn from_source(source_url: &str) -> Self {
        Self::try_from_source(source_url).unwrap_or_default()
    }

    /// Derive the origin from a source URL, failing if it has no usable host.
    ///
    /// # Errors
    ///
    /// Returns [`SiteprintError::InvalidUrl`] if the URL does not parse or has
    /// no host (e.g. `mailto:` or relative references).
    pub fn try_from_source(source_url: &str) -> Result<Self> {
        let invalid = || SiteprintError::InvalidUrl(source_url.to_string());

        let parsed = Url::parse(source_url.trim()).map_err(|_| invalid())?;
        let host = parsed.host_str().filter(|h| !h.is_empty()).ok_or_else(invalid)?;

        let base_url = match parsed.port() {
            Some(port) => format!("{}://{}:{}", parsed.scheme(), host, port),
            None => format!("{}://{}", parsed.scheme(), host),
        };

        let base = Url::parse(&base_url).map_err(|_| invalid())?;
        Ok(Self { base: Some(base), base_url })
    }

    /// `scheme://host[:port]`, or an empty string when no origin could be derived.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether relative references can be joined against this origin.
    pub fn is_resolvable(&self) -> bool {
        self.base.is_some()
    }

    /// Resolve a possibly-relative reference to an absolute URL.
    ///
    /// References beginning with `http` are returned untouched. Everything
    /// else is joined against the origin; without one, only references that
    /// parse as absolute URLs by themselves (such as `data:` URLs) survive.
    pub fn resolve(&self, reference: &str) -> Option<String> {
        let reference = reference.trim();

        if reference.is_empty() {
            return None;
        }

        if reference.starts_with("http") {
            return Some(reference.to_string());
        }

        match &self.base {
            Some(base) => base.join(reference).ok().map(String::from),
            None => Url::parse(reference).ok().map(String::from),
        }
    }
}

/// Get the origin (`scheme://host`) of a URL, or an empty string.
pub fn base_origin(url: &str) -> String {
    Origin::from_source(url).base_url
}

/// Resolve `reference` against the origin of `base`.
pub fn resolve(reference: &str, base: &str) -> Option<String> {
    Origin::from_source(base).resolve(reference)
}
