//! Main extraction API.
//!
//! The entry point is [`Extractor`], along with the convenience function
//! [`extract`] that runs it with default settings.
//!
//! # Example
//!
//! ```rust
//! use siteprint_core::extract;
//!
//! let html = r#"
//!     <html>
//!         <head><title>Acme GmbH</title></head>
//!         <body><p>Massgefertigte Möbel aus der eigenen Werkstatt.</p></body>
//!     </html>
//! "#;
//!
//! let result = extract(html, "https://acme.ch/ueber-uns");
//! assert_eq!(result.title, "Acme GmbH");
//! assert_eq!(result.base_url, "https://acme.ch");
//! ```

use tracing::{debug, warn};

use crate::colors::extract_colors;
use crate::config::ExtractorConfig;
use crate::images::extract_images;
use crate::metadata::{PageMetadata, extract_page_metadata};
use crate::origin::Origin;
use crate::parse::{Document, Node};
use crate::summary::ExtractionResult;
use crate::text::extract_texts;

/// Condenses documents into an [`ExtractionResult`].
///
/// An `Extractor` only holds immutable configuration, so one instance can be
/// shared across threads and reused for any number of documents.
///
/// # Example
///
/// ```rust
/// use siteprint_core::{Extractor, ExtractorConfig};
///
/// let extractor = Extractor::with_config(ExtractorConfig::builder().max_images(4).build());
/// let result = extractor.extract("<p>Hello</p>", "https://example.com");
/// assert!(result.texts.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractorConfig,
}

impl Extractor {
    /// Creates a new Extractor with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new Extractor with a custom configuration.
    pub fn with_config(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Parses raw markup and extracts the summary.
    ///
    /// `source_url` is only used to derive the origin and resolve relative
    /// image references. This never fails: an unusable URL yields an empty
    /// `base_url`, and relative image sources are dropped.
    pub fn extract(&self, html: &str, source_url: &str) -> ExtractionResult {
        let doc = Document::parse(html);
        self.extract_document(&doc, source_url)
    }

    /// Extracts the summary from an already parsed document.
    pub fn extract_document(&self, doc: &Document, source_url: &str) -> ExtractionResult {
        self.extract_node(&doc.root(), source_url)
    }

    /// Extracts the summary from any tree implementing [`Node`].
    pub fn extract_node<N: Node>(&self, root: &N, source_url: &str) -> ExtractionResult {
        let origin = Origin::from_source(source_url);
        if !origin.is_resolvable() {
            warn!(source_url, "could not derive origin, relative images will be dropped");
        }

        let PageMetadata { title, description } = extract_page_metadata(root);
        let result = ExtractionResult {
            title,
            meta_description: description,
            texts: extract_texts(root, &self.config.text),
            images: extract_images(root, &origin, &self.config.images),
            colors: extract_colors(root, &self.config.colors),
            base_url: origin.base_url().to_string(),
        };

        debug!(
            texts = result.texts.len(),
            images = result.images.len(),
            colors = result.colors.len(),
            "extraction complete"
        );

        result
    }
}

/// Convenience function for one-liner extraction with defaults.
///
/// # Example
///
/// ```rust
/// use siteprint_core::extract;
///
/// let result = extract("<html></html>", "not a url");
/// assert!(result.is_empty());
/// assert_eq!(result.base_url, "");
/// ```
pub fn extract(html: &str, source_url: &str) -> ExtractionResult {
    Extractor::new().extract(html, source_url)
}
