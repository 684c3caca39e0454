//! Extraction output type.
//!
//! [`ExtractionResult`] is what the engine hands to the downstream generator.
//! Its ordering is part of the contract: `images[0]` is the most important
//! visual and `colors[0..2]` are the primary brand colors.

use serde::{Deserialize, Serialize};

use crate::formatters::{JsonConfig, PlainTextConfig, convert_to_json, convert_to_text};
use crate::images::ImageCandidate;
use crate::Result;

/// Output format options for an extraction result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON with camelCase keys.
    Json,
    /// Human-readable plain text summary.
    PlainText,
}

/// The complete summary of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Page title, or empty.
    pub title: String,

    /// Meta description, or empty.
    pub meta_description: String,

    /// Body snippets in document order (at most 30 by default).
    pub texts: Vec<String>,

    /// Ranked images (at most 12 by default).
    pub images: Vec<ImageCandidate>,

    /// Ranked `#rrggbb` colors (at most 5 by default).
    pub colors: Vec<String>,

    /// `scheme://host` of the source URL, or empty if it could not be derived.
    pub base_url: String,
}

impl ExtractionResult {
    /// Whether nothing at all was extracted.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.meta_description.is_empty()
            && self.texts.is_empty()
            && self.images.is_empty()
            && self.colors.is_empty()
    }

    /// The highest ranked image, if any.
    pub fn primary_image(&self) -> Option<&ImageCandidate> {
        self.images.first()
    }

    /// The two highest ranked colors.
    pub fn primary_colors(&self) -> &[String] {
        &self.colors[..self.colors.len().min(2)]
    }

    /// Converts the result to the specified format.
    pub fn to_format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => convert_to_json(self, &JsonConfig::default()),
            OutputFormat::PlainText => Ok(convert_to_text(self, &PlainTextConfig::default())),
        }
    }

    /// Gets the result as a `serde_json::Value`.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}
