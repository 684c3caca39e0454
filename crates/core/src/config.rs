//! Extractor configuration.
//!
//! Every keyword list and limit the passes use lives here, so callers can
//! swap in their own lists at construction time. Configuration can be built
//! in code with [`ExtractorConfig::builder`] or loaded from a JSON file in
//! which any subset of fields may be given.
//!
//! # Example
//!
//! ```rust
//! use siteprint_core::ExtractorConfig;
//!
//! let config = ExtractorConfig::builder()
//!     .max_texts(10)
//!     .max_images(4)
//!     .build();
//! assert_eq!(config.text.max_snippets, 10);
//!
//! let config = ExtractorConfig::from_json(r#"{ "colors": { "max_colors": 3 } }"#).unwrap();
//! assert_eq!(config.colors.max_colors, 3);
//! assert_eq!(config.images.max_images, 12);
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::colors::ColorConfig;
use crate::images::ImageConfig;
use crate::text::TextConfig;
use crate::{Result, SiteprintError};

/// Configuration for all extraction passes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Snippet collection settings.
    pub text: TextConfig,

    /// Image collection and ranking settings.
    pub images: ImageConfig,

    /// Color extraction settings.
    pub colors: ColorConfig,
}

impl ExtractorConfig {
    /// Creates a new builder for ExtractorConfig.
    pub fn builder() -> ExtractorConfigBuilder {
        ExtractorConfigBuilder::new()
    }

    /// Decodes a configuration from JSON. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SiteprintError::ConfigError`] if the JSON is malformed or a
    /// field has the wrong type.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SiteprintError::ConfigError(e.to_string()))
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`SiteprintError::FileNotFound`] if the file does not exist and
    /// [`SiteprintError::ConfigError`] if it cannot be decoded.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SiteprintError::FileNotFound(path.to_path_buf()));
        }

        let contents = fs::read_to_string(path)?;
        let config = Self::from_json(&contents)?;
        debug!(path = %path.display(), "loaded extractor config");
        Ok(config)
    }

    /// Default configuration file location (`~/.config/siteprint/config.json`).
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("siteprint").join("config.json"))
    }

    /// Loads the default configuration file if it exists, otherwise the
    /// built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SiteprintError::ConfigError`] if the file exists but cannot be decoded.
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }
}

/// Builder for ExtractorConfig.
///
/// # Example
///
/// ```rust
/// use siteprint_core::ExtractorConfig;
///
/// let config = ExtractorConfig::builder()
///     .min_text_length(40)
///     .boilerplate_keywords(vec!["cookie".to_string(), "agb".to_string()])
///     .max_colors(3)
///     .build();
/// ```
pub struct ExtractorConfigBuilder {
    config: ExtractorConfig,
}

impl ExtractorConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: ExtractorConfig::default() }
    }

    /// Sets the minimum snippet length in characters.
    pub fn min_text_length(mut self, value: usize) -> Self {
        self.config.text.min_length = value;
        self
    }

    /// Sets the maximum number of snippets.
    pub fn max_texts(mut self, value: usize) -> Self {
        self.config.text.max_snippets = value;
        self
    }

    /// Replaces the boilerplate keyword list.
    pub fn boilerplate_keywords(mut self, value: Vec<String>) -> Self {
        self.config.text.boilerplate_keywords = value;
        self
    }

    /// Sets the maximum number of images.
    pub fn max_images(mut self, value: usize) -> Self {
        self.config.images.max_images = value;
        self
    }

    /// Sets the minimum declared image width/height.
    pub fn min_image_dimension(mut self, value: i64) -> Self {
        self.config.images.min_dimension = value;
        self
    }

    /// Replaces the image skip keyword list.
    pub fn skip_keywords(mut self, value: Vec<String>) -> Self {
        self.config.images.skip_keywords = value;
        self
    }

    /// Replaces the image priority keyword list.
    pub fn priority_keywords(mut self, value: Vec<String>) -> Self {
        self.config.images.priority_keywords = value;
        self
    }

    /// Sets the maximum number of colors.
    pub fn max_colors(mut self, value: usize) -> Self {
        self.config.colors.max_colors = value;
        self
    }

    /// Replaces the whole snippet configuration.
    pub fn text(mut self, value: TextConfig) -> Self {
        self.config.text = value;
        self
    }

    /// Replaces the whole image configuration.
    pub fn images(mut self, value: ImageConfig) -> Self {
        self.config.images = value;
        self
    }

    /// Builds the config.
    pub fn build(self) -> ExtractorConfig {
        self.config
    }
}

impl Default for ExtractorConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
