pub mod colors;
pub mod config;
pub mod error;
pub mod extract;
pub mod formatters;
pub mod images;
pub mod metadata;
pub mod origin;
pub mod parse;
pub mod summary;
pub mod text;

pub use colors::{ColorConfig, extract_colors};
pub use config::{ExtractorConfig, ExtractorConfigBuilder};
pub use error::{Result, SiteprintError};
pub use extract::{Extractor, extract};
pub use formatters::{JsonConfig, JsonFormatter, PlainTextConfig, TextFormatter, convert_to_json, convert_to_text};
pub use images::{ImageCandidate, ImageConfig, extract_images};
pub use metadata::{PageMetadata, extract_description, extract_page_metadata, extract_title};
pub use origin::{Origin, base_origin, resolve};
pub use parse::{Document, Element, Node};
pub use summary::{ExtractionResult, OutputFormat};
pub use text::{TextConfig, extract_texts};
