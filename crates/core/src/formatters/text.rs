use crate::summary::ExtractionResult;

/// Configuration for plain text output
#[derive(Debug, Clone)]
pub struct PlainTextConfig {
    /// Include title, description and source header
    pub include_header: bool,

    /// Wrap snippets at specified width (0 = no wrapping)
    pub line_width: usize,
}

impl Default for PlainTextConfig {
    fn default() -> Self {
        Self { include_header: true, line_width: 0 }
    }
}

/// Plain text formatter for a human-readable summary
pub struct TextFormatter {
    config: PlainTextConfig,
}

impl TextFormatter {
    pub fn new(config: PlainTextConfig) -> Self {
        Self { config }
    }

    pub fn convert(&self, result: &ExtractionResult) -> String {
        convert_to_text(result, &self.config)
    }
}

/// Render an extraction result as plain text
pub fn convert_to_text(result: &ExtractionResult, config: &PlainTextConfig) -> String {
    let mut output = String::new();

    if config.include_header {
        output.push_str(&generate_header(result));
        output.push('\n');
    }

    if !result.texts.is_empty() {
        output.push_str("Texts\n");
        for (i, text) in result.texts.iter().enumerate() {
            let body = if config.line_width > 0 {
                indent(&wrap_text(text, config.line_width), "     ")
            } else {
                text.clone()
            };
            output.push_str(&format!("{:>3}. {}\n", i + 1, body));
        }
        output.push('\n');
    }

    if !result.images.is_empty() {
        output.push_str("Images\n");
        for (i, image) in result.images.iter().enumerate() {
            if image.alt.is_empty() {
                output.push_str(&format!("{:>3}. {}\n", i + 1, image.src));
            } else {
                output.push_str(&format!("{:>3}. {} ({})\n", i + 1, image.src, image.alt));
            }
        }
        output.push('\n');
    }

    if !result.colors.is_empty() {
        output.push_str(&format!("Colors\n  {}\n", result.colors.join(", ")));
    }

    output.trim().to_string()
}

/// Generate a header from title, description and origin
fn generate_header(result: &ExtractionResult) -> String {
    let mut header = String::new();

    if !result.title.is_empty() {
        header.push_str(&result.title);
        header.push('\n');
        header.push_str(&"=".repeat(result.title.chars().count()));
        header.push('\n');
    }

    if !result.meta_description.is_empty() {
        header.push_str(&result.meta_description);
        header.push('\n');
    }

    if !result.base_url.is_empty() {
        header.push_str(&format!("Source: {}\n", result.base_url));
    }

    header
}

/// Indent every line after the first
fn indent(text: &str, prefix: &str) -> String {
    text.lines().collect::<Vec<_>>().join(&format!("\n{}", prefix))
}

/// Wrap text to specified line width
fn wrap_text(text: &str, width: usize) -> String {
    if width == 0 {
        return text.to_string();
    }

    let mut lines = Vec::new();
    let mut current_line = Vec::new();
    let mut current_length = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if current_length == 0 {
            current_line.push(word);
            current_length = word_len;
        } else if current_length + 1 + word_len <= width {
            current_length += 1 + word_len;
            current_line.push(word);
        } else {
            lines.push(current_line.join(" "));
            current_line = vec![word];
            current_length = word_len;
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line.join(" "));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::ImageCandidate;

    fn sample() -> ExtractionResult {
        ExtractionResult {
            title: "Acme GmbH".to_string(),
            meta_description: "Schreinerei in Zürich".to_string(),
            texts: vec![
                "Wir bauen Möbel nach Mass hier".to_string(),
                "Handwerk mit Leidenschaft seit 1921".to_string(),
            ],
            images: vec![
                ImageCandidate { src: "https://site.ch/hero.jpg".to_string(), alt: "main".to_string() },
                ImageCandidate { src: "https://site.ch/bg.jpg".to_string(), alt: String::new() },
            ],
            colors: vec!["#112233".to_string(), "#445566".to_string()],
            base_url: "https://site.ch".to_string(),
        }
    }

    #[test]
    fn test_generate_header() {
        let header = generate_header(&sample());
        assert!(header.starts_with("Acme GmbH\n=========\n"));
        assert!(header.contains("Schreinerei in Zürich"));
        assert!(header.contains("Source: https://site.ch"));
    }

    #[test]
    fn test_convert_to_text_sections() {
        let text = convert_to_text(&sample(), &PlainTextConfig::default());

        assert!(text.contains("  1. Wir bauen Möbel nach Mass hier"));
        assert!(text.contains("  2. Handwerk mit Leidenschaft seit 1921"));
        assert!(text.contains("  1. https://site.ch/hero.jpg (main)"));
        assert!(text.contains("  2. https://site.ch/bg.jpg\n"));
        assert!(text.ends_with("#112233, #445566"));
    }

    #[test]
    fn test_convert_to_text_without_header() {
        let config = PlainTextConfig { include_header: false, ..Default::default() };
        let text = convert_to_text(&sample(), &config);

        assert!(text.starts_with("Texts"));
        assert!(!text.contains("Source:"));
    }

    #[test]
    fn test_empty_result() {
        let text = convert_to_text(&ExtractionResult::default(), &PlainTextConfig::default());
        assert!(text.is_empty());
    }

    #[test]
    fn test_wrap_text_with_narrow_width() {
        let wrapped = wrap_text("This is a long line that should be wrapped at a smaller width", 20);
        assert!(wrapped.lines().all(|line| line.chars().count() <= 20));
        assert!(wrapped.contains('\n'));
    }

    #[test]
    fn test_wrap_text_with_zero_width() {
        assert_eq!(wrap_text("This is a line", 0), "This is a line");
    }

    #[test]
    fn test_text_formatter_wraps_snippets() {
        let formatter = TextFormatter::new(PlainTextConfig { include_header: false, line_width: 12 });
        let text = formatter.convert(&sample());

        assert!(text.contains("  1. Wir bauen\n     Möbel nach\n     Mass hier"));
    }
}
