use crate::Result;
use crate::summary::ExtractionResult;

/// Configuration for JSON output
#[derive(Debug, Clone, Default)]
pub struct JsonConfig {
    /// Pretty print JSON output
    pub pretty: bool,
}

/// Convert an extraction result to JSON
pub fn convert_to_json(result: &ExtractionResult, config: &JsonConfig) -> Result<String> {
    if config.pretty {
        Ok(serde_json::to_string_pretty(result)?)
    } else {
        Ok(serde_json::to_string(result)?)
    }
}

/// JSON formatter with configurable options
pub struct JsonFormatter {
    config: JsonConfig,
}

impl JsonFormatter {
    pub fn new(config: JsonConfig) -> Self {
        Self { config }
    }

    pub fn convert(&self, result: &ExtractionResult) -> Result<String> {
        convert_to_json(result, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::ImageCandidate;

    fn sample() -> ExtractionResult {
        ExtractionResult {
            title: "Acme GmbH".to_string(),
            texts: vec!["Wir bauen Möbel nach Mass hier".to_string()],
            images: vec![ImageCandidate { src: "https://site.ch/hero.jpg".to_string(), alt: "main".to_string() }],
            colors: vec!["#112233".to_string()],
            base_url: "https://site.ch".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_compact_output() {
        let json = convert_to_json(&sample(), &JsonConfig::default()).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains(r#""metaDescription":"""#));
        assert!(json.contains(r#""images":[{"src":"https://site.ch/hero.jpg","alt":"main"}]"#));
    }

    #[test]
    fn test_pretty_output() {
        let json = convert_to_json(&sample(), &JsonConfig { pretty: true }).unwrap();
        assert!(json.contains('\n'));
        assert!(json.contains("  \"title\": \"Acme GmbH\""));
    }

    #[test]
    fn test_output_parses_back() {
        let json = JsonFormatter::new(JsonConfig::default()).convert(&sample()).unwrap();
        let parsed: ExtractionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sample());
    }
}
