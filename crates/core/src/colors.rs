use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::parse::Node;

/// `#` followed by exactly six hex digits, not part of a longer hex run
static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#[0-9a-fA-F]{6}\b").unwrap());

/// Configuration for brand color extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    /// Maximum number of colors returned
    pub max_colors: usize,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self { max_colors: 5 }
    }
}

/// Count hex color tokens across style sheets.
///
/// Returns `(color, count)` pairs in first-appearance order. Tokens are
/// counted exactly as written, so `#FFAA00` and `#ffaa00` are distinct.
pub fn count_colors<'a, I>(sheets: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for sheet in sheets {
        for token in HEX_COLOR.find_iter(sheet) {
            let color = token.as_str().to_string();
            match index.get(&color) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(color.clone(), counts.len());
                    counts.push((color, 1));
                }
            }
        }
    }

    counts
}

/// Rank colors by descending count, earlier first appearance winning ties
pub fn rank_colors(mut counts: Vec<(String, usize)>, max_colors: usize) -> Vec<String> {
    // stable: equal counts keep first-appearance order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().take(max_colors).map(|(color, _)| color).collect()
}

/// Extract the most frequent hex colors from every `<style>` block
pub fn extract_colors<N: Node>(root: &N, config: &ColorConfig) -> Vec<String> {
    let sheets: Vec<String> = root.self_and_descendants_named(&["style"]).iter().map(Node::text).collect();
    let counts = count_colors(sheets.iter().map(String::as_str));

    debug!(sheets = sheets.len(), distinct = counts.len(), "counted style colors");
    rank_colors(counts, config.max_colors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::Document;

    #[test]
    fn test_frequency_ordering() {
        let html = r#"
            <style>a { color: #445566; } .x { background: #112233; }</style>
            <style>h1 { color: #112233; border: 1px solid #112233; }</style>
        "#;
        let doc = Document::parse(html);
        let colors = extract_colors(&doc.root(), &ColorConfig::default());

        assert_eq!(colors, vec!["#112233".to_string(), "#445566".to_string()]);
    }

    #[test]
    fn test_ties_keep_first_appearance() {
        let counts = count_colors(["#aaaaaa #bbbbbb #cccccc #bbbbbb #cccccc"]);
        assert_eq!(rank_colors(counts, 5), vec!["#bbbbbb", "#cccccc", "#aaaaaa"]);
    }

    #[test]
    fn test_only_six_digit_tokens() {
        let counts = count_colors(["#fff; #12345; #1234567; #abcdef80; #A1B2C3;"]);
        assert_eq!(counts, vec![("#A1B2C3".to_string(), 1)]);
    }

    #[test]
    fn test_tokens_counted_as_written() {
        let counts = count_colors(["#FFAA00", "#ffaa00 #FFAA00"]);
        assert_eq!(counts, vec![("#FFAA00".to_string(), 2), ("#ffaa00".to_string(), 1)]);
    }

    #[test]
    fn test_mixed_case_tokens_rank_separately() {
        let html = r#"
            <style>body { color: #FFFFFF; } a { color: #112233; }</style>
            <style>h1 { color: #FFFFFF; } h2 { color: #112233; } p { color: #ffffff; }</style>
        "#;
        let doc = Document::parse(html);

        assert_eq!(
            extract_colors(&doc.root(), &ColorConfig::default()),
            vec!["#FFFFFF", "#112233", "#ffffff"]
        );
    }

    #[test]
    fn test_limited_to_max_colors() {
        let sheet = "#000001 #000002 #000003 #000004 #000005 #000006 #000007";
        let colors = rank_colors(count_colors([sheet]), 5);
        assert_eq!(colors, vec!["#000001", "#000002", "#000003", "#000004", "#000005"]);
    }

    #[test]
    fn test_ignores_inline_style_attributes() {
        let html = r##"<div style="color: #123456">x</div>"##;
        let doc = Document::parse(html);
        assert!(extract_colors(&doc.root(), &ColorConfig::default()).is_empty());
    }

    #[test]
    fn test_no_style_blocks() {
        let doc = Document::parse("<p>plain</p>");
        assert!(extract_colors(&doc.root(), &ColorConfig::default()).is_empty());
    }
}
