//! Body copy collection.
//!
//! Snippets come from headings, paragraphs, list items and quotes in document
//! order. Anything that also appears as a link or list item inside the site
//! navigation is treated as chrome, and anything mentioning cookie banners or
//! newsletter prompts is treated as boilerplate.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::parse::{Node, collapse_whitespace};

/// Substrings that mark a snippet as legal or marketing filler
pub const BOILERPLATE_KEYWORDS: &[&str] = &[
    "cookie",
    "consent",
    "privacy",
    "newsletter",
    "subscribe",
    "datenschutz",
    "einwilligung",
    "abonnieren",
];

/// Containers whose links and list items are site chrome
const NAV_CONTAINERS: &[&str] = &["nav", "header", "footer"];

/// Elements inside a navigation container that form the exclusion set
const NAV_ITEMS: &[&str] = &["a", "li"];

/// Elements that can contribute snippets
const SNIPPET_TAGS: &[&str] = &["h1", "h2", "h3", "p", "li", "blockquote"];

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Configuration for snippet collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Minimum snippet length in characters after whitespace collapse
    pub min_length: usize,
    /// Maximum number of snippets returned
    pub max_snippets: usize,
    /// Lower-case substrings that reject a snippet
    pub boilerplate_keywords: Vec<String>,
    /// Tags whose subtrees hold navigation
    pub nav_containers: Vec<String>,
    /// Tags inside navigation containers collected into the exclusion set
    pub nav_items: Vec<String>,
    /// Tags walked for snippets
    pub snippet_tags: Vec<String>,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            min_length: 25,
            max_snippets: 30,
            boilerplate_keywords: to_strings(BOILERPLATE_KEYWORDS),
            nav_containers: to_strings(NAV_CONTAINERS),
            nav_items: to_strings(NAV_ITEMS),
            snippet_tags: to_strings(SNIPPET_TAGS),
        }
    }
}

/// Collect the normalized text of every link and list item inside navigation
/// containers.
pub fn navigation_exclusion_set<N: Node>(root: &N, config: &TextConfig) -> HashSet<String> {
    let containers: Vec<&str> = config.nav_containers.iter().map(String::as_str).collect();
    let items: Vec<&str> = config.nav_items.iter().map(String::as_str).collect();

    root.self_and_descendants_named(&containers)
        .iter()
        .flat_map(|container| container.descendants_named(&items))
        .map(|item| collapse_whitespace(&item.text()))
        .filter(|text| !text.is_empty())
        .collect()
}

/// Whether the lower-cased snippet contains a boilerplate keyword
pub fn is_boilerplate(text: &str, config: &TextConfig) -> bool {
    let lower = text.to_lowercase();
    config.boilerplate_keywords.iter().any(|kw| lower.contains(kw.as_str()))
}

/// Collect body snippets in document order.
///
/// Each candidate is dropped when it is shorter than `min_length`, appears in
/// the navigation exclusion set, was already emitted, or contains a
/// boilerplate keyword. At most `max_snippets` are returned.
pub fn extract_texts<N: Node>(root: &N, config: &TextConfig) -> Vec<String> {
    let excluded = navigation_exclusion_set(root, config);
    let tags: Vec<&str> = config.snippet_tags.iter().map(String::as_str).collect();

    let mut emitted: HashSet<String> = HashSet::new();
    let mut texts = Vec::new();

    for node in root.self_and_descendants_named(&tags) {
        if texts.len() >= config.max_snippets {
            break;
        }

        let text = collapse_whitespace(&node.text());

        if text.is_empty() || text.chars().count() < config.min_length {
            continue;
        }

        if excluded.contains(&text) {
            trace!(snippet = %text, "skipping navigation text");
            continue;
        }

        if emitted.contains(&text) {
            continue;
        }

        if is_boilerplate(&text, config) {
            trace!(snippet = %text, "skipping boilerplate");
            continue;
        }

        emitted.insert(text.clone());
        texts.push(text);
    }

    debug!(count = texts.len(), excluded = excluded.len(), "collected text snippets");
    texts
}
