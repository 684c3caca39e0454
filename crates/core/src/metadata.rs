use crate::parse::Node;

/// Meta tags probed for the page description, in priority order.
pub const DESCRIPTION_META_KEYS: [&str; 3] = ["description", "og:description", "twitter:description"];

/// Title and description of a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
}

/// Extract title with fallback:
/// 1. `<title>` element
/// 2. First `<h1>` element
///
/// Returns an empty string when neither yields non-empty text.
pub fn extract_title<N: Node>(root: &N) -> String {
    for tag in ["title", "h1"] {
        if let Some(first) = root.self_and_descendants_named(&[tag]).first() {
            let text = first.text();
            let text = text.trim();
            if !text.is_empty() {
                return text.to_string();
            }
        }
    }

    String::new()
}

/// Extract description from the first non-empty of:
/// 1. Meta `description`
/// 2. Open Graph `og:description`
/// 3. Twitter `twitter:description`
///
/// There is no body-text fallback.
pub fn extract_description<N: Node>(root: &N) -> String {
    let metas = root.self_and_descendants_named(&["meta"]);

    DESCRIPTION_META_KEYS
        .iter()
        .filter_map(|key| meta_content(&metas, key))
        .map(|content| content.trim().to_string())
        .find(|content| !content.is_empty())
        .unwrap_or_default()
}

/// Extract title and description in one call
pub fn extract_page_metadata<N: Node>(root: &N) -> PageMetadata {
    PageMetadata { title: extract_title(root), description: extract_description(root) }
}

/// Get meta tag content by `name`, falling back to `property`
pub(crate) fn meta_content<'n, N: Node>(metas: &'n [N], key: &str) -> Option<&'n str> {
    for attr in ["name", "property"] {
        if let Some(content) = metas
            .iter()
            .find(|meta| meta.attr(attr).is_some_and(|value| value.eq_ignore_ascii_case(key)))
            .and_then(|meta| meta.attr("content"))
        {
            return Some(content);
        }
    }

    None
}
