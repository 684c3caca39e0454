//! Image candidate collection and ranking.
//!
//! Candidates come from three places, in this order:
//!
//! 1. the `og:image` social preview (pinned first, never filtered)
//! 2. `<img>` elements, including common lazy-load attributes
//! 3. absolute `url(...)` references in inline `style` attributes
//!
//! `<img>` and background candidates must pass [`rejection`] before they are
//! accepted. The first accepted occurrence of a URL wins; later duplicates are
//! dropped regardless of source. URLs are compared in their parsed form, so
//! `https://Site.ch/a.jpg` and a relative `/a.jpg` on `site.ch` are the same
//! image, while the emitted `src` keeps the first occurrence as written.

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use url::Url;

use crate::metadata::meta_content;
use crate::origin::Origin;
use crate::parse::Node;

/// Attributes probed for an `<img>` source, in priority order
pub const SOURCE_ATTRIBUTES: &[&str] = &["src", "data-src", "data-lazy-src", "data-original"];

/// URL substrings that mark icons, trackers, social badges and UI glyphs
pub const SKIP_KEYWORDS: &[&str] = &[
    "icon",
    "sprite",
    "pixel",
    "tracking",
    "tracker",
    "analytics",
    "spacer",
    "blank",
    "facebook",
    "twitter",
    "instagram",
    "linkedin",
    "youtube",
    "pinterest",
    "whatsapp",
    "tiktok",
    "badge",
    "arrow",
    "button",
    "spinner",
    "loader",
    "placeholder",
    "emoji",
    "flag",
];

pub const REJECTED_EXTENSIONS: &[&str] = &[".svg", ".gif", ".ico"];

pub const ACCEPTED_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".webp"];

/// Path segments used by CMSs and asset pipelines for managed media
pub const CONTENT_PATH_KEYWORDS: &[&str] = &["upload", "media", "assets", "wp-content", "static", "files"];

/// Generic substrings naming an image
pub const IMAGE_KEYWORDS: &[&str] = &["image", "img", "photo", "picture", "foto", "bild"];

/// Substrings that suggest primary marketing imagery
pub const PRIORITY_KEYWORDS: &[&str] = &[
    "hero",
    "banner",
    "header",
    "product",
    "team",
    "gallery",
    "slider",
    "cover",
    "featured",
    "about",
    "portfolio",
    "service",
    "project",
    "projekt",
];

static BACKGROUND_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)url\(\s*['"]?(https?://[^'")\s]+)['"]?\s*\)"#).unwrap());

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Configuration for image collection and scoring.
///
/// Keyword lists are matched against lower-cased URLs and alt text, so they
/// must be lower-case themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub source_attributes: Vec<String>,
    pub skip_keywords: Vec<String>,
    pub rejected_extensions: Vec<String>,
    pub accepted_extensions: Vec<String>,
    pub content_path_keywords: Vec<String>,
    pub image_keywords: Vec<String>,
    pub priority_keywords: Vec<String>,
    /// Declared width/height below this rejects an `<img>`
    pub min_dimension: i64,
    /// Maximum number of images returned
    pub max_images: usize,
    /// Fixed score of the `og:image` candidate
    pub social_preview_score: i32,
    /// Fixed score of inline background candidates
    pub background_score: i32,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            source_attributes: to_strings(SOURCE_ATTRIBUTES),
            skip_keywords: to_strings(SKIP_KEYWORDS),
            rejected_extensions: to_strings(REJECTED_EXTENSIONS),
            accepted_extensions: to_strings(ACCEPTED_EXTENSIONS),
            content_path_keywords: to_strings(CONTENT_PATH_KEYWORDS),
            image_keywords: to_strings(IMAGE_KEYWORDS),
            priority_keywords: to_strings(PRIORITY_KEYWORDS),
            min_dimension: 150,
            max_images: 12,
            social_preview_score: 10,
            background_score: 1,
        }
    }
}

/// An image reference exposed in the extraction result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageCandidate {
    /// Absolute URL
    pub src: String,
    /// Alt text (`"main"` for the social preview image)
    pub alt: String,
}

/// A candidate during ranking
#[derive(Debug, Clone)]
pub(crate) struct ScoredImage {
    candidate: ImageCandidate,
    score: i32,
    /// Collection order, used as the tie-break
    sequence: usize,
    /// Sorted ahead of every unpinned candidate
    pinned: bool,
}

/// Why a candidate failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    SkipKeyword,
    Extension,
    NonImageDataUrl,
    TooSmall,
    NotAnImage,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Rejection::SkipKeyword => "skip keyword",
            Rejection::Extension => "rejected extension",
            Rejection::NonImageDataUrl => "non-image data URL",
            Rejection::TooSmall => "declared size too small",
            Rejection::NotAnImage => "no image signal",
        };
        f.write_str(reason)
    }
}

fn contains_any(haystack: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|kw| haystack.contains(kw.as_str()))
}

fn ends_with_any(haystack: &str, suffixes: &[String]) -> bool {
    suffixes.iter().any(|suffix| haystack.ends_with(suffix.as_str()))
}

/// Whether a declared dimension is below the minimum. Unparseable values never are.
fn below_min_dimension(value: Option<&str>, min: i64) -> bool {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .is_some_and(|v| v < min)
}

/// Validate an `<img>` or background candidate.
///
/// Returns `None` when the candidate is acceptable, otherwise the first rule
/// it broke.
pub fn rejection(url: &str, width: Option<&str>, height: Option<&str>, config: &ImageConfig) -> Option<Rejection> {
    let lower = url.to_lowercase();

    if contains_any(&lower, &config.skip_keywords) {
        return Some(Rejection::SkipKeyword);
    }

    if ends_with_any(&lower, &config.rejected_extensions) {
        return Some(Rejection::Extension);
    }

    if lower.starts_with("data:") && !lower.starts_with("data:image/") {
        return Some(Rejection::NonImageDataUrl);
    }

    if below_min_dimension(width, config.min_dimension) || below_min_dimension(height, config.min_dimension) {
        return Some(Rejection::TooSmall);
    }

    if ends_with_any(&lower, &config.accepted_extensions)
        || contains_any(&lower, &config.content_path_keywords)
        || contains_any(&lower, &config.image_keywords)
    {
        None
    } else {
        Some(Rejection::NotAnImage)
    }
}

/// Priority score of an `<img>` candidate.
///
/// - +2 for each priority keyword in the URL, +2 for each in the alt text
/// - +1 if the alt text is longer than 3 characters
/// - +1 if the URL contains a content-path keyword
pub fn score(url: &str, alt: &str, config: &ImageConfig) -> i32 {
    let url = url.to_lowercase();
    let alt = alt.trim().to_lowercase();
    let mut score = 0;

    for keyword in &config.priority_keywords {
        if url.contains(keyword.as_str()) {
            score += 2;
        }
        if alt.contains(keyword.as_str()) {
            score += 2;
        }
    }

    if alt.chars().count() > 3 {
        score += 1;
    }

    if contains_any(&url, &config.content_path_keywords) {
        score += 1;
    }

    score
}

/// First non-empty source attribute of an `<img>`
pub fn image_source<'n, N: Node>(img: &'n N, config: &ImageConfig) -> Option<&'n str> {
    config
        .source_attributes
        .iter()
        .filter_map(|attr| img.attr(attr))
        .map(str::trim)
        .find(|value| !value.is_empty())
}

/// Absolute `http(s)` URLs referenced by `url(...)` in a style attribute
pub fn background_urls(style: &str) -> Vec<&str> {
    BACKGROUND_URL
        .captures_iter(style)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Normalized form of a URL for duplicate detection
fn dedup_key(src: &str) -> String {
    Url::parse(src).map(String::from).unwrap_or_else(|_| src.to_string())
}

/// Accumulates accepted candidates with global URL dedup
struct Collector {
    accepted: Vec<ScoredImage>,
    seen: HashSet<String>,
}

impl Collector {
    fn new() -> Self {
        Self { accepted: Vec::new(), seen: HashSet::new() }
    }

    fn push(&mut self, candidate: ImageCandidate, score: i32, pinned: bool) {
        if !self.seen.insert(dedup_key(&candidate.src)) {
            trace!(src = %candidate.src, "skipping duplicate image");
            return;
        }

        let sequence = self.accepted.len();
        self.accepted.push(ScoredImage { candidate, score, sequence, pinned });
    }

    fn into_ranked(mut self, max_images: usize) -> Vec<ImageCandidate> {
        self.accepted.sort_by(|a, b| {
            b.pinned
                .cmp(&a.pinned)
                .then_with(|| b.score.cmp(&a.score))
                .then_with(|| a.sequence.cmp(&b.sequence))
        });

        self.accepted
            .into_iter()
            .take(max_images)
            .map(|scored| scored.candidate)
            .collect()
    }
}

/// Collect, validate, deduplicate and rank image candidates.
pub fn extract_images<N: Node>(root: &N, origin: &Origin, config: &ImageConfig) -> Vec<ImageCandidate> {
    let mut collector = Collector::new();
    let nodes = root.self_and_descendants();

    let metas: Vec<N> = nodes.iter().filter(|n| n.tag_name() == "meta").cloned().collect();
    if let Some(content) = meta_content(&metas, "og:image") {
        match origin.resolve(content) {
            Some(src) => collector.push(
                ImageCandidate { src, alt: "main".to_string() },
                config.social_preview_score,
                true,
            ),
            None => debug!(content = content.trim(), "could not resolve og:image"),
        }
    }

    for img in nodes.iter().filter(|n| n.tag_name() == "img") {
        let Some(source) = image_source(img, config) else {
            continue;
        };

        let Some(src) = origin.resolve(source) else {
            trace!(source, "dropping unresolvable image source");
            continue;
        };

        if let Some(reason) = rejection(&src, img.attr("width"), img.attr("height"), config) {
            trace!(src = %src, %reason, "rejecting image");
            continue;
        }

        let alt = img.attr("alt").unwrap_or_default().trim().to_string();
        let priority = score(&src, &alt, config);
        collector.push(ImageCandidate { src, alt }, priority, false);
    }

    for node in &nodes {
        let Some(style) = node.attr("style") else {
            continue;
        };

        for url in background_urls(style) {
            if let Some(reason) = rejection(url, None, None, config) {
                trace!(src = url, %reason, "rejecting background image");
                continue;
            }

            collector.push(
                ImageCandidate { src: url.to_string(), alt: String::new() },
                config.background_score,
                false,
            );
        }
    }

    debug!(accepted = collector.accepted.len(), "collected image candidates");
    collector.into_ranked(config.max_images)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::Document;
    use rstest::rstest;

    fn run(html: &str, source_url: &str) -> Vec<ImageCandidate> {
        let doc = Document::parse(html);
        extract_images(&doc.root(), &Origin::from_source(source_url), &ImageConfig::default())
    }

    fn srcs(images: &[ImageCandidate]) -> Vec<&str> {
        images.iter().map(|i| i.src.as_str()).collect()
    }

    #[rstest]
    #[case("https://site.ch/icon-star.png", Some(Rejection::SkipKeyword))]
    #[case("https://site.ch/img/facebook-share.jpg", Some(Rejection::SkipKeyword))]
    #[case("https://site.ch/Favicon.PNG", Some(Rejection::SkipKeyword))]
    #[case("https://site.ch/uploads/animation.gif", Some(Rejection::Extension))]
    #[case("https://site.ch/media/shape.SVG", Some(Rejection::Extension))]
    #[case("data:text/html;base64,PGgxPg==", Some(Rejection::NonImageDataUrl))]
    #[case("https://site.ch/download?id=4", Some(Rejection::NotAnImage))]
    #[case("https://site.ch/werkstatt.jpg", None)]
    #[case("https://site.ch/werkstatt.JPEG", None)]
    #[case("https://site.ch/werkstatt.webp", None)]
    #[case("https://cdn.site.ch/uploads/2024/05/werkstatt", None)]
    #[case("https://site.ch/render?type=photo", None)]
    #[case("data:image/png;base64,iVBORw0KGgo=", None)]
    fn test_rejection_rules(#[case] url: &str, #[case] expected: Option<Rejection>) {
        assert_eq!(rejection(url, None, None, &ImageConfig::default()), expected);
    }

    #[rstest]
    #[case(Some("100"), None, Some(Rejection::TooSmall))]
    #[case(None, Some("149"), Some(Rejection::TooSmall))]
    #[case(Some(" 80 "), Some("800"), Some(Rejection::TooSmall))]
    #[case(Some("150"), Some("150"), None)]
    #[case(Some("100px"), None, None)]
    #[case(Some("auto"), Some("50%"), None)]
    #[case(Some(""), None, None)]
    fn test_size_hints(#[case] width: Option<&str>, #[case] height: Option<&str>, #[case] expected: Option<Rejection>) {
        let config = ImageConfig::default();
        assert_eq!(rejection("https://site.ch/werkstatt.jpg", width, height, &config), expected);
    }

    #[test]
    fn test_score_keywords_in_url_and_alt_count_separately() {
        let config = ImageConfig::default();

        assert_eq!(score("https://site.ch/a.jpg", "", &config), 0);
        assert_eq!(score("https://site.ch/hero.jpg", "", &config), 2);
        assert_eq!(score("https://site.ch/hero.jpg", "Hero", &config), 2 + 2 + 1);
        assert_eq!(score("https://site.ch/uploads/team-hero.jpg", "", &config), 2 + 2 + 1);
        assert_eq!(score("https://site.ch/a.jpg", "Unser Team", &config), 2 + 1);
    }

    #[test]
    fn test_score_alt_length_threshold() {
        let config = ImageConfig::default();

        assert_eq!(score("https://site.ch/a.jpg", "abc", &config), 0);
        assert_eq!(score("https://site.ch/a.jpg", "abcd", &config), 1);
        assert_eq!(score("https://site.ch/a.jpg", "   abc   ", &config), 0);
    }

    #[test]
    fn test_background_urls() {
        let style = r#"background-image: url("https://cdn.site.ch/a.jpg"), url('http://x.ch/b.png'); background: URL( https://y.ch/c.webp )"#;
        assert_eq!(
            background_urls(style),
            vec!["https://cdn.site.ch/a.jpg", "http://x.ch/b.png", "https://y.ch/c.webp"]
        );
        assert!(background_urls("background: url(/relative.jpg)").is_empty());
        assert!(background_urls("color: red").is_empty());
    }

    #[test]
    fn test_social_preview_pinned_first() {
        let html = r#"
            <head><meta property="og:image" content="/hero.jpg"></head>
            <body>
                <img src="icon-star.png">
                <img src="/uploads/team-hero-banner-gallery.jpg" alt="Team hero banner gallery">
            </body>
        "#;
        let images = run(html, "https://site.ch");

        assert_eq!(images[0], ImageCandidate { src: "https://site.ch/hero.jpg".to_string(), alt: "main".to_string() });
        assert_eq!(srcs(&images), vec!["https://site.ch/hero.jpg", "https://site.ch/uploads/team-hero-banner-gallery.jpg"]);
    }

    #[test]
    fn test_lazy_load_attributes_and_dedup() {
        let html = r#"
            <img src="" data-src="/media/werkstatt.jpg" alt="Werkstatt">
            <img data-lazy-src="https://site.ch/media/werkstatt.jpg">
            <img data-original="/media/kueche.jpg">
            <img alt="no source at all">
        "#;
        let images = run(html, "https://site.ch/de/");

        assert_eq!(srcs(&images), vec!["https://site.ch/media/werkstatt.jpg", "https://site.ch/media/kueche.jpg"]);
        assert_eq!(images[0].alt, "Werkstatt");
    }

    #[test]
    fn test_og_image_deduplicates_later_img() {
        let html = r#"
            <meta property="og:image" content="https://site.ch/hero.jpg">
            <img src="/hero.jpg" alt="Hero image">
        "#;
        let images = run(html, "https://site.ch");

        assert_eq!(images.len(), 1);
        assert_eq!(images[0].alt, "main");
    }

    #[test]
    fn test_root_element_style_is_scanned() {
        let html = r#"
            <html style="background-image: url(https://site.ch/uploads/root.jpg)">
            <body><div style="background: url(https://site.ch/uploads/div.jpg)"></div></body>
            </html>
        "#;
        let images = run(html, "https://site.ch");

        assert_eq!(
            srcs(&images),
            vec!["https://site.ch/uploads/root.jpg", "https://site.ch/uploads/div.jpg"]
        );
    }

    #[test]
    fn test_extract_from_img_root() {
        let doc = Document::parse(r#"<img src="/uploads/team.jpg" alt="Team">"#);
        let img = doc.root().descendants_named(&["img"]).remove(0);
        let images = extract_images(&img, &Origin::from_source("https://site.ch"), &ImageConfig::default());

        assert_eq!(srcs(&images), vec!["https://site.ch/uploads/team.jpg"]);
    }

    #[test]
    fn test_absolute_and_relative_forms_deduplicate() {
        let html = r#"
            <img src="https://Site.ch/uploads/a.jpg" alt="Erstes">
            <img src="/uploads/a.jpg" alt="Zweites">
            <div style="background: url(https://site.ch:443/uploads/a.jpg)"></div>
        "#;
        let images = run(html, "https://site.ch");

        assert_eq!(srcs(&images), vec!["https://Site.ch/uploads/a.jpg"]);
        assert_eq!(images[0].alt, "Erstes");
    }

    #[test]
    fn test_rejected_duplicate_does_not_block_later_valid_one() {
        let html = r#"
            <img src="/uploads/a.jpg" width="40">
            <img src="/uploads/a.jpg" width="600">
        "#;
        let images = run(html, "https://site.ch");

        assert_eq!(srcs(&images), vec!["https://site.ch/uploads/a.jpg"]);
    }

    #[test]
    fn test_ranking_is_stable_on_ties() {
        let html = r#"
            <div style="background-image: url(https://site.ch/bg-one.jpg)"></div>
            <img src="/a.jpg">
            <img src="/b.jpg">
            <img src="/product-c.jpg">
            <section style="background: url('https://site.ch/bg-two.png')"></section>
        "#;
        let images = run(html, "https://site.ch");

        assert_eq!(
            srcs(&images),
            vec![
                "https://site.ch/product-c.jpg",
                "https://site.ch/bg-one.jpg",
                "https://site.ch/bg-two.png",
                "https://site.ch/a.jpg",
                "https://site.ch/b.jpg",
            ]
        );
    }

    #[test]
    fn test_relative_sources_dropped_without_origin() {
        let html = r#"
            <meta property="og:image" content="/hero.jpg">
            <img src="/uploads/relative.jpg">
            <img src="https://cdn.site.ch/uploads/absolute.jpg">
        "#;
        let images = run(html, "not a url");

        assert_eq!(srcs(&images), vec!["https://cdn.site.ch/uploads/absolute.jpg"]);
    }

    #[test]
    fn test_truncated_to_max_images() {
        let html: String = (0..20).map(|i| format!(r#"<img src="/uploads/{}.jpg">"#, i)).collect();
        let images = run(&html, "https://site.ch");

        assert_eq!(images.len(), 12);
        assert_eq!(images[0].src, "https://site.ch/uploads/0.jpg");
        assert_eq!(images[11].src, "https://site.ch/uploads/11.jpg");
    }
}
