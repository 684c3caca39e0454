//! HTML parsing and tree access.
//!
//! This module provides the [`Document`] and [`Element`] types backed by
//! `scraper`, and the [`Node`] trait that every extraction pass is written
//! against. The passes only ever see `Node`, so any tolerant parser can sit
//! behind them.
//!
//! # Example
//!
//! ```rust
//! use siteprint_core::parse::{Document, Node};
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <h1>Title</h1>
//!             <p class="content">Paragraph</p>
//!         </body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html);
//! let paragraphs = doc.root().descendants_named(&["p"]);
//! assert_eq!(paragraphs[0].text(), "Paragraph");
//! ```

use scraper::{ElementRef, Html, Selector};

use crate::{Result, SiteprintError};

/// Read-only view of one element in a parsed tree.
///
/// Implementors only need to provide the four accessors; the walking helpers
/// are derived from `children`.
pub trait Node: Sized + Clone {
    /// Lowercase tag name (e.g. `"div"`, `"img"`).
    fn tag_name(&self) -> &str;

    /// Value of an attribute, `None` if it is not present.
    fn attr(&self, name: &str) -> Option<&str>;

    /// Concatenation of all descendant text nodes.
    fn text(&self) -> String;

    /// Direct element children in document order.
    fn children(&self) -> Vec<Self>;

    /// All element descendants in document (pre-)order, excluding `self`.
    fn descendants(&self) -> Vec<Self> {
        let mut out = Vec::new();
        let mut stack: Vec<Self> = self.children().into_iter().rev().collect();

        while let Some(node) = stack.pop() {
            stack.extend(node.children().into_iter().rev());
            out.push(node);
        }

        out
    }

    /// Descendants whose tag name is one of `names`, in document order.
    fn descendants_named(&self, names: &[&str]) -> Vec<Self> {
        self.descendants()
            .into_iter()
            .filter(|node| names.contains(&node.tag_name()))
            .collect()
    }

    /// `self` followed by all of its descendants, in document order.
    fn self_and_descendants(&self) -> Vec<Self> {
        let mut out = vec![self.clone()];
        out.extend(self.descendants());
        out
    }

    /// Like [`Node::descendants_named`], but `self` is included when it matches.
    fn self_and_descendants_named(&self, names: &[&str]) -> Vec<Self> {
        self.self_and_descendants()
            .into_iter()
            .filter(|node| names.contains(&node.tag_name()))
            .collect()
    }
}

/// Represents a parsed HTML document.
///
/// Parsing never fails: html5ever recovers from unclosed tags, stray end tags
/// and other tag soup and always produces a tree.
///
/// # Example
///
/// ```rust
/// use siteprint_core::parse::{Document, Node};
///
/// let doc = Document::parse("<html><head><title>Test</title></head><body><p>Hello</p></body></html>");
/// assert_eq!(doc.root().descendants_named(&["title"])[0].text(), "Test");
/// ```
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Gets the underlying `scraper::Html`.
    pub fn html(&self) -> &Html {
        &self.html
    }

    /// Gets the root (`<html>`) element.
    pub fn root(&self) -> Element<'_> {
        Element { element: self.html.root_element() }
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`SiteprintError::HtmlParseError`] if the selector is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use siteprint_core::parse::Document;
    ///
    /// let doc = Document::parse(r#"<p class="content">First</p><p class="content">Second</p>"#);
    /// let elements = doc.select("p.content").unwrap();
    /// assert_eq!(elements.len(), 2);
    /// ```
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = Selector::parse(selector)
            .map_err(|e| SiteprintError::HtmlParseError(format!("Invalid selector: {}", e)))?;

        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }
}

/// A wrapper around scraper's `ElementRef` implementing [`Node`].
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> Node for Element<'a> {
    fn tag_name(&self) -> &str {
        self.element.value().name()
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.element.value().attr(name)
    }

    fn text(&self) -> String {
        self.element.text().collect()
    }

    fn children(&self) -> Vec<Self> {
        self.element
            .children()
            .filter_map(ElementRef::wrap)
            .map(|element| Element { element })
            .collect()
    }
}

/// Collapse every whitespace run to a single space and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
