//! Title and main-text extraction from article pages.
//!
//! Extraction walks a fixed selector priority list and takes the text of
//! every element matching the first selector that matches anything. Pages
//! without any of those containers fall back to the text of all `<p>`
//! elements. Whitespace is collapsed at the end so downstream sentence and
//! word splitting sees clean text.

use std::sync::LazyLock;

use regex::Regex;

use crate::Result;
use crate::parse::Document;

/// Title candidates, first match wins.
pub const TITLE_SELECTORS: &[&str] = &["h1", "title", ".entry-title", ".post-title"];

/// Content containers, first selector with any match wins.
pub const CONTENT_SELECTORS: &[&str] = &[
    "article",
    ".post-content",
    ".entry-content",
    ".article-content",
    ".content",
    "main",
];

const FALLBACK_SELECTOR: &str = "p";

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Title and body text of one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedArticle {
    pub title: String,
    pub content: String,
}

impl ExtractedArticle {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Collapses every whitespace run to one space and trims the ends.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Extracts the article title, or an empty string when none is found.
pub fn extract_title(doc: &Document) -> Result<String> {
    for selector in TITLE_SELECTORS {
        if let Some(element) = doc.select_first(selector)? {
            return Ok(normalize_whitespace(&element.visible_text()));
        }
    }

    Ok(String::new())
}

/// Extracts the main article text, or an empty string when the page has none.
pub fn extract_content(doc: &Document) -> Result<String> {
    for selector in CONTENT_SELECTORS {
        let elements = doc.select(selector)?;
        if !elements.is_empty() {
            let joined = elements.iter().map(|el| el.visible_text()).collect::<Vec<_>>().join(" ");
            return Ok(normalize_whitespace(&joined));
        }
    }

    let paragraphs = doc.select(FALLBACK_SELECTOR)?;
    let joined = paragraphs.iter().map(|el| el.visible_text()).collect::<Vec<_>>().join(" ");
    Ok(normalize_whitespace(&joined))
}

/// Parses `html` and extracts its title and main text.
///
/// # Example
///
/// ```rust
/// use lexis_core::extract_article;
///
/// let html = "<html><body><h1>Hello</h1><article><p>Body  text.</p></article></body></html>";
/// let article = extract_article(html).unwrap();
/// assert_eq!(article.title, "Hello");
/// assert_eq!(article.content, "Body text.");
/// ```
pub fn extract_article(html: &str) -> Result<ExtractedArticle> {
    let doc = Document::parse(html);
    let title = extract_title(&doc)?;
    let content = extract_content(&doc)?;
    Ok(ExtractedArticle { title, content })
}
