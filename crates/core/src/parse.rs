//! HTML parsing and DOM querying.
//!
//! This module provides the [`Document`] and [`Element`] types, thin
//! wrappers over `scraper` that the article extractor queries with CSS
//! selectors.
//!
//! # Example
//!
//! ```rust
//! use lexis_core::parse::Document;
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
//! let paragraphs = doc.select("p.content").unwrap();
//! assert_eq!(paragraphs[0].visible_text(), "Paragraph");
//! ```

use scraper::{Html, Selector};

use crate::{LexisError, Result};

/// Elements whose text never counts as article text.
const INVISIBLE_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Represents a parsed HTML document.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// Parsing is lenient: malformed markup still yields a document.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`LexisError::HtmlParseError`] if the selector is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lexis_core::parse::Document;
    ///
    /// let html = r#"<p class="content">First</p><p class="content">Second</p>"#;
    /// let doc = Document::parse(html);
    /// let elements = doc.select("p.content").unwrap();
    /// assert_eq!(elements.len(), 2);
    /// ```
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel =
            Selector::parse(selector).map_err(|e| LexisError::HtmlParseError(format!("Invalid selector: {}", e)))?;

        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Gets the first element matching `selector`, if any.
    pub fn select_first(&'_ self, selector: &str) -> Result<Option<Element<'_>>> {
        Ok(self.select(selector)?.into_iter().next())
    }
}

/// A wrapper around scraper's ElementRef.
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: scraper::ElementRef<'a>,
}

impl Element<'_> {
    /// Concatenated text nodes of this element, without text inside
    /// `script`, `style`, `noscript` and `template` elements.
    pub fn visible_text(&self) -> String {
        let mut out = String::new();

        for node in self.element.descendants() {
            let Some(text) = node.value().as_text() else {
                continue;
            };

            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|el| INVISIBLE_TAGS.contains(&el.name()))
            });

            if !hidden {
                out.push_str(text);
            }
        }

        out
    }
}
