//! Table of contents for a page.

use crate::document::DocumentTree;
use crate::domain::Anchor;
use serde::Serialize;

/// Default minimum number of headings for a page to get a table of contents
pub const DEFAULT_MIN_HEADINGS: usize = 3;

/// One heading line of the outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocItem {
    /// Heading level, 1 to 4
    pub level: u8,
    pub text: String,
    pub anchor: Anchor,
}

/// Outline of a page's `h1`..`h4` headings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableOfContents {
    pub items: Vec<TocItem>,
}

impl TableOfContents {
    /// Build the outline, or `None` when the page has fewer than `min_headings`
    /// non-empty headings and the table should not render at all.
    pub fn build(document: &DocumentTree, min_headings: usize) -> Option<Self> {
        Self::from_items(Self::headings(document), min_headings)
    }

    /// Every non-empty `h1`..`h4` heading in document order.
    ///
    /// Headings without an id get one synthesized from their text.
    pub fn headings(document: &DocumentTree) -> Vec<TocItem> {
        document
            .elements()
            .filter_map(|el| {
                let level = el.heading_level().filter(|l| *l <= 4)?;
                let text = el.text_content_filtered(|child| !child.has_class("headerlink"));
                if text.is_empty() {
                    return None;
                }
                let anchor = el
                    .id()
                    .map(Anchor::new)
                    .unwrap_or_else(|| Anchor::synthesize(&text));
                Some(TocItem {
                    level,
                    text,
                    anchor,
                })
            })
            .collect()
    }

    /// Outline over already extracted headings, applying the threshold.
    pub fn from_items(items: Vec<TocItem>, min_headings: usize) -> Option<Self> {
        if items.len() < min_headings {
            tracing::debug!(
                headings = items.len(),
                min_headings = min_headings,
                "Skipping table of contents"
            );
            return None;
        }

        Some(Self { items })
    }

    /// Render as a flat HTML list; the level is carried in each item's class.
    pub fn to_html(&self) -> String {
        let mut out = String::from("<ul class=\"page-toc\">");
        for item in &self.items {
            out.push_str(&format!(
                "<li class=\"toc-level-{}\"><a href=\"#{}\">{}</a></li>",
                item.level,
                crate::search::escape_html(item.anchor.as_str()),
                crate::search::escape_html(&item.text)
            ));
        }
        out.push_str("</ul>");
        out
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
