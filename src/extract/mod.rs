// src/extract/mod.rs
// =============================================================================
// This module turns raw HTML into the three things the analyzer needs:
// - the page title
// - the non-empty h1..h6 headings, in document order
// - same-origin links (with anchor text) for the crawl loop
//
// Scoring never sees the HTML parser. It only sees ExtractedPage, so the
// parser behind HeadingExtractor can be swapped without touching it.
// =============================================================================

mod html;

pub use html::ScraperExtractor;

use serde::Serialize;

/// A heading as found in the document, before any analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawHeading {
    /// 1..=6
    pub level: u8,
    /// Trimmed text content, never empty
    pub text: String,
}

/// A same-origin outbound link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalLink {
    /// Absolute URL, resolved against the page URL
    pub url: String,
    pub anchor_text: String,
}

/// Everything pulled out of one HTML document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedPage {
    pub title: String,
    pub headings: Vec<RawHeading>,
    pub links: Vec<InternalLink>,
}

/// Parses HTML into an ExtractedPage
///
/// `page_url` is the URL the HTML was served from; relative links are
/// resolved against it and only links on the same host are returned.
pub trait HeadingExtractor {
    fn extract(&self, html: &str, page_url: &str) -> ExtractedPage;
}
