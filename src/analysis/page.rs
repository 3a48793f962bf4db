// src/analysis/page.rs
// =============================================================================
// Runs the full analysis for one page:
//
//   extract -> counts -> structure -> score -> issues -> recommendations
//
// plus the internal links the crawl loop uses to grow its frontier.
// No network I/O happens here; the caller hands us the HTML.
// =============================================================================

use super::{
    build_structure, detect_issues, generate_recommendations, score, Heading, HeadingIssue,
    HeadingTexts, PageCounts,
};
use crate::extract::{HeadingExtractor, InternalLink};

/// The analysis of one page, before it is shaped into a report entry
#[derive(Debug, Clone, PartialEq)]
pub struct PageAnalysis {
    pub title: String,
    pub texts: HeadingTexts,
    pub counts: PageCounts,
    pub structure: Vec<Heading>,
    pub score: u8,
    pub issues: Vec<HeadingIssue>,
    pub recommendations: Vec<String>,
    /// Used by the crawl loop only, never reported
    pub links: Vec<InternalLink>,
}

impl PageAnalysis {
    pub fn total_headings(&self) -> usize {
        self.counts.total()
    }
}

/// Analyzes one HTML document served from `url`
///
/// `include_score` only decides whether the score verdict shows up in the
/// recommendations; the score itself is always computed.
pub fn analyze_page<E: HeadingExtractor + ?Sized>(
    extractor: &E,
    url: &str,
    html: &str,
    include_score: bool,
) -> PageAnalysis {
    let extracted = extractor.extract(html, url);

    let structure = build_structure(&extracted.headings);
    let counts = PageCounts::from_headings(&structure);
    let texts = HeadingTexts::from_headings(&structure);
    let page_score = score(&structure, &extracted.title);
    let issues = detect_issues(&counts, &structure);
    let recommendations =
        generate_recommendations(&counts, &structure, include_score.then_some(page_score));

    PageAnalysis {
        title: extracted.title,
        texts,
        counts,
        structure,
        score: page_score,
        issues,
        recommendations,
        links: extracted.links,
    }
}
