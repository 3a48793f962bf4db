// src/report/mod.rs
// =============================================================================
// The shapes that leave the program.
//
// - PageResult: one entry per crawled URL, success or failure
// - DomainAnalysis: statistics folded from all page results (domain.rs)
// - Report: both of the above plus run metadata
// - print_table: terminal rendering for humans (table.rs)
//
// JSON field names match what API consumers already read
// (pageStatusCode, h1Count, headingStructure, analysis_date, ...).
// =============================================================================

mod domain;
mod table;

pub use domain::{aggregate, DomainAnalysis};
pub use table::print_table;

use crate::analysis::{Heading, HeadingIssue, HeadingTexts, PageAnalysis, PageCounts};
use crate::config::OutputOptions;
use crate::error::FetchError;
use serde::Serialize;

pub const DATA_SOURCE: &str = "heading_scout";
pub const DATA_FORMAT_VERSION: &str = "1.0";

/// Heading texts per level; `null` when text output is disabled
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TextLists {
    pub h1: Option<Vec<String>>,
    pub h2: Option<Vec<String>>,
    pub h3: Option<Vec<String>>,
    pub h4: Option<Vec<String>>,
    pub h5: Option<Vec<String>>,
    pub h6: Option<Vec<String>>,
}

impl From<HeadingTexts> for TextLists {
    fn from(texts: HeadingTexts) -> Self {
        Self {
            h1: Some(texts.h1),
            h2: Some(texts.h2),
            h3: Some(texts.h3),
            h4: Some(texts.h4),
            h5: Some(texts.h5),
            h6: Some(texts.h6),
        }
    }
}

/// Result for one crawled URL
///
/// Built once, never changed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    pub url: String,
    #[serde(rename = "pageStatusCode")]
    pub http_status: u16,
    #[serde(rename = "analysis_date")]
    pub analysis_date: String,
    #[serde(rename = "data_source")]
    pub data_source: &'static str,

    #[serde(flatten)]
    pub texts: TextLists,
    #[serde(flatten)]
    pub counts: PageCounts,
    pub total_headings: usize,

    pub heading_structure: Option<Vec<Heading>>,
    pub heading_score: Option<u8>,
    pub heading_issues: Vec<HeadingIssue>,
    pub heading_recommendations: Vec<String>,
    pub page_title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PageResult {
    /// Shapes a successful analysis, hiding fields the options turn off
    ///
    /// Internal links are dropped here; they never reach the report.
    pub fn from_analysis(
        url: String,
        http_status: u16,
        analysis: PageAnalysis,
        options: &OutputOptions,
        analysis_date: String,
    ) -> Self {
        let total_headings = analysis.total_headings();

        Self {
            url,
            http_status,
            analysis_date,
            data_source: DATA_SOURCE,
            texts: if options.include_heading_text {
                analysis.texts.into()
            } else {
                TextLists::default()
            },
            counts: analysis.counts,
            total_headings,
            heading_structure: options
                .include_heading_structure
                .then_some(analysis.structure),
            heading_score: options.include_heading_score.then_some(analysis.score),
            heading_issues: analysis.issues,
            heading_recommendations: analysis.recommendations,
            page_title: analysis.title,
            error: None,
        }
    }

    /// Placeholder entry for a page that could not be fetched
    pub fn from_error(
        url: String,
        error: &FetchError,
        options: &OutputOptions,
        analysis_date: String,
    ) -> Self {
        Self {
            url,
            http_status: error.status_code(),
            analysis_date,
            data_source: DATA_SOURCE,
            texts: TextLists::default(),
            counts: PageCounts::default(),
            total_headings: 0,
            heading_structure: options.include_heading_structure.then(Vec::new),
            heading_score: options.include_heading_score.then_some(0),
            heading_issues: Vec::new(),
            heading_recommendations: Vec::new(),
            page_title: String::new(),
            error: Some(error.to_string()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Run metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisMeta {
    pub total_pages_processed: usize,
    pub analysis_completed_at: String,
    pub headings_engine_version: &'static str,
    pub data_format_version: &'static str,
}

/// The final output of a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub domain: DomainAnalysis,
    pub pages: Vec<PageResult>,
    pub analysis: AnalysisMeta,
}

impl Report {
    /// Folds the page list into a report for the seed domain
    pub fn build(domain_name: &str, pages: Vec<PageResult>, completed_at: String) -> Self {
        let domain = aggregate(&pages, domain_name);
        let analysis = AnalysisMeta {
            total_pages_processed: pages.len(),
            analysis_completed_at: completed_at,
            headings_engine_version: env!("CARGO_PKG_VERSION"),
            data_format_version: DATA_FORMAT_VERSION,
        };

        Self {
            domain,
            pages,
            analysis,
        }
    }
}

/// Current UTC time as RFC 3339 with milliseconds
pub fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
