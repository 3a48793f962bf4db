// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Submodules:
// - normalize: canonical URLs so each page is visited once
// - fetch: the Fetcher trait and the reqwest-backed HttpFetcher
// - queue: crawl state and the breadth-first loop that builds the report
//
// run_analysis() is the one entry point the CLI and the HTTP API use.
// =============================================================================

mod fetch;
mod normalize;
mod queue;

use fetch::HttpFetcher;
use queue::crawl_site;

use crate::config::AnalysisConfig;
use crate::extract::ScraperExtractor;
use crate::report::Report;
use anyhow::Result;

/// Validates the config, crawls over HTTP and returns the report
///
/// A missing or invalid startUrl fails here, before any request is made.
pub async fn run_analysis(config: &AnalysisConfig) -> Result<Report> {
    let seed = config.validate()?;
    let fetcher = HttpFetcher::new(config)?;

    log::info!("Starting SEO headings analysis for {}", seed);
    crawl_site(config, &seed, &fetcher, &ScraperExtractor).await
}
