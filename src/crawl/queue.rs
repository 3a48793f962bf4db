// src/crawl/queue.rs
// =============================================================================
// The breadth-first crawl loop.
//
// How it works:
// 1. Start with the normalized seed URL in the frontier
// 2. Pop the next URL (FIFO); skip it if we've already been there
// 3. Fetch it and analyze the headings (or record the failure)
// 4. If crawling is enabled, push the page's same-origin links onto the
//    back of the frontier
// 5. Repeat until the frontier is empty or the page budget is spent
// 6. Fold every page result into the domain report
//
// Pages are fetched one at a time. A failed page is recorded once and the
// loop moves on; nothing is retried.
//
// All loop state lives in CrawlState, which the loop owns. Nothing global.
// =============================================================================

use super::fetch::Fetcher;
use super::normalize::{is_same_origin, normalize, origin};
use crate::analysis::analyze_page;
use crate::config::AnalysisConfig;
use crate::extract::{HeadingExtractor, InternalLink};
use crate::report::{timestamp, PageResult, Report};
use anyhow::Result;
use std::collections::{HashSet, VecDeque};
use url::Url;

/// Frontier, visited set and page budget for one run
#[derive(Debug, Clone)]
pub struct CrawlState {
    visited: HashSet<String>,
    frontier: VecDeque<String>,
    processed: usize,
    max_pages: usize,
}

impl CrawlState {
    pub fn new(seed: &str, max_pages: usize) -> Self {
        Self {
            visited: HashSet::new(),
            frontier: VecDeque::from([normalize(seed)]),
            processed: 0,
            max_pages,
        }
    }

    /// Next URL to process, or None when the crawl is over
    ///
    /// Marks the returned URL as visited. Already-visited entries are
    /// dropped without spending budget.
    pub fn next_url(&mut self) -> Option<String> {
        while self.processed < self.max_pages {
            let url = self.frontier.pop_front()?;
            if self.visited.insert(url.clone()) {
                return Some(url);
            }
        }
        None
    }

    /// Counts one page (successful or not) against the budget
    pub fn mark_processed(&mut self) {
        self.processed += 1;
    }

    /// Queues a URL unless it was visited or is already waiting
    ///
    /// Returns true when the URL was added.
    pub fn enqueue(&mut self, url: String) -> bool {
        if self.visited.contains(&url) || self.frontier.contains(&url) {
            return false;
        }
        self.frontier.push_back(url);
        true
    }

    pub fn processed(&self) -> usize {
        self.processed
    }

    pub fn pending(&self) -> usize {
        self.frontier.len()
    }
}

/// Crawls from `seed` and builds the report
///
/// `config` has already been validated; `seed` is its parsed start URL.
pub async fn crawl_site<F, E>(
    config: &AnalysisConfig,
    seed: &Url,
    fetcher: &F,
    extractor: &E,
) -> Result<Report>
where
    F: Fetcher + ?Sized,
    E: HeadingExtractor + Sync + ?Sized,
{
    let base_origin = origin(seed);
    let max_pages = config.effective_max_pages();
    let mut state = CrawlState::new(seed.as_str(), max_pages);
    let mut pages = Vec::new();

    log::info!(
        "Crawl mode: {}",
        if config.crawl_urls {
            "multi-page crawling enabled"
        } else {
            "single page analysis only"
        }
    );
    log::info!("Maximum pages to process: {}", max_pages);

    while let Some(url) = state.next_url() {
        log::info!(
            "Processing: {} ({}/{})",
            url,
            state.processed() + 1,
            max_pages
        );

        let links = match fetcher.fetch(&url).await {
            Ok(fetched) => {
                let analysis = analyze_page(
                    extractor,
                    &url,
                    &fetched.html,
                    config.output.include_heading_score,
                );
                let links = analysis.links.clone();

                log::info!(
                    "Completed analysis for: {} (Status: {})",
                    url,
                    fetched.status
                );
                log::info!(
                    "Found {} headings (H1: {}, H2: {}, H3: {}), score {}/100",
                    analysis.total_headings(),
                    analysis.counts.h1_count,
                    analysis.counts.h2_count,
                    analysis.counts.h3_count,
                    analysis.score
                );

                pages.push(PageResult::from_analysis(
                    url.clone(),
                    fetched.status,
                    analysis,
                    &config.output,
                    timestamp(),
                ));
                links
            }
            Err(error) => {
                log::warn!(
                    "Error analyzing {}: {} (recorded as status {})",
                    url,
                    error,
                    error.status_code()
                );
                pages.push(PageResult::from_error(
                    url.clone(),
                    &error,
                    &config.output,
                    timestamp(),
                ));
                Vec::new()
            }
        };

        state.mark_processed();

        if config.crawl_urls {
            enqueue_links(&mut state, &links, seed);
            log::debug!("{} URL(s) waiting in the frontier", state.pending());
        }
    }

    let report = Report::build(&base_origin, pages, timestamp());

    let domain = &report.domain;
    log::info!(
        "Headings analysis completed: {} page(s), average score {}/100, {}% with H1, {} critical issue(s)",
        domain.total_pages_analyzed,
        domain.average_heading_score,
        domain.pages_with_h1_percentage,
        domain.critical_issues
    );

    Ok(report)
}

fn enqueue_links(state: &mut CrawlState, links: &[InternalLink], seed: &Url) {
    for link in links {
        let normalized = normalize(&link.url);
        if !is_same_origin(&normalized, seed) {
            continue;
        }
        if state.enqueue(normalized.clone()) {
            log::debug!("Added to crawl queue: {}", normalized);
        }
    }
}
