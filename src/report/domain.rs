// src/report/domain.rs
// =============================================================================
// Domain-level statistics.
//
// Computed once, at the end of a run, purely from the page results. The
// result does not depend on the order of the pages.
//
// Every percentage is round(count / total_pages * 100) and is 0 when no
// pages were analyzed.
// =============================================================================

use super::PageResult;
use crate::analysis::Severity;
use serde::Serialize;
use std::collections::BTreeMap;

/// One issue found on one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueOccurrence {
    pub issue: String,
    pub page: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSummary {
    pub has_heading_issues: bool,
    pub needs_h1_improvement: bool,
    pub has_good_structure: bool,
    pub average_score_grade: char,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainAnalysis {
    pub domain_name: String,
    pub total_pages_analyzed: usize,

    pub total_headings: usize,
    pub total_h1: usize,
    pub total_h2: usize,
    pub total_h3: usize,
    pub total_h4: usize,
    pub total_h5: usize,
    pub total_h6: usize,

    pub average_headings_per_page: u64,
    pub average_h1_per_page: f64,
    pub average_h2_per_page: f64,
    pub average_h3_per_page: f64,
    pub average_heading_score: u64,

    pub pages_with_h1: usize,
    pub pages_with_h1_percentage: u64,
    pub pages_with_multiple_h1: usize,
    pub pages_with_multiple_h1_percentage: u64,
    pub pages_with_no_h1: usize,
    pub pages_with_no_h1_percentage: u64,
    pub pages_with_h2: usize,
    pub pages_with_h2_percentage: u64,
    pub pages_with_h3: usize,
    pub pages_with_h3_percentage: u64,
    pub pages_with_good_structure: usize,
    pub pages_with_good_structure_percentage: u64,

    pub total_heading_issues: usize,
    pub critical_issues: usize,
    pub warning_issues: usize,
    pub info_issues: usize,
    pub issues_by_type: BTreeMap<String, Vec<IssueOccurrence>>,

    pub analysis_summary: AnalysisSummary,
}

/// Letter grade for an average score
pub fn score_grade(score: u64) -> char {
    match score {
        s if s >= 90 => 'A',
        s if s >= 80 => 'B',
        s if s >= 70 => 'C',
        s if s >= 60 => 'D',
        _ => 'F',
    }
}

// round(part / whole), 0 when there is nothing to divide by
fn rounded_ratio(part: usize, whole: usize) -> u64 {
    if whole == 0 {
        0
    } else {
        (part as f64 / whole as f64).round() as u64
    }
}

fn percentage(part: usize, whole: usize) -> u64 {
    rounded_ratio(part * 100, whole)
}

// Average rounded to two decimals
fn average_2dp(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        ((part as f64 / whole as f64) * 100.0).round() / 100.0
    }
}

fn sum_by(pages: &[PageResult], f: impl Fn(&PageResult) -> usize) -> usize {
    pages.iter().map(f).sum()
}

fn count_where(pages: &[PageResult], f: impl Fn(&PageResult) -> bool) -> usize {
    pages.iter().filter(|page| f(*page)).count()
}

/// Folds all page results into domain statistics
pub fn aggregate(pages: &[PageResult], domain_name: &str) -> DomainAnalysis {
    let total_pages = pages.len();

    let total_headings = sum_by(pages, |p| p.total_headings);
    let total_h1 = sum_by(pages, |p| p.counts.h1_count);
    let total_h2 = sum_by(pages, |p| p.counts.h2_count);
    let total_h3 = sum_by(pages, |p| p.counts.h3_count);

    let scores: Vec<u64> = pages
        .iter()
        .filter_map(|p| p.heading_score.map(u64::from))
        .collect();
    let average_heading_score = rounded_ratio(scores.iter().sum::<u64>() as usize, scores.len());

    let pages_with_h1 = count_where(pages, |p| p.counts.h1_count > 0);
    let pages_with_multiple_h1 = count_where(pages, |p| p.counts.h1_count > 1);
    let pages_with_no_h1 = count_where(pages, |p| p.counts.h1_count == 0);
    let pages_with_h2 = count_where(pages, |p| p.counts.h2_count > 0);
    let pages_with_h3 = count_where(pages, |p| p.counts.h3_count > 0);
    let pages_with_good_structure =
        count_where(pages, |p| p.counts.h1_count == 1 && p.counts.h2_count > 0);

    let mut issues_by_type: BTreeMap<String, Vec<IssueOccurrence>> = BTreeMap::new();
    let mut critical_issues = 0;
    let mut warning_issues = 0;
    let mut info_issues = 0;

    for page in pages {
        for issue in &page.heading_issues {
            let severity = issue.severity();
            match severity {
                Severity::Critical => critical_issues += 1,
                Severity::Warning => warning_issues += 1,
                Severity::Info => info_issues += 1,
            }
            issues_by_type
                .entry(issue.to_string())
                .or_default()
                .push(IssueOccurrence {
                    issue: issue.to_string(),
                    page: page.url.clone(),
                    severity,
                });
        }
    }

    // Grouping must not depend on crawl order
    for occurrences in issues_by_type.values_mut() {
        occurrences.sort_by(|a, b| a.page.cmp(&b.page));
    }

    let total_heading_issues = critical_issues + warning_issues + info_issues;

    DomainAnalysis {
        domain_name: domain_name.to_string(),
        total_pages_analyzed: total_pages,

        total_headings,
        total_h1,
        total_h2,
        total_h3,
        total_h4: sum_by(pages, |p| p.counts.h4_count),
        total_h5: sum_by(pages, |p| p.counts.h5_count),
        total_h6: sum_by(pages, |p| p.counts.h6_count),

        average_headings_per_page: rounded_ratio(total_headings, total_pages),
        average_h1_per_page: average_2dp(total_h1, total_pages),
        average_h2_per_page: average_2dp(total_h2, total_pages),
        average_h3_per_page: average_2dp(total_h3, total_pages),
        average_heading_score,

        pages_with_h1,
        pages_with_h1_percentage: percentage(pages_with_h1, total_pages),
        pages_with_multiple_h1,
        pages_with_multiple_h1_percentage: percentage(pages_with_multiple_h1, total_pages),
        pages_with_no_h1,
        pages_with_no_h1_percentage: percentage(pages_with_no_h1, total_pages),
        pages_with_h2,
        pages_with_h2_percentage: percentage(pages_with_h2, total_pages),
        pages_with_h3,
        pages_with_h3_percentage: percentage(pages_with_h3, total_pages),
        pages_with_good_structure,
        pages_with_good_structure_percentage: percentage(pages_with_good_structure, total_pages),

        total_heading_issues,
        critical_issues,
        warning_issues,
        info_issues,
        issues_by_type,

        analysis_summary: AnalysisSummary {
            has_heading_issues: total_heading_issues > 0,
            needs_h1_improvement: pages_with_no_h1 > 0 || pages_with_multiple_h1 > 0,
            has_good_structure: pages_with_good_structure > 0,
            average_score_grade: score_grade(average_heading_score),
        },
    }
}
