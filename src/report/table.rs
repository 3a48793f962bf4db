// src/report/table.rs
// =============================================================================
// Human-readable rendering of a Report for the terminal.
//
// One row per page, then a domain summary. The JSON report is the real
// output; this is just for people watching a run.
// =============================================================================

use super::{PageResult, Report};

const URL_WIDTH: usize = 60;

pub fn print_table(report: &Report) {
    println!(
        "{:<60} {:<7} {:<6} {:<9} {:<6}",
        "URL", "STATUS", "SCORE", "HEADINGS", "ISSUES"
    );
    println!("{}", "=".repeat(92));

    for page in &report.pages {
        println!(
            "{:<60} {:<7} {:<6} {:<9} {:<6}",
            truncate_url(&page.url),
            page.http_status,
            format_score(page),
            page.total_headings,
            page.heading_issues.len()
        );
        if let Some(error) = &page.error {
            println!("    ⚠️  {}", error);
        }
    }

    println!();

    let domain = &report.domain;
    println!("📊 Summary for {}:", domain.domain_name);
    println!("   📄 Pages analyzed: {}", domain.total_pages_analyzed);
    println!("   🔢 Total headings: {}", domain.total_headings);
    println!(
        "   ⭐ Average score: {}/100 (grade {})",
        domain.average_heading_score, domain.analysis_summary.average_score_grade
    );
    println!(
        "   🏷️  Pages with H1: {} ({}%)",
        domain.pages_with_h1, domain.pages_with_h1_percentage
    );
    println!(
        "   ❗ Issues: {} critical, {} warning, {} info",
        domain.critical_issues, domain.warning_issues, domain.info_issues
    );

    for (issue, occurrences) in &domain.issues_by_type {
        println!("      - {} ({} page(s))", issue, occurrences.len());
    }
}

fn format_score(page: &PageResult) -> String {
    match (page.is_error(), page.heading_score) {
        (true, _) => "ERR".to_string(),
        (false, Some(score)) => score.to_string(),
        (false, None) => "-".to_string(),
    }
}

// Keeps the table aligned; cuts on a char boundary
fn truncate_url(url: &str) -> String {
    if url.chars().count() > URL_WIDTH - 3 {
        let cut: String = url.chars().take(URL_WIDTH - 6).collect();
        format!("{}...", cut)
    } else {
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_url() {
        assert_eq!(truncate_url("https://example.com/"), "https://example.com/");

        let long = format!("https://example.com/{}", "a".repeat(80));
        let cut = truncate_url(&long);
        assert!(cut.ends_with("..."));
        assert!(cut.chars().count() <= URL_WIDTH);
    }
}
