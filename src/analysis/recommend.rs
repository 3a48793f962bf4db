// src/analysis/recommend.rs
// =============================================================================
// Human-readable advice for a page.
//
// Recommendations are presentation text only; nothing downstream reads them.
// The order is fixed: H1 advice, hierarchy advice, score verdict, text
// length advice.
// =============================================================================

use super::{Heading, PageCounts};

pub fn generate_recommendations(
    counts: &PageCounts,
    headings: &[Heading],
    score: Option<u8>,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if counts.h1_count == 0 {
        recommendations.push("Add a single H1 tag to each page for better SEO");
    } else if counts.h1_count > 1 {
        recommendations.push("Use only one H1 tag per page for better SEO structure");
    }

    if !headings.is_empty() {
        let has_h2 = counts.h2_count > 0;
        let has_h3 = counts.h3_count > 0;

        if !has_h2 && headings.len() > 1 {
            recommendations.push("Consider adding H2 tags to organize content better");
        }
        if has_h2 && !has_h3 && counts.h2_count > 2 {
            recommendations.push("Consider adding H3 tags to create better content hierarchy");
        }
    }

    // Without a score there is no verdict to give
    if let Some(score) = score {
        recommendations.push(match score {
            0..=49 => "Improve heading structure and hierarchy for better SEO",
            50..=79 => "Good heading structure, consider minor improvements",
            _ => "Excellent heading structure!",
        });
    }

    if headings.iter().any(|h| h.length < 10) {
        recommendations.push("Some headings are too short - aim for 10-100 characters");
    }
    if headings.iter().any(|h| h.length > 100) {
        recommendations
            .push("Some headings are too long - consider shortening to under 100 characters");
    }

    recommendations.into_iter().map(String::from).collect()
}
