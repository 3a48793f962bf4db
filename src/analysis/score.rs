// src/analysis/score.rs
// =============================================================================
// Structural heading score, 0..=100.
//
// Four components:
//   H1 presence      up to 20
//   hierarchy        up to 30
//   title relevance  up to 20
//   distribution     up to 30
//
// The hierarchy walk is separate from the one in issues.rs and differs from
// it: here a level skip does not reset the same-level run counter.
// =============================================================================

use super::Heading;
use std::collections::HashSet;

const MAX_SCORE: i32 = 100;
const MAX_HIERARCHY: i32 = 30;

/// Scores a page's heading structure against its title
pub fn score(headings: &[Heading], title: &str) -> u8 {
    let total = h1_component(headings)
        + hierarchy_component(headings)
        + title_component(headings, title)
        + distribution_component(headings);

    total.clamp(0, MAX_SCORE) as u8
}

fn count_level(headings: &[Heading], level: u8) -> usize {
    headings.iter().filter(|h| h.level == level).count()
}

fn h1_component(headings: &[Heading]) -> i32 {
    match count_level(headings, 1) {
        0 => 0,
        1 => 20,
        _ => 10,
    }
}

fn hierarchy_component(headings: &[Heading]) -> i32 {
    let mut hierarchy = 0i32;
    let mut previous_level = 0u8;
    let mut consecutive_same_level = 0u32;
    let mut max_level = 0u8;

    for heading in headings {
        if previous_level != 0 && heading.level > previous_level + 1 {
            hierarchy -= 5;
        } else if heading.level == previous_level {
            consecutive_same_level += 1;
            if consecutive_same_level > 2 {
                hierarchy -= 2;
            }
        } else {
            consecutive_same_level = 0;
        }

        previous_level = heading.level;
        max_level = max_level.max(heading.level);
    }

    // depth bonus
    hierarchy += (i32::from(max_level) * 5).min(20);
    hierarchy.clamp(0, MAX_HIERARCHY)
}

fn title_component(headings: &[Heading], title: &str) -> i32 {
    if title.is_empty() {
        return 0;
    }

    let title = title.to_lowercase();
    let title_words: HashSet<&str> = title.split_whitespace().collect();

    let relevant = headings.iter().any(|heading| {
        heading
            .text
            .to_lowercase()
            .split_whitespace()
            .any(|word| title_words.contains(word))
    });

    if relevant {
        20
    } else {
        0
    }
}

fn distribution_component(headings: &[Heading]) -> i32 {
    if headings.len() < 3 {
        return 0;
    }

    let mut points = 15;
    if count_level(headings, 2) >= 2 {
        points += 10;
    }
    if count_level(headings, 3) >= 3 {
        points += 5;
    }
    points
}
