// src/analysis/mod.rs
// =============================================================================
// Heading analysis for a single page.
//
// Submodules:
// - score: 0..=100 structural score
// - issues: issue detection and severity classification
// - recommend: advice strings for humans
// - page: runs all of the above over one HTML document
//
// Everything except `page` is a pure function of a heading list, so it can
// be tested without any HTML at all.
// =============================================================================

mod issues;
mod page;
mod recommend;
mod score;

pub use issues::{detect_issues, HeadingIssue, Severity};
pub use page::{analyze_page, PageAnalysis};
pub use recommend::generate_recommendations;
pub use score::score;

use crate::extract::RawHeading;
use serde::Serialize;

/// One non-empty heading, positioned in document order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Heading {
    /// "h1".."h6"
    pub tag: String,
    pub level: u8,
    pub text: String,
    /// 1-based index among the non-empty headings
    pub position: usize,
    /// Character count of `text`
    pub length: usize,
    pub word_count: usize,
}

impl Heading {
    pub fn new(level: u8, text: impl Into<String>, position: usize) -> Self {
        let text = text.into();
        Self {
            tag: format!("h{}", level),
            level,
            length: text.chars().count(),
            word_count: text.split_whitespace().count(),
            text,
            position,
        }
    }
}

/// Builds the ordered heading structure from extracted headings
pub fn build_structure(raw: &[RawHeading]) -> Vec<Heading> {
    raw.iter()
        .enumerate()
        .map(|(index, heading)| Heading::new(heading.level, heading.text.clone(), index + 1))
        .collect()
}

/// Occurrences of non-empty headings per level
///
/// Serialized as h1Count..h6Count next to the other page fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageCounts {
    pub h1_count: usize,
    pub h2_count: usize,
    pub h3_count: usize,
    pub h4_count: usize,
    pub h5_count: usize,
    pub h6_count: usize,
}

impl PageCounts {
    pub fn from_headings(headings: &[Heading]) -> Self {
        let mut counts = Self::default();
        for heading in headings {
            counts.increment(heading.level);
        }
        counts
    }

    /// Count for a level; 0 for anything outside 1..=6
    pub fn get(&self, level: u8) -> usize {
        match level {
            1 => self.h1_count,
            2 => self.h2_count,
            3 => self.h3_count,
            4 => self.h4_count,
            5 => self.h5_count,
            6 => self.h6_count,
            _ => 0,
        }
    }

    fn increment(&mut self, level: u8) {
        let slot = match level {
            1 => &mut self.h1_count,
            2 => &mut self.h2_count,
            3 => &mut self.h3_count,
            4 => &mut self.h4_count,
            5 => &mut self.h5_count,
            6 => &mut self.h6_count,
            _ => return,
        };
        *slot += 1;
    }

    pub fn total(&self) -> usize {
        (1..=6).map(|level| self.get(level)).sum()
    }
}

/// Heading texts grouped by level, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HeadingTexts {
    pub h1: Vec<String>,
    pub h2: Vec<String>,
    pub h3: Vec<String>,
    pub h4: Vec<String>,
    pub h5: Vec<String>,
    pub h6: Vec<String>,
}

impl HeadingTexts {
    pub fn from_headings(headings: &[Heading]) -> Self {
        let mut texts = Self::default();
        for heading in headings {
            let list = match heading.level {
                1 => &mut texts.h1,
                2 => &mut texts.h2,
                3 => &mut texts.h3,
                4 => &mut texts.h4,
                5 => &mut texts.h5,
                6 => &mut texts.h6,
                _ => continue,
            };
            list.push(heading.text.clone());
        }
        texts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_metrics() {
        let heading = Heading::new(2, "  Getting   started with Rust ", 3);
        assert_eq!(heading.tag, "h2");
        assert_eq!(heading.position, 3);
        assert_eq!(heading.word_count, 4);
        assert_eq!(heading.length, 30);

        let accented = Heading::new(1, "Café", 1);
        assert_eq!(accented.length, 4);
    }

    #[test]
    fn test_counts_sum_to_total() {
        let raw = vec![
            RawHeading { level: 1, text: "Title".into() },
            RawHeading { level: 2, text: "A".into() },
            RawHeading { level: 2, text: "B".into() },
            RawHeading { level: 6, text: "Tiny".into() },
        ];
        let structure = build_structure(&raw);
        let counts = PageCounts::from_headings(&structure);
        assert_eq!(counts.h1_count, 1);
        assert_eq!(counts.h2_count, 2);
        assert_eq!(counts.h6_count, 1);
        assert_eq!(counts.total(), structure.len());
        assert_eq!(structure[3].position, 4);
    }

    #[test]
    fn test_texts_grouped_by_level() {
        let structure = vec![
            Heading::new(2, "Later", 1),
            Heading::new(1, "Main", 2),
            Heading::new(2, "Even later", 3),
        ];
        let texts = HeadingTexts::from_headings(&structure);
        assert_eq!(texts.h1, vec!["Main"]);
        assert_eq!(texts.h2, vec!["Later", "Even later"]);
        assert!(texts.h3.is_empty());
    }
}
