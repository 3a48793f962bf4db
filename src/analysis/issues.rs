// src/analysis/issues.rs
// =============================================================================
// Heading issue detection.
//
// Issues come from a fixed vocabulary and are reported at most once per
// page, in the order they were first found. Severity is only used when the
// domain report groups issues across pages.
// =============================================================================

use super::{Heading, PageCounts};
use serde::{Deserialize, Serialize};
use std::fmt;

const MIN_HEADING_LENGTH: usize = 10;
const MAX_HEADING_LENGTH: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeadingIssue {
    #[serde(rename = "missing H1")]
    MissingH1,
    #[serde(rename = "multiple H1 tags")]
    MultipleH1,
    #[serde(rename = "heading hierarchy skipped levels")]
    SkippedLevels,
    #[serde(rename = "heading text too short")]
    TextTooShort,
    #[serde(rename = "heading text too long")]
    TextTooLong,
    #[serde(rename = "too many consecutive same level headings")]
    TooManyConsecutive,
}

impl HeadingIssue {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeadingIssue::MissingH1 => "missing H1",
            HeadingIssue::MultipleH1 => "multiple H1 tags",
            HeadingIssue::SkippedLevels => "heading hierarchy skipped levels",
            HeadingIssue::TextTooShort => "heading text too short",
            HeadingIssue::TextTooLong => "heading text too long",
            HeadingIssue::TooManyConsecutive => "too many consecutive same level headings",
        }
    }

    pub fn severity(&self) -> Severity {
        Severity::classify(self.as_str())
    }
}

impl fmt::Display for HeadingIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl Severity {
    /// Classifies free issue text by case-insensitive substring match
    pub fn classify(issue: &str) -> Self {
        const CRITICAL: [HeadingIssue; 3] = [
            HeadingIssue::MissingH1,
            HeadingIssue::MultipleH1,
            HeadingIssue::SkippedLevels,
        ];
        const WARNING: [HeadingIssue; 3] = [
            HeadingIssue::TooManyConsecutive,
            HeadingIssue::TextTooShort,
            HeadingIssue::TextTooLong,
        ];

        let issue = issue.to_lowercase();
        let mentions = |kind: &HeadingIssue| issue.contains(&kind.as_str().to_lowercase());

        if CRITICAL.iter().any(mentions) {
            Severity::Critical
        } else if WARNING.iter().any(mentions) {
            Severity::Warning
        } else {
            Severity::Info
        }
    }
}

/// Finds the heading issues on one page
pub fn detect_issues(counts: &PageCounts, headings: &[Heading]) -> Vec<HeadingIssue> {
    let mut issues = Vec::new();

    if counts.h1_count == 0 {
        issues.push(HeadingIssue::MissingH1);
    }
    if counts.h1_count > 1 {
        issues.push(HeadingIssue::MultipleH1);
    }

    let mut previous_level = 0u8;
    for heading in headings {
        if previous_level != 0 && heading.level > previous_level + 1 {
            issues.push(HeadingIssue::SkippedLevels);
        }
        previous_level = heading.level;
    }

    for heading in headings {
        if heading.length < MIN_HEADING_LENGTH {
            issues.push(HeadingIssue::TextTooShort);
        } else if heading.length > MAX_HEADING_LENGTH {
            issues.push(HeadingIssue::TextTooLong);
        }
    }

    // The run counter resets whenever the level changes
    let mut consecutive_same_level = 0u32;
    let mut current_level = 0u8;
    for heading in headings {
        if heading.level == current_level {
            consecutive_same_level += 1;
            if consecutive_same_level > 2 {
                issues.push(HeadingIssue::TooManyConsecutive);
            }
        } else {
            consecutive_same_level = 0;
            current_level = heading.level;
        }
    }

    dedup_in_order(issues)
}

fn dedup_in_order(issues: Vec<HeadingIssue>) -> Vec<HeadingIssue> {
    let mut unique = Vec::with_capacity(issues.len());
    for issue in issues {
        if !unique.contains(&issue) {
            unique.push(issue);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn structure(levels: &[u8]) -> Vec<Heading> {
        levels
            .iter()
            .enumerate()
            .map(|(i, &level)| Heading::new(level, format!("A decent heading {}", i + 1), i + 1))
            .collect()
    }

    fn issues_for(levels: &[u8]) -> Vec<HeadingIssue> {
        let headings = structure(levels);
        detect_issues(&PageCounts::from_headings(&headings), &headings)
    }

    #[test]
    fn test_no_headings_only_missing_h1() {
        assert_eq!(issues_for(&[]), vec![HeadingIssue::MissingH1]);
    }

    #[test]
    fn test_multiple_h1() {
        assert_eq!(issues_for(&[1, 2, 1]), vec![HeadingIssue::MultipleH1]);
    }

    #[test]
    fn test_skipped_levels() {
        assert_eq!(issues_for(&[1, 3]), vec![HeadingIssue::SkippedLevels]);
        // going back up is never a skip
        assert!(issues_for(&[1, 2, 3, 2, 3]).is_empty());
        assert_eq!(issues_for(&[1, 2, 3, 1, 2]), vec![HeadingIssue::MultipleH1]);
    }

    #[test]
    fn test_four_consecutive_h2() {
        let issues = issues_for(&[2, 2, 2, 2]);
        assert!(issues.contains(&HeadingIssue::TooManyConsecutive));
        assert!(issues.contains(&HeadingIssue::MissingH1));
    }

    #[test]
    fn test_three_consecutive_is_fine() {
        assert!(!issues_for(&[1, 2, 2, 2]).contains(&HeadingIssue::TooManyConsecutive));
    }

    #[test]
    fn test_level_change_resets_run() {
        // the skip to h4 starts a new run here, unlike in scoring
        let issues = issues_for(&[1, 2, 2, 2, 4, 4]);
        assert_eq!(issues, vec![HeadingIssue::SkippedLevels]);
    }

    #[test]
    fn test_text_length_issues() {
        let headings = vec![
            Heading::new(1, "Short", 1),
            Heading::new(2, "x".repeat(101), 2),
            Heading::new(2, "Tiny", 3),
        ];
        let issues = detect_issues(&PageCounts::from_headings(&headings), &headings);
        assert_eq!(
            issues,
            vec![HeadingIssue::TextTooShort, HeadingIssue::TextTooLong]
        );
    }

    #[test]
    fn test_issues_are_deduplicated() {
        let issues = issues_for(&[1, 3, 1, 3, 5]);
        let skips = issues
            .iter()
            .filter(|i| **i == HeadingIssue::SkippedLevels)
            .count();
        assert_eq!(skips, 1);
        assert!(issues.contains(&HeadingIssue::MultipleH1));
    }

    #[test]
    fn test_severity_classification() {
        assert_eq!(HeadingIssue::MissingH1.severity(), Severity::Critical);
        assert_eq!(HeadingIssue::SkippedLevels.severity(), Severity::Critical);
        assert_eq!(HeadingIssue::TextTooLong.severity(), Severity::Warning);
        assert_eq!(HeadingIssue::TooManyConsecutive.severity(), Severity::Warning);
        assert_eq!(Severity::classify("Page has MISSING h1 tag"), Severity::Critical);
        assert_eq!(Severity::classify("something else"), Severity::Info);
    }

    #[test]
    fn test_issue_serializes_as_text() {
        let json = serde_json::to_string(&HeadingIssue::MultipleH1).unwrap();
        assert_eq!(json, "\"multiple H1 tags\"");
        assert_eq!(HeadingIssue::TextTooShort.to_string(), "heading text too short");
    }
}
