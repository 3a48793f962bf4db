// src/config.rs
// =============================================================================
// Run configuration.
//
// The same struct is filled from three places:
// - a JSON input file (`analyze --input input.json`)
// - command-line flags
// - the JSON body of `POST /analyze`
//
// JSON keys are camelCase (startUrl, maxPages, ...) so existing input files
// and API clients keep working. Missing keys fall back to the defaults below.
// =============================================================================

use crate::error::ConfigError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; SEO-Headings-Analyzer/1.0)";

/// Everything a single analysis run needs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisConfig {
    /// Seed URL; required, checked by `validate`
    #[serde(default)]
    pub start_url: Option<String>,

    /// Follow same-domain links. When false only the seed page is analyzed.
    #[serde(default)]
    pub crawl_urls: bool,

    /// Page budget when crawling is enabled
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout_ms", alias = "timeout")]
    pub timeout_ms: u64,

    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    #[serde(flatten)]
    pub output: OutputOptions,
}

/// Controls which optional fields appear in each page result
///
/// Every option only affects *presence* in the report: a disabled field is
/// serialized as `null`. Scoring and issue detection always run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputOptions {
    /// Include the h1..h6 text lists
    #[serde(default = "default_true")]
    pub include_heading_text: bool,

    /// Include the ordered `headingStructure` list
    #[serde(default = "default_true")]
    pub include_heading_structure: bool,

    /// Include `headingScore` (and the score-based recommendation)
    #[serde(default = "default_true")]
    pub include_heading_score: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            include_heading_text: true,
            include_heading_structure: true,
            include_heading_score: true,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            start_url: None,
            crawl_urls: false,
            max_pages: default_max_pages(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            max_redirects: default_max_redirects(),
            output: OutputOptions::default(),
        }
    }
}

impl AnalysisConfig {
    /// Loads a config from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display()))?;
        let config = serde_json::from_str(&contents)
            .with_context(|| format!("invalid JSON in {}", path.display()))?;
        Ok(config)
    }

    /// Checks the seed URL and returns it parsed
    ///
    /// Must pass before any crawl is attempted.
    pub fn validate(&self) -> Result<Url, ConfigError> {
        let raw = match self.start_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url,
            _ => return Err(ConfigError::MissingStartUrl),
        };

        let parsed = Url::parse(raw).map_err(|e| ConfigError::InvalidStartUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(ConfigError::InvalidStartUrl {
                url: raw.to_string(),
                reason: "expected an http(s) URL with a host".to_string(),
            });
        }

        Ok(parsed)
    }

    /// Number of pages the crawl loop may process
    ///
    /// Crawling disabled means exactly one page, whatever max_pages says.
    pub fn effective_max_pages(&self) -> usize {
        if self.crawl_urls {
            self.max_pages
        } else {
            1
        }
    }
}

fn default_max_pages() -> usize {
    2
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_max_redirects() -> usize {
    5
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_minimal_json() {
        let config: AnalysisConfig =
            serde_json::from_str(r#"{"startUrl": "https://example.com"}"#).unwrap();
        assert_eq!(config.start_url.as_deref(), Some("https://example.com"));
        assert!(!config.crawl_urls);
        assert_eq!(config.max_pages, 2);
        assert_eq!(config.timeout_ms, 10_000);
        assert_eq!(config.max_redirects, 5);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.output, OutputOptions::default());
    }

    #[test]
    fn test_camel_case_keys_and_timeout_alias() {
        let config: AnalysisConfig = serde_json::from_str(
            r#"{
                "startUrl": "https://example.com",
                "crawlUrls": true,
                "maxPages": 7,
                "timeout": 2500,
                "includeHeadingText": false
            }"#,
        )
        .unwrap();
        assert!(config.crawl_urls);
        assert_eq!(config.max_pages, 7);
        assert_eq!(config.timeout_ms, 2500);
        assert!(!config.output.include_heading_text);
        assert!(config.output.include_heading_structure);
    }

    #[test]
    fn test_missing_start_url_is_rejected() {
        let config = AnalysisConfig::default();
        assert!(matches!(config.validate(), Err(ConfigError::MissingStartUrl)));

        let blank = AnalysisConfig {
            start_url: Some("   ".into()),
            ..AnalysisConfig::default()
        };
        assert!(matches!(blank.validate(), Err(ConfigError::MissingStartUrl)));
    }

    #[test]
    fn test_invalid_start_url_is_rejected() {
        for bad in ["not a url", "ftp://example.com/file", "mailto:me@example.com"] {
            let config = AnalysisConfig {
                start_url: Some(bad.into()),
                ..AnalysisConfig::default()
            };
            assert!(
                matches!(config.validate(), Err(ConfigError::InvalidStartUrl { .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_effective_max_pages() {
        let mut config = AnalysisConfig {
            max_pages: 10,
            ..AnalysisConfig::default()
        };
        assert_eq!(config.effective_max_pages(), 1);
        config.crawl_urls = true;
        assert_eq!(config.effective_max_pages(), 10);
    }
}
