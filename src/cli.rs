// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two subcommands:
// - analyze: crawl a site once and print (or save) the report
// - serve: run the HTTP API
//
// The analyze flags map one-to-one onto AnalysisConfig, so a run can be
// described either with flags or with a JSON input file.
// =============================================================================

use crate::config::{AnalysisConfig, OutputOptions, DEFAULT_USER_AGENT};
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "heading-scout",
    version,
    about = "Crawl a website and score its HTML heading structure for SEO",
    long_about = "heading-scout fetches pages from a start URL, extracts the h1-h6 headings, \
                  scores their structure and reports issues and recommendations per page \
                  and for the whole domain."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a website's heading structure
    ///
    /// Example: heading-scout analyze https://example.com --crawl --max-pages 10
    Analyze(AnalyzeArgs),

    /// Serve the analysis over HTTP (GET /health, POST /analyze)
    ///
    /// Example: heading-scout serve --bind 0.0.0.0:3002
    Serve {
        /// Address to bind the HTTP server to (host:port)
        #[arg(long, env = "HEADING_SCOUT_BIND", default_value = "127.0.0.1:3002")]
        bind: String,
    },
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// URL to start from (overrides startUrl from --input)
    pub start_url: Option<String>,

    /// Read the run configuration from a JSON file (camelCase keys)
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Follow same-domain links instead of analyzing only the start page
    #[arg(long)]
    pub crawl: bool,

    /// Maximum number of pages to analyze when crawling
    #[arg(long, default_value_t = 2)]
    pub max_pages: usize,

    /// User-Agent header sent with every request
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Per-request timeout in milliseconds
    #[arg(long, default_value_t = 10_000)]
    pub timeout_ms: u64,

    /// Maximum redirects to follow per request
    #[arg(long, default_value_t = 5)]
    pub max_redirects: usize,

    /// Leave the h1..h6 text lists out of the report
    #[arg(long)]
    pub no_heading_text: bool,

    /// Leave the ordered heading structure out of the report
    #[arg(long)]
    pub no_heading_structure: bool,

    /// Leave the heading score out of the report
    #[arg(long)]
    pub no_heading_score: bool,

    /// Print the JSON report instead of a table
    #[arg(long)]
    pub json: bool,

    /// Also write the JSON report to this file
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

impl AnalyzeArgs {
    /// Builds the run configuration
    ///
    /// With --input, the file is the base and only the positional URL
    /// overrides it. Without it, the flags are the configuration.
    pub fn to_config(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.input {
            Some(path) => AnalysisConfig::from_file(path)?,
            None => AnalysisConfig {
                start_url: None,
                crawl_urls: self.crawl,
                max_pages: self.max_pages,
                user_agent: self.user_agent.clone(),
                timeout_ms: self.timeout_ms,
                max_redirects: self.max_redirects,
                output: OutputOptions {
                    include_heading_text: !self.no_heading_text,
                    include_heading_structure: !self.no_heading_structure,
                    include_heading_score: !self.no_heading_score,
                },
            },
        };

        if let Some(url) = &self.start_url {
            config.start_url = Some(url.clone());
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_analyze_flags_to_config() {
        let cli = Cli::parse_from([
            "heading-scout",
            "analyze",
            "https://example.com",
            "--crawl",
            "--max-pages",
            "5",
            "--no-heading-text",
        ]);
        let Commands::Analyze(args) = cli.command else {
            panic!("expected analyze subcommand");
        };
        let config = args.to_config().unwrap();
        assert_eq!(config.start_url.as_deref(), Some("https://example.com"));
        assert!(config.crawl_urls);
        assert_eq!(config.max_pages, 5);
        assert_eq!(config.effective_max_pages(), 5);
        assert!(!config.output.include_heading_text);
        assert!(config.output.include_heading_score);
    }

    #[test]
    fn test_input_file_with_url_override() {
        let path = std::env::temp_dir().join(format!("heading-scout-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{"startUrl": "https://from-file.example", "crawlUrls": true, "maxPages": 4}"#,
        )
        .unwrap();

        let cli = Cli::parse_from([
            "heading-scout",
            "analyze",
            "https://override.example",
            "--input",
            path.to_str().unwrap(),
        ]);
        let Commands::Analyze(args) = cli.command else {
            panic!("expected analyze subcommand");
        };
        let config = args.to_config().unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.start_url.as_deref(), Some("https://override.example"));
        assert!(config.crawl_urls);
        assert_eq!(config.max_pages, 4);
    }

    #[test]
    fn test_serve_default_bind() {
        let cli = Cli::parse_from(["heading-scout", "serve"]);
        match cli.command {
            Commands::Serve { bind } => assert!(bind.ends_with(":3002")),
            other => panic!("unexpected command {:?}", other),
        }
    }
}
