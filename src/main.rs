// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (env_logger, RUST_LOG overrides the default "info")
// 2. Parse command-line arguments using clap
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code (0 = success, 2 = error)
//
// Logs go to stderr so `analyze --json` can be piped straight into jq.
// =============================================================================

mod analysis; // src/analysis/ - heading scoring, issues, recommendations
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - run configuration
mod crawl; // src/crawl/ - URL normalization, fetching, the crawl loop
mod error; // src/error.rs - typed errors
mod extract; // src/extract/ - HTML heading and link extraction
mod report; // src/report/ - page results, domain statistics, output
mod server; // src/server.rs - HTTP API

use anyhow::{Context, Result};
use clap::Parser;
use cli::{AnalyzeArgs, Cli, Commands};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            log::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = analysis finished (page-level failures included)
//   Err = invalid input or a failure that aborted the run
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze(args) => handle_analyze(&args).await,
        Commands::Serve { bind } => {
            server::serve(&bind).await?;
            Ok(0)
        }
    }
}

async fn handle_analyze(args: &AnalyzeArgs) -> Result<i32> {
    let config = args.to_config()?;
    log::debug!("Input: {}", serde_json::to_string_pretty(&config)?);

    let report = crawl::run_analysis(&config).await?;

    if let Some(path) = &args.output {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        log::info!("Report written to {}", path.display());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report::print_table(&report);
    }

    Ok(0)
}
