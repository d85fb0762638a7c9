//! Naver Crawler CLI
//!
//! Crawl targets and credentials come from environment variables (a `.env`
//! file is honored); behavior settings from an optional TOML config.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use naver_crawler::{config::Config, error::Result, pipeline};

/// Naver cafe/blog crawler
#[derive(Parser, Debug)]
#[command(
    name = "naver-crawler",
    version,
    about = "Crawls Naver cafe boards and blogs into JSON snapshots"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Output directory for snapshots (overrides config)
    #[arg(short, long)]
    output: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl a cafe board, or keyword search results when
    /// NAVER_SEARCH_KEYWORD is set
    Cafe,

    /// Crawl a blog's title list (title, date, URL per post)
    Blog,

    /// Crawl full posts from a newline-delimited URL list file
    Urls {
        /// Path to the URL list
        #[arg(default_value = "urls.txt")]
        file: PathBuf,

        /// Concurrent fetches (overrides config)
        #[arg(long)]
        concurrency: Option<usize>,
    },
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);
    if let Some(dir) = cli.output {
        config.output.dir = dir;
    }
    if let Command::Urls {
        concurrency: Some(concurrency),
        ..
    } = &cli.command
    {
        config.crawler.max_concurrent = *concurrency;
    }
    config.validate()?;

    let config = Arc::new(config);

    match cli.command {
        Command::Cafe => pipeline::run_cafe(config).await?,
        Command::Blog => pipeline::run_blog(config).await?,
        Command::Urls { file, .. } => pipeline::run_urls(config, &file).await?,
    }

    log::info!("Done!");

    Ok(())
}
