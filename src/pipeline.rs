// src/pipeline.rs

//! Pipeline entry points wiring targets, crawlers and storage together.
//!
//! - `run_cafe`: crawl a cafe board or keyword search results
//! - `run_blog`: crawl a blog's title list
//! - `run_urls`: crawl a newline-delimited list of post URLs

use std::path::Path;
use std::sync::Arc;

use crate::config::{BlogTarget, CafeTarget, Config};
use crate::error::{AppError, Result};
use crate::services::{BlogCrawler, CafeCrawler};
use crate::storage::JsonStorage;
use crate::utils::truncate;

/// Crawl a cafe board or keyword search results.
///
/// The target comes from environment variables; missing identifiers or
/// cookie abort the run.
pub async fn run_cafe(config: Arc<Config>) -> Result<()> {
    let target = CafeTarget::from_env()?;
    let storage = JsonStorage::create(&config.output.dir, target.label()).await?;
    let crawler = CafeCrawler::new(Arc::clone(&config), target)?;

    let outcome = crawler.crawl(&storage).await?;

    log::info!(
        "Collected {} posts ({}/{} pages ok, {}/{} details ok)",
        outcome.posts.len(),
        outcome.page_total - outcome.page_failures,
        outcome.page_total,
        outcome.detail_total - outcome.detail_failures,
        outcome.detail_total
    );
    log::info!("Snapshots written under {}", config.output.dir);

    for post in outcome.posts.iter().take(10) {
        log::info!(
            "  [{}] {} ({} comments)",
            post.id,
            truncate(&post.title, 40),
            post.comments.len()
        );
    }

    Ok(())
}

/// Crawl a blog's title list.
pub async fn run_blog(config: Arc<Config>) -> Result<()> {
    let target = BlogTarget::from_env()?;
    let storage = JsonStorage::create(&config.output.dir, target.label()).await?;
    let crawler = BlogCrawler::new(Arc::clone(&config), target)?;

    let posts = crawler.crawl(&storage).await?;

    log::info!("Collected {} posts", posts.len());
    for post in posts.iter().take(10) {
        log::info!(
            "  [{}] {} | {}",
            post.write_date,
            truncate(&post.title, 40),
            post.url
        );
    }

    Ok(())
}

/// Crawl a newline-delimited list of post URLs.
pub async fn run_urls(config: Arc<Config>, file: &Path) -> Result<()> {
    let urls = read_url_list(file).await?;
    if urls.is_empty() {
        return Err(AppError::config(format!(
            "no URLs found in {}",
            file.display()
        )));
    }
    log::info!("Loaded {} URLs from {}", urls.len(), file.display());

    let storage = JsonStorage::create(&config.output.dir, "blog_urls").await?;
    let crawler = BlogCrawler::for_urls(Arc::clone(&config))?;

    let outcome = crawler.crawl_urls(urls, &storage).await?;

    log::info!(
        "Collected {}/{} posts",
        outcome.posts.len(),
        outcome.detail_total
    );

    Ok(())
}

/// Read a newline-delimited URL list, skipping blank lines.
async fn read_url_list(path: &Path) -> Result<Vec<String>> {
    let content = tokio::fs::read_to_string(path).await?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
