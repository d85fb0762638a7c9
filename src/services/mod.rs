// src/services/mod.rs

//! Crawler services for the supported Naver sources.

pub mod blog;
pub mod cafe;

pub use blog::BlogCrawler;
pub use cafe::CafeCrawler;

use crate::models::PostDetail;

/// Summary of a crawl run.
#[derive(Debug, Default)]
pub struct CrawlOutcome {
    /// Successfully fetched posts, in completion order
    pub posts: Vec<PostDetail>,

    /// Listing pages attempted
    pub page_total: usize,

    /// Listing pages skipped because fetch or decode failed
    pub page_failures: usize,

    /// Detail fetches attempted
    pub detail_total: usize,

    /// Detail fetches skipped because fetch or extraction failed
    pub detail_failures: usize,
}
