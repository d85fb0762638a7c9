// src/services/cafe.rs

//! Cafe board and keyword-search crawler.
//!
//! Drives the cafe board-list API (or search API) page by page, fetches
//! each article's detail and comments, and snapshots results per page plus
//! a cumulative file after every page.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use reqwest::Client;

use crate::config::{CafeScope, CafeTarget, Config};
use crate::error::{AppError, Result};
use crate::models::api::{ArticleDetailResponse, ArticleListResponse};
use crate::models::{Comment, PostDetail, PostSummary};
use crate::services::CrawlOutcome;
use crate::storage::JsonStorage;
use crate::utils::{clean_text, encode_component, format_epoch_millis, http};

const WEB_BASE: &str = "https://cafe.naver.com";

/// Results of the detail fetches for one listing page.
#[derive(Debug, Default)]
struct PageDetails {
    posts: Vec<PostDetail>,
    total: usize,
    failures: usize,
}

/// Crawler for one cafe target.
pub struct CafeCrawler {
    config: Arc<Config>,
    target: CafeTarget,
    client: Client,
    api_base: String,
}

impl CafeCrawler {
    /// Create a new cafe crawler with the given configuration and target.
    pub fn new(config: Arc<Config>, target: CafeTarget) -> Result<Self> {
        let headers = http::cafe_headers(&target.cookie)?;
        let client = http::create_client(&config.crawler, headers)?;

        Ok(Self {
            config,
            target,
            client,
            api_base: "https://apis.naver.com".to_string(),
        })
    }

    /// Point the crawler at a different API host (used by tests).
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    fn list_url(&self, page: usize) -> String {
        match &self.target.scope {
            CafeScope::Board(board_id) => format!(
                "{}/cafe-web/cafe-boardlist-api/v1/cafes/{}/menus/{}/articles\
                 ?page={}&pageSize={}&sortBy=TIME&viewType=L",
                self.api_base, self.target.cafe_id, board_id, page, self.target.page_size
            ),
            CafeScope::Search(keyword) => format!(
                "{}/cafe-web/cafe-search-api/v1/cafes/{}/articles\
                 ?query={}&page={}&pageSize={}&sortBy=TIME",
                self.api_base,
                self.target.cafe_id,
                encode_component(keyword),
                page,
                self.target.page_size
            ),
        }
    }

    fn detail_url(&self, article_id: &str) -> String {
        format!(
            "{}/cafe-web/cafe-articleapi/v3/cafes/{}/articles/{}\
             ?query=&useCafeId=true&requestFrom=A",
            self.api_base, self.target.cafe_id, article_id
        )
    }

    fn post_url(&self, article_id: i64) -> String {
        format!("{}/{}/{}", WEB_BASE, self.target.cafe_id, article_id)
    }

    /// Fetch one listing page.
    ///
    /// Returns the post summaries plus the last page number the source
    /// reports as navigable.
    pub async fn fetch_page(&self, page: usize) -> Result<(Vec<PostSummary>, usize)> {
        http::polite_delay(&self.config.crawler).await;

        let url = self.list_url(page);
        let response = self.client.get(&url).send().await?.error_for_status()?;
        let decoded: ArticleListResponse = response.json().await?;

        let last_page = decoded.result.page_info.last_navigation_page_number.max(0) as usize;

        let summaries = decoded
            .result
            .article_list
            .into_iter()
            .filter(|entry| entry.kind == "ARTICLE")
            .map(|entry| PostSummary {
                id: entry.item.article_id.to_string(),
                title: clean_text(&entry.item.subject),
                write_date: format_epoch_millis(entry.item.write_date_timestamp),
                url: self.post_url(entry.item.article_id),
            })
            .collect();

        Ok((summaries, last_page))
    }

    /// Fetch a single article's body and comments.
    pub async fn fetch_detail(&self, summary: &PostSummary) -> Result<PostDetail> {
        http::polite_delay(&self.config.crawler).await;

        let url = self.detail_url(&summary.id);
        let response = self.client.get(&url).send().await?.error_for_status()?;
        let decoded: ArticleDetailResponse = response.json().await?;

        let article = decoded.result.article;
        let comments = decoded
            .result
            .comments
            .items
            .into_iter()
            .map(|comment| Comment {
                id: comment.id,
                content: comment.content,
                writer: comment.writer.nick_name,
                writer_level: comment.writer.member_level_name,
                write_date: format_epoch_millis(comment.write_date),
                like_count: comment.like_count,
            })
            .collect();

        let detail = PostDetail {
            id: if article.id != 0 {
                article.id.to_string()
            } else {
                summary.id.clone()
            },
            title: clean_text(&article.subject),
            content: article.content_html,
            writer: article.writer.nick_name,
            writer_level: article.writer.member_level_name,
            write_date: format_epoch_millis(article.write_date),
            url: summary.url.clone(),
            comment_count: article.comment_count,
            read_count: article.read_count,
            like_count: article.like_count,
            comments,
        };

        if !detail.is_extracted() {
            return Err(AppError::extract(
                format!("article {}", summary.id),
                "both title and content are empty",
            ));
        }

        Ok(detail)
    }

    /// Fetch details for one page of summaries under bounded concurrency.
    ///
    /// Failed items are logged and skipped; results arrive in completion
    /// order.
    async fn fetch_page_details(&self, summaries: Vec<PostSummary>) -> PageDetails {
        let concurrency = self.config.crawler.max_concurrent.max(1);
        let mut details = PageDetails {
            total: summaries.len(),
            ..PageDetails::default()
        };

        let mut detail_stream = stream::iter(summaries)
            .map(|summary| async move {
                let result = self.fetch_detail(&summary).await;
                (summary, result)
            })
            .buffer_unordered(concurrency);

        while let Some((summary, result)) = detail_stream.next().await {
            match result {
                Ok(post) => details.posts.push(post),
                Err(error) => {
                    details.failures += 1;
                    log::warn!("Skipping article {}: {}", summary.id, error);
                }
            }
        }

        details
    }

    /// Crawl the target board or search results.
    ///
    /// Page 1 is fetched first to learn the reported last page; the crawl
    /// covers `min(max_pages, last_page)` pages. Remaining pages are
    /// processed under bounded concurrency, each page snapshotted as it
    /// completes along with the growing cumulative snapshot. A failed page
    /// is logged and skipped; only page 1 failing is fatal.
    pub async fn crawl(&self, storage: &JsonStorage) -> Result<CrawlOutcome> {
        log::info!("Loading first page...");
        let (first_summaries, last_page) = self
            .fetch_page(1)
            .await
            .map_err(|e| AppError::api("cafe listing page 1", e))?;
        log::info!(
            "First page loaded ({} posts, {} pages reported)",
            first_summaries.len(),
            last_page
        );

        let pages_to_crawl = if self.target.max_pages > 0 {
            self.target.max_pages.min(last_page.max(1))
        } else {
            last_page.max(1)
        };
        log::info!(
            "Crawling {} of {} pages ({} posts per page, {} pages in flight)",
            pages_to_crawl,
            last_page,
            self.target.page_size,
            self.config.crawler.page_concurrency
        );

        let mut outcome = CrawlOutcome {
            page_total: pages_to_crawl,
            ..CrawlOutcome::default()
        };
        let mut all_posts: Vec<PostDetail> = Vec::new();

        let first_details = self.fetch_page_details(first_summaries).await;
        self.record_page(1, first_details, &mut outcome, &mut all_posts, storage)
            .await;

        let page_concurrency = self.config.crawler.page_concurrency.max(1);
        let mut page_stream = stream::iter(2..=pages_to_crawl)
            .map(|page| async move {
                let result = match self.fetch_page(page).await {
                    Ok((summaries, _)) => Ok(self.fetch_page_details(summaries).await),
                    Err(error) => Err(error),
                };
                (page, result)
            })
            .buffer_unordered(page_concurrency);

        while let Some((page, result)) = page_stream.next().await {
            match result {
                Ok(details) => {
                    self.record_page(page, details, &mut outcome, &mut all_posts, storage)
                        .await;
                }
                Err(error) => {
                    outcome.page_failures += 1;
                    log::warn!("Skipping page {page}: {error}");
                }
            }
        }

        log::info!(
            "Crawl finished: {} posts collected, {} pages and {} details skipped",
            all_posts.len(),
            outcome.page_failures,
            outcome.detail_failures
        );

        outcome.posts = all_posts;
        Ok(outcome)
    }

    /// Tally one completed page and write its snapshots.
    ///
    /// Snapshot write failures are logged, not fatal: the crawl already
    /// holds the data in memory and keeps going.
    async fn record_page(
        &self,
        page: usize,
        details: PageDetails,
        outcome: &mut CrawlOutcome,
        all_posts: &mut Vec<PostDetail>,
        storage: &JsonStorage,
    ) {
        outcome.detail_total += details.total;
        outcome.detail_failures += details.failures;

        if let Err(error) = storage.write_page(page, &details.posts).await {
            log::warn!("Failed to save page {page} snapshot: {error}");
        }

        all_posts.extend(details.posts);

        if let Err(error) = storage.write_full(all_posts).await {
            log::warn!("Failed to update cumulative snapshot: {error}");
        }

        log::info!(
            "Page {page} done ({} posts so far)",
            all_posts.len()
        );
    }
}
