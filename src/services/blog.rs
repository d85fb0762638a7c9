// src/services/blog.rs

//! Blog title-list and post-page crawler.
//!
//! The title-list endpoint returns single-quoted pseudo-JSON with
//! percent-encoded titles; post pages are plain HTML behind a frame,
//! extracted with selector fallback chains.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use reqwest::Client;
use reqwest::header::HeaderMap;
use scraper::{Html, Selector};
use url::Url;

use crate::config::{BlogTarget, Config};
use crate::error::{AppError, Result};
use crate::models::api::BlogTitleListResponse;
use crate::models::{PostDetail, PostSummary};
use crate::services::CrawlOutcome;
use crate::storage::JsonStorage;
use crate::utils::{clean_text, decode_component, http};

/// Crawler for one blog target.
pub struct BlogCrawler {
    config: Arc<Config>,
    target: BlogTarget,
    client: Client,
    base: String,
}

impl BlogCrawler {
    /// Create a new blog crawler with the given configuration and target.
    pub fn new(config: Arc<Config>, target: BlogTarget) -> Result<Self> {
        let client = http::create_client(&config.crawler, HeaderMap::new())?;

        Ok(Self {
            config,
            target,
            client,
            base: "https://blog.naver.com".to_string(),
        })
    }

    /// Create a crawler for URL-list mode, where no blog id is involved.
    pub fn for_urls(config: Arc<Config>) -> Result<Self> {
        Self::new(config, BlogTarget::default())
    }

    /// Point the crawler at a different host (used by tests).
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    fn list_url(&self, page: usize) -> String {
        format!(
            "{}/PostTitleListAsync.naver?blogId={}&viewdate=&currentPage={}\
             &categoryNo={}&parentCategoryNo=0&countPerPage={}",
            self.base,
            self.target.blog_id,
            page,
            self.target.category_no,
            self.target.count_per_page
        )
    }

    /// Fetch one title-list page as post summaries.
    pub async fn fetch_page(&self, page: usize) -> Result<Vec<PostSummary>> {
        http::polite_delay(&self.config.crawler).await;

        let url = self.list_url(page);
        let body = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let decoded = BlogTitleListResponse::from_lenient_json(&body)?;
        if !decoded.is_success() {
            return Err(AppError::api(
                format!("blog list page {page}"),
                if decoded.result_message.is_empty() {
                    format!("result code {}", decoded.result_code)
                } else {
                    decoded.result_message.clone()
                },
            ));
        }

        let summaries = decoded
            .post_list
            .into_iter()
            .map(|post| PostSummary {
                url: format!("{}/{}/{}", self.base, self.target.blog_id, post.log_no),
                id: post.log_no,
                title: clean_text(&decode_component(&post.title)),
                write_date: post.add_date,
            })
            .collect();

        Ok(summaries)
    }

    /// Crawl the blog's title list page by page.
    ///
    /// Pages are fetched sequentially; a failed or empty page is logged and
    /// skipped. Writes a snapshot per page and a cumulative snapshot at the
    /// end.
    pub async fn crawl(&self, storage: &JsonStorage) -> Result<Vec<PostSummary>> {
        log::info!(
            "Crawling blog '{}' ({} pages, {} posts per page)",
            self.target.blog_id,
            self.target.max_pages,
            self.target.count_per_page
        );

        let mut all_posts = Vec::new();

        for page in 1..=self.target.max_pages.max(1) {
            match self.fetch_page(page).await {
                Ok(posts) if posts.is_empty() => {
                    log::warn!("No posts found on page {page}");
                }
                Ok(posts) => {
                    log::info!("Collected {} posts from page {page}", posts.len());
                    if let Err(error) = storage.write_page(page, &posts).await {
                        log::warn!("Failed to save page {page} snapshot: {error}");
                    }
                    all_posts.extend(posts);
                }
                Err(error) => {
                    log::warn!("Skipping page {page}: {error}");
                }
            }
        }

        if all_posts.is_empty() {
            log::warn!("No posts collected; check the blog id");
        } else {
            storage.write_full(&all_posts).await?;
        }

        log::info!(
            "Blog '{}' crawl finished: {} posts collected",
            self.target.blog_id,
            all_posts.len()
        );
        Ok(all_posts)
    }

    /// Fetch a single blog post page and extract its fields.
    ///
    /// The standard blog layout wraps the post in a frame; when present it
    /// is followed once before extraction. An empty title AND empty body is
    /// an extraction failure.
    pub async fn fetch_post(&self, url: &str) -> Result<PostDetail> {
        http::polite_delay(&self.config.crawler).await;

        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let frame_src = {
            let document = Html::parse_document(&body);
            let frame_selector = Selector::parse("iframe#mainFrame")
                .map_err(|e| AppError::selector("iframe#mainFrame", format!("{e:?}")))?;
            document
                .select(&frame_selector)
                .next()
                .and_then(|frame| frame.value().attr("src"))
                .map(str::to_string)
        };

        let body = match frame_src {
            Some(src) => {
                let frame_url = Url::parse(url)?.join(&src)?;
                self.client
                    .get(frame_url)
                    .send()
                    .await?
                    .error_for_status()?
                    .text()
                    .await?
            }
            None => body,
        };

        let selectors = &self.config.blog_selectors;
        let document = Html::parse_document(&body);
        let detail = PostDetail {
            id: post_id_from_url(url),
            title: selectors.title.first_match(&document)?.unwrap_or_default(),
            content: selectors.body.first_match(&document)?.unwrap_or_default(),
            writer: selectors.writer.first_match(&document)?.unwrap_or_default(),
            write_date: selectors.date.first_match(&document)?.unwrap_or_default(),
            url: url.to_string(),
            ..PostDetail::default()
        };

        if !detail.is_extracted() {
            return Err(AppError::extract(url, "no selector matched title or content"));
        }

        Ok(detail)
    }

    /// Fetch a list of post URLs under bounded concurrency.
    ///
    /// Failed URLs are logged and skipped; results arrive in completion
    /// order. Writes one snapshot of all successful posts.
    pub async fn crawl_urls(
        &self,
        urls: Vec<String>,
        storage: &JsonStorage,
    ) -> Result<CrawlOutcome> {
        let concurrency = self.config.crawler.max_concurrent.max(1);
        let total = urls.len();
        log::info!("Fetching {total} posts ({concurrency} in flight)");

        let mut outcome = CrawlOutcome {
            detail_total: total,
            ..CrawlOutcome::default()
        };

        let mut post_stream = stream::iter(urls.into_iter().enumerate())
            .map(move |(index, url)| async move {
                log::info!("[{}/{}] fetching {}", index + 1, total, url);
                let result = self.fetch_post(&url).await;
                (url, result)
            })
            .buffer_unordered(concurrency);

        while let Some((url, result)) = post_stream.next().await {
            match result {
                Ok(post) => outcome.posts.push(post),
                Err(error) => {
                    outcome.detail_failures += 1;
                    log::warn!("Skipping {url}: {error}");
                }
            }
        }

        storage.write_full(&outcome.posts).await?;

        log::info!(
            "URL crawl finished: {} posts collected, {} skipped",
            outcome.posts.len(),
            outcome.detail_failures
        );
        Ok(outcome)
    }
}

/// Derive a post id from the trailing path segment of its URL.
fn post_id_from_url(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| {
            parsed
                .path_segments()
                .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
                .map(str::to_string)
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_crawler() -> BlogCrawler {
        let target = BlogTarget {
            blog_id: "someblog".to_string(),
            category_no: 25,
            count_per_page: 5,
            max_pages: 10,
        };
        BlogCrawler::new(Arc::new(Config::default()), target).unwrap()
    }

    #[test]
    fn test_list_url() {
        let url = test_crawler().list_url(3);
        assert!(url.starts_with("https://blog.naver.com/PostTitleListAsync.naver"));
        assert!(url.contains("blogId=someblog"));
        assert!(url.contains("currentPage=3"));
        assert!(url.contains("categoryNo=25"));
        assert!(url.contains("countPerPage=5"));
    }

    #[test]
    fn test_post_id_from_url() {
        assert_eq!(
            post_id_from_url("https://blog.naver.com/someblog/223000000001"),
            "223000000001"
        );
        assert_eq!(
            post_id_from_url("https://blog.naver.com/someblog/223000000001/"),
            "223000000001"
        );
        assert_eq!(post_id_from_url("not a url"), "");
    }
}
