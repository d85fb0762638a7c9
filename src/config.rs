// src/config.rs

//! Application configuration.
//!
//! Behavior settings (HTTP, politeness window, concurrency, output dir,
//! selector chains) come from an optional TOML file. Crawl targets and
//! credentials come from environment variables, with `.env` honored by the
//! CLI before anything reads them.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::BlogSelectors;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and crawling behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Snapshot output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Selector fallback chains for blog post pages
    #[serde(default)]
    pub blog_selectors: BlogSelectors,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::config("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::config("crawler.timeout_secs must be > 0"));
        }
        if self.crawler.max_concurrent == 0 {
            return Err(AppError::config("crawler.max_concurrent must be > 0"));
        }
        if self.crawler.page_concurrency == 0 {
            return Err(AppError::config("crawler.page_concurrency must be > 0"));
        }
        if self.crawler.delay_max_ms < self.crawler.delay_min_ms {
            return Err(AppError::config(
                "crawler.delay_max_ms must be >= crawler.delay_min_ms",
            ));
        }
        if self.output.dir.trim().is_empty() {
            return Err(AppError::config("output.dir is empty"));
        }
        if self.blog_selectors.title.is_empty() || self.blog_selectors.body.is_empty() {
            return Err(AppError::config(
                "blog_selectors.title and blog_selectors.body must not be empty",
            ));
        }
        Ok(())
    }
}

/// HTTP client and crawling behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Lower bound of the randomized politeness delay, in milliseconds
    #[serde(default = "defaults::delay_min")]
    pub delay_min_ms: u64,

    /// Upper bound of the randomized politeness delay, in milliseconds
    #[serde(default = "defaults::delay_max")]
    pub delay_max_ms: u64,

    /// Maximum concurrent detail/URL fetches
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,

    /// Maximum concurrently processed listing pages
    #[serde(default = "defaults::page_concurrency")]
    pub page_concurrency: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            delay_min_ms: defaults::delay_min(),
            delay_max_ms: defaults::delay_max(),
            max_concurrent: defaults::max_concurrent(),
            page_concurrency: defaults::page_concurrency(),
        }
    }
}

/// Snapshot output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory for JSON snapshot files
    #[serde(default = "defaults::output_dir")]
    pub dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: defaults::output_dir(),
        }
    }
}

mod defaults {
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
         (KHTML, like Gecko) Chrome/136.0.0.0 Safari/537.36"
            .into()
    }
    pub fn timeout() -> u64 {
        10
    }
    pub fn delay_min() -> u64 {
        1000
    }
    pub fn delay_max() -> u64 {
        3000
    }
    pub fn max_concurrent() -> usize {
        3
    }
    pub fn page_concurrency() -> usize {
        3
    }
    pub fn output_dir() -> String {
        "output".into()
    }
}

// --- Crawl targets (environment-driven) ---

/// What to crawl within a cafe: a board, or keyword search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CafeScope {
    Board(String),
    Search(String),
}

/// A cafe crawl target.
#[derive(Debug, Clone)]
pub struct CafeTarget {
    pub cafe_id: String,
    pub cookie: String,
    pub scope: CafeScope,

    /// Page limit; 0 means crawl up to the reported last page
    pub max_pages: usize,
    pub page_size: usize,
}

impl CafeTarget {
    /// Build a target from process environment variables.
    ///
    /// `NAVER_CAFE_ID` and `NAVER_COOKIE` are required, plus one of
    /// `NAVER_SEARCH_KEYWORD` or `NAVER_CAFE_BOARD_ID` (keyword wins).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let cafe_id = required(&get, "NAVER_CAFE_ID")?;
        let cookie = required(&get, "NAVER_COOKIE")?;

        let scope = match optional(&get, "NAVER_SEARCH_KEYWORD") {
            Some(keyword) => CafeScope::Search(keyword),
            None => match optional(&get, "NAVER_CAFE_BOARD_ID") {
                Some(board_id) => CafeScope::Board(board_id),
                None => {
                    return Err(AppError::config(
                        "set NAVER_CAFE_BOARD_ID or NAVER_SEARCH_KEYWORD",
                    ));
                }
            },
        };

        Ok(Self {
            cafe_id,
            cookie,
            scope,
            max_pages: parsed(&get, "NAVER_MAX_PAGES", 10)?,
            page_size: parsed(&get, "NAVER_PAGE_SIZE", 15)?,
        })
    }

    /// Snapshot filename label for this target.
    pub fn label(&self) -> String {
        match &self.scope {
            CafeScope::Board(board_id) => format!("cafe_{}_board_{}", self.cafe_id, board_id),
            CafeScope::Search(keyword) => format!("cafe_{}_search_{}", self.cafe_id, keyword),
        }
    }
}

/// A blog crawl target.
#[derive(Debug, Clone, Default)]
pub struct BlogTarget {
    pub blog_id: String,
    pub category_no: i64,
    pub count_per_page: usize,
    pub max_pages: usize,
}

impl BlogTarget {
    /// Build a target from process environment variables.
    ///
    /// `NAVER_BLOG_ID` is required.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            blog_id: required(&get, "NAVER_BLOG_ID")?,
            category_no: parsed(&get, "NAVER_BLOG_CATEGORY_NO", 0)?,
            count_per_page: parsed(&get, "NAVER_COUNT_PER_PAGE", 5)?,
            max_pages: parsed(&get, "NAVER_MAX_PAGES", 10)?,
        })
    }

    /// Snapshot filename label for this target.
    pub fn label(&self) -> String {
        format!("blog_{}", self.blog_id)
    }
}

fn optional(get: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    get(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(get: &impl Fn(&str) -> Option<String>, name: &str) -> Result<String> {
    optional(get, name)
        .ok_or_else(|| AppError::config(format!("{name} environment variable is not set")))
}

fn parsed<T: FromStr>(get: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> Result<T> {
    match optional(get, name) {
        Some(value) => value
            .parse()
            .map_err(|_| AppError::config(format!("{name} is not a valid number: {value}"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |name| map.get(name).map(|v| v.to_string())
    }

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_concurrency() {
        let mut config = Config::default();
        config.crawler.max_concurrent = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_inverted_delay_window() {
        let mut config = Config::default();
        config.crawler.delay_min_ms = 500;
        config.crawler.delay_max_ms = 100;
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_toml_overrides_defaults() {
        let config: Config = toml::from_str(
            r##"
            [crawler]
            max_concurrent = 8
            delay_min_ms = 0
            delay_max_ms = 0

            [output]
            dir = "snapshots"

            [blog_selectors]
            body = ["#custom-body"]
            "##,
        )
        .unwrap();

        assert_eq!(config.crawler.max_concurrent, 8);
        assert_eq!(config.crawler.timeout_secs, 10);
        assert_eq!(config.output.dir, "snapshots");
        assert_eq!(config.blog_selectors.body.0, vec!["#custom-body"]);
        assert!(!config.blog_selectors.title.is_empty());
    }

    #[test]
    fn cafe_target_board_scope() {
        let target = CafeTarget::from_lookup(lookup(&[
            ("NAVER_CAFE_ID", "12345"),
            ("NAVER_COOKIE", "NID_AUT=x"),
            ("NAVER_CAFE_BOARD_ID", "7"),
            ("NAVER_MAX_PAGES", "3"),
        ]))
        .unwrap();

        assert_eq!(target.cafe_id, "12345");
        assert_eq!(target.scope, CafeScope::Board("7".to_string()));
        assert_eq!(target.max_pages, 3);
        assert_eq!(target.page_size, 15);
        assert_eq!(target.label(), "cafe_12345_board_7");
    }

    #[test]
    fn cafe_target_keyword_wins_over_board() {
        let target = CafeTarget::from_lookup(lookup(&[
            ("NAVER_CAFE_ID", "12345"),
            ("NAVER_COOKIE", "NID_AUT=x"),
            ("NAVER_CAFE_BOARD_ID", "7"),
            ("NAVER_SEARCH_KEYWORD", "모임"),
        ]))
        .unwrap();

        assert_eq!(target.scope, CafeScope::Search("모임".to_string()));
    }

    #[test]
    fn cafe_target_missing_cookie_is_fatal() {
        let result = CafeTarget::from_lookup(lookup(&[
            ("NAVER_CAFE_ID", "12345"),
            ("NAVER_CAFE_BOARD_ID", "7"),
        ]));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn cafe_target_missing_scope_is_fatal() {
        let result = CafeTarget::from_lookup(lookup(&[
            ("NAVER_CAFE_ID", "12345"),
            ("NAVER_COOKIE", "NID_AUT=x"),
        ]));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn cafe_target_rejects_bad_number() {
        let result = CafeTarget::from_lookup(lookup(&[
            ("NAVER_CAFE_ID", "12345"),
            ("NAVER_COOKIE", "NID_AUT=x"),
            ("NAVER_CAFE_BOARD_ID", "7"),
            ("NAVER_MAX_PAGES", "lots"),
        ]));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn blog_target_defaults() {
        let target =
            BlogTarget::from_lookup(lookup(&[("NAVER_BLOG_ID", "someblog")])).unwrap();
        assert_eq!(target.blog_id, "someblog");
        assert_eq!(target.category_no, 0);
        assert_eq!(target.count_per_page, 5);
        assert_eq!(target.max_pages, 10);
        assert_eq!(target.label(), "blog_someblog");
    }

    #[test]
    fn blog_target_missing_id_is_fatal() {
        assert!(BlogTarget::from_lookup(lookup(&[])).is_err());
    }
}
