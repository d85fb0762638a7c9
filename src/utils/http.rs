// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use rand::Rng;
use reqwest::header::{COOKIE, HeaderMap, HeaderValue, ORIGIN, REFERER};

use crate::config::CrawlerConfig;
use crate::error::{AppError, Result};

/// Create a configured asynchronous HTTP client.
///
/// All fetchers share one client: TLS 1.2 floor, per-request timeout and
/// the crawler User-Agent, plus any endpoint-specific default headers.
pub fn create_client(config: &CrawlerConfig, headers: HeaderMap) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .min_tls_version(reqwest::tls::Version::TLS_1_2)
        .default_headers(headers)
        .build()?;
    Ok(client)
}

/// Default headers required by the cafe API.
pub fn cafe_headers(cookie: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    let cookie_value = HeaderValue::from_str(cookie)
        .map_err(|e| AppError::config(format!("invalid NAVER_COOKIE value: {e}")))?;
    headers.insert(COOKIE, cookie_value);
    headers.insert(REFERER, HeaderValue::from_static("https://cafe.naver.com"));
    headers.insert(ORIGIN, HeaderValue::from_static("https://cafe.naver.com"));
    headers.insert("X-Cafe-Product", HeaderValue::from_static("pc"));
    Ok(headers)
}

/// Sleep for a randomized interval within the configured politeness window.
pub async fn polite_delay(config: &CrawlerConfig) {
    let min = config.delay_min_ms;
    let max = config.delay_max_ms;
    if max == 0 {
        return;
    }

    let wait_ms = if max > min {
        rand::thread_rng().gen_range(min..=max)
    } else {
        max
    };
    tokio::time::sleep(Duration::from_millis(wait_ms)).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CrawlerConfig;

    #[test]
    fn test_create_client_with_defaults() {
        let config = CrawlerConfig::default();
        assert!(create_client(&config, HeaderMap::new()).is_ok());
    }

    #[test]
    fn test_cafe_headers() {
        let headers = cafe_headers("NID_AUT=abc; NID_SES=def").unwrap();
        assert_eq!(headers.get(REFERER).unwrap(), "https://cafe.naver.com");
        assert_eq!(headers.get("X-Cafe-Product").unwrap(), "pc");
        assert!(headers.contains_key(COOKIE));
    }

    #[test]
    fn test_cafe_headers_rejects_control_chars() {
        assert!(cafe_headers("bad\ncookie").is_err());
    }

    #[tokio::test]
    async fn test_polite_delay_zero_window_returns_immediately() {
        let config = CrawlerConfig {
            delay_min_ms: 0,
            delay_max_ms: 0,
            ..CrawlerConfig::default()
        };
        let start = std::time::Instant::now();
        polite_delay(&config).await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }
}
