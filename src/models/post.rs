// src/models/post.rs

//! Crawled post data structures.

use serde::{Deserialize, Serialize};

/// A post summary produced by a listing endpoint.
///
/// Drives the detail fetch; also the full record for blog title-list crawls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostSummary {
    /// Source-side post identifier (cafe article id or blog logNo)
    pub id: String,

    /// Post title
    pub title: String,

    /// Formatted write date
    pub write_date: String,

    /// Full URL to the post
    pub url: String,
}

/// A fully fetched post with body and comments.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostDetail {
    /// Source-side post identifier
    pub id: String,

    /// Post title
    pub title: String,

    /// Post body (HTML for cafe articles, cleaned text for blog posts)
    pub content: String,

    /// Author nickname
    pub writer: String,

    /// Author member level name, where the source provides one
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub writer_level: String,

    /// Formatted write date
    pub write_date: String,

    /// Full URL to the post
    pub url: String,

    #[serde(default)]
    pub comment_count: i64,

    #[serde(default)]
    pub read_count: i64,

    #[serde(default)]
    pub like_count: i64,

    /// Comments in source order
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl PostDetail {
    /// An empty title AND an empty body means extraction failed.
    pub fn is_extracted(&self) -> bool {
        !self.title.is_empty() || !self.content.is_empty()
    }
}

/// A single comment on a post.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    pub id: i64,
    pub content: String,
    pub writer: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub writer_level: String,

    pub write_date: String,

    #[serde(default)]
    pub like_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_extracted() {
        let mut post = PostDetail::default();
        assert!(!post.is_extracted());

        post.title = "title only".to_string();
        assert!(post.is_extracted());

        post.title.clear();
        post.content = "body only".to_string();
        assert!(post.is_extracted());
    }

    #[test]
    fn test_post_detail_round_trip() {
        let post = PostDetail {
            id: "123".to_string(),
            title: "공지".to_string(),
            content: "<p>본문</p>".to_string(),
            writer: "작성자".to_string(),
            writer_level: "정회원".to_string(),
            write_date: "2024-01-01 12:00:00".to_string(),
            url: "https://cafe.naver.com/test/123".to_string(),
            comment_count: 1,
            read_count: 10,
            like_count: 2,
            comments: vec![Comment {
                id: 7,
                content: "댓글".to_string(),
                writer: "다른사람".to_string(),
                writer_level: String::new(),
                write_date: "2024-01-01 13:00:00".to_string(),
                like_count: 0,
            }],
        };

        let json = serde_json::to_string(&post).unwrap();
        let back: PostDetail = serde_json::from_str(&json).unwrap();
        assert_eq!(back, post);
    }
}
