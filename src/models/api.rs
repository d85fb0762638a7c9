// src/models/api.rs

//! Wire-format structs for the Naver listing and detail endpoints.
//!
//! Every field is defaulted so a partially filled response decodes instead
//! of failing the whole page.

use serde::Deserialize;

use crate::error::Result;

// --- Cafe board list ---

/// Response of the cafe board-list API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleListResponse {
    #[serde(default)]
    pub result: ArticleListResult,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleListResult {
    #[serde(default)]
    pub article_list: Vec<ArticleListEntry>,

    #[serde(default)]
    pub page_info: PageInfo,
}

/// One entry of the article list; only `type == "ARTICLE"` entries are
/// posts, the rest are ads and notices injected by the platform.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleListEntry {
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub item: ArticleItem,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleItem {
    #[serde(default)]
    pub article_id: i64,

    #[serde(default)]
    pub subject: String,

    /// Millisecond epoch timestamp
    #[serde(default)]
    pub write_date_timestamp: i64,

    #[serde(default)]
    pub comment_count: i64,

    #[serde(default)]
    pub read_count: i64,

    #[serde(default)]
    pub like_count: i64,

    #[serde(default)]
    pub writer_info: WriterInfo,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriterInfo {
    #[serde(default)]
    pub nick_name: String,

    #[serde(default)]
    pub member_level: i64,

    #[serde(default)]
    pub member_level_name: String,

    #[serde(default)]
    pub staff: bool,

    #[serde(default)]
    pub manager: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Last page number the source reports as navigable
    #[serde(default)]
    pub last_navigation_page_number: i64,

    #[serde(default)]
    pub visible_next_button: bool,
}

// --- Cafe article detail ---

/// Response of the cafe article detail API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleDetailResponse {
    #[serde(default)]
    pub result: ArticleDetailResult,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleDetailResult {
    #[serde(default)]
    pub article: ArticleDetail,

    #[serde(default)]
    pub comments: CommentList,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDetail {
    #[serde(default)]
    pub id: i64,

    #[serde(default)]
    pub subject: String,

    #[serde(default)]
    pub content_html: String,

    /// Millisecond epoch timestamp
    #[serde(default)]
    pub write_date: i64,

    #[serde(default)]
    pub writer: WriterInfo,

    #[serde(default)]
    pub comment_count: i64,

    #[serde(default)]
    pub read_count: i64,

    #[serde(default)]
    pub like_count: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentList {
    #[serde(default)]
    pub items: Vec<CommentItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentItem {
    #[serde(default)]
    pub id: i64,

    #[serde(default)]
    pub content: String,

    /// Millisecond epoch timestamp
    #[serde(default)]
    pub write_date: i64,

    #[serde(default)]
    pub writer: WriterInfo,

    #[serde(default)]
    pub like_count: i64,
}

// --- Blog title list ---

/// Response of `PostTitleListAsync.naver`.
///
/// Every field is a string on the wire, including counts.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogTitleListResponse {
    #[serde(default)]
    pub result_code: String,

    #[serde(default)]
    pub result_message: String,

    #[serde(default)]
    pub post_list: Vec<BlogListItem>,

    #[serde(default)]
    pub count_per_page: String,

    #[serde(default)]
    pub total_count: String,
}

impl BlogTitleListResponse {
    /// Decode the endpoint's pseudo-JSON.
    ///
    /// The response uses single-quoted strings; normalize the quotes before
    /// handing it to serde.
    pub fn from_lenient_json(body: &str) -> Result<Self> {
        let normalized = body.replace('\'', "\"");
        Ok(serde_json::from_str(&normalized)?)
    }

    /// Whether the endpoint reported success.
    pub fn is_success(&self) -> bool {
        self.result_code == "S"
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogListItem {
    #[serde(default)]
    pub log_no: String,

    /// Percent-encoded title
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub category_no: String,

    #[serde(default)]
    pub parent_category_no: String,

    #[serde(default)]
    pub comment_count: String,

    #[serde(default)]
    pub read_count: String,

    #[serde(default)]
    pub add_date: String,
}
