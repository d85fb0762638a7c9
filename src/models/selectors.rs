// src/models/selectors.rs

//! CSS selector fallback chains for blog post extraction.

use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::utils::clean_text;

/// Ordered list of CSS selectors tried in sequence; the first selector that
/// yields non-empty text wins.
///
/// Represented as data so chains can be extended from configuration without
/// touching extraction code.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectorChain(pub Vec<String>);

impl SelectorChain {
    pub fn new<I, S>(selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(selectors.into_iter().map(Into::into).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return the cleaned text of the first matching, non-empty element.
    pub fn first_match(&self, document: &Html) -> Result<Option<String>> {
        for raw in &self.0 {
            let selector =
                Selector::parse(raw).map_err(|e| AppError::selector(raw, format!("{e:?}")))?;
            if let Some(element) = document.select(&selector).next() {
                let text = clean_text(&element.text().collect::<String>());
                if !text.is_empty() {
                    return Ok(Some(text));
                }
            }
        }
        Ok(None)
    }
}

/// Selector chains for the fields of a blog post page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogSelectors {
    #[serde(default = "defaults::title")]
    pub title: SelectorChain,

    #[serde(default = "defaults::body")]
    pub body: SelectorChain,

    #[serde(default = "defaults::writer")]
    pub writer: SelectorChain,

    #[serde(default = "defaults::date")]
    pub date: SelectorChain,
}

impl Default for BlogSelectors {
    fn default() -> Self {
        Self {
            title: defaults::title(),
            body: defaults::body(),
            writer: defaults::writer(),
            date: defaults::date(),
        }
    }
}

mod defaults {
    use super::SelectorChain;

    // Chains cover the SmartEditor ONE layout first, then the legacy
    // editors still serving older posts.
    pub fn title() -> SelectorChain {
        SelectorChain::new([".se-title-text", ".htitle", ".se_title .se_textarea"])
    }

    pub fn body() -> SelectorChain {
        SelectorChain::new([".se-main-container", "#postViewArea", ".se_component_wrap"])
    }

    pub fn writer() -> SelectorChain {
        SelectorChain::new([".nick", ".blog_author .author", ".writer"])
    }

    pub fn date() -> SelectorChain {
        SelectorChain::new([".se_publishDate", ".blog2_container .se_publishDate", ".date"])
    }
}
