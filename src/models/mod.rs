// src/models/mod.rs

//! Domain models for the crawler application.
//!
//! Wire-format structs for the Naver endpoints live in `api`; the
//! crawler-facing records (`PostSummary`, `PostDetail`, `Comment`) in `post`.

pub mod api;
mod post;
mod selectors;

pub use post::{Comment, PostDetail, PostSummary};
pub use selectors::{BlogSelectors, SelectorChain};
