// src/storage/mod.rs

//! Snapshot persistence for crawl results.
//!
//! One storage instance covers one crawl run: all files it writes share a
//! single timestamp taken at construction, so a run produces
//!
//! ```text
//! {output_dir}/
//! ├── {label}_{YYYYMMDD_HHMMSS}_page_1.json
//! ├── {label}_{YYYYMMDD_HHMMSS}_page_2.json
//! └── {label}_{YYYYMMDD_HHMMSS}_full.json
//! ```
//!
//! Page files are written once; the full file is rewritten after each page
//! as the cumulative snapshot grows.

pub mod local;

pub use local::JsonStorage;
