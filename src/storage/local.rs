// src/storage/local.rs

//! Local filesystem JSON snapshot storage.

use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;

use crate::error::Result;

/// JSON snapshot writer rooted at an output directory.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    root: PathBuf,
    label: String,
    stamp: String,
}

impl JsonStorage {
    /// Create a storage for one crawl run, creating the output directory.
    ///
    /// Failure to create the directory is a setup error and aborts the run.
    pub async fn create(root: impl Into<PathBuf>, label: impl Into<String>) -> Result<Self> {
        let storage = Self::with_stamp(
            root,
            label,
            Local::now().format("%Y%m%d_%H%M%S").to_string(),
        );
        tokio::fs::create_dir_all(&storage.root).await?;
        Ok(storage)
    }

    fn with_stamp(root: impl Into<PathBuf>, label: impl Into<String>, stamp: String) -> Self {
        Self {
            root: root.into(),
            label: label.into(),
            stamp,
        }
    }

    /// Path of the snapshot file for a single page.
    pub fn page_path(&self, page: usize) -> PathBuf {
        self.root
            .join(format!("{}_{}_page_{}.json", self.label, self.stamp, page))
    }

    /// Path of the cumulative snapshot file.
    pub fn full_path(&self) -> PathBuf {
        self.root
            .join(format!("{}_{}_full.json", self.label, self.stamp))
    }

    /// Write one page's results.
    pub async fn write_page<T: Serialize>(&self, page: usize, items: &[T]) -> Result<PathBuf> {
        let path = self.page_path(page);
        self.write_json(&path, items).await?;
        Ok(path)
    }

    /// Write the cumulative result set, replacing any previous full snapshot.
    pub async fn write_full<T: Serialize>(&self, items: &[T]) -> Result<PathBuf> {
        let path = self.full_path();
        self.write_json(&path, items).await?;
        Ok(path)
    }

    /// Read a snapshot file back, returning `None` if it does not exist.
    pub async fn read<T: DeserializeOwned>(&self, path: &Path) -> Result<Option<T>> {
        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write pretty JSON atomically (write to temp, then rename).
    async fn write_json<T: Serialize + ?Sized>(&self, path: &Path, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(&bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, path).await?;
        log::debug!("Saved {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }
}
