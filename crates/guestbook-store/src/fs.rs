//! Filesystem-backed blob store.
//!
//! Each key maps to one file directly under the root directory. Writes go
//! to a uniquely named temporary file in the same directory and are then
//! renamed over the target, so a concurrent reader sees either the old or
//! the new object in full.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::StoreResult;
use crate::traits::{validate_key, BlobStore};

const TEMP_SUFFIX: &str = ".tmp";

#[derive(Debug)]
pub struct FsBlobStore {
    root: PathBuf,
    next_temp: AtomicU64,
}

impl FsBlobStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub async fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        tracing::debug!(root = %root.display(), "opened filesystem blob store");
        Ok(Self {
            root,
            next_temp: AtomicU64::new(0),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }

    fn temp_path_for(&self, key: &str) -> PathBuf {
        let n = self.next_temp.fetch_add(1, Ordering::Relaxed);
        self.root
            .join(format!(".{key}.{}.{n}{TEMP_SUFFIX}", std::process::id()))
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn get(&self, key: &str) -> StoreResult<Option<Bytes>> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&self, key: &str, data: Bytes) -> StoreResult<()> {
        let path = self.path_for(key)?;
        let temp = self.temp_path_for(key);
        if let Err(e) = tokio::fs::write(&temp, &data).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(e.into());
        }
        if let Err(e) = tokio::fs::rename(&temp, &path).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(e.into());
        }
        tracing::trace!(key, bytes = data.len(), "wrote object");
        Ok(())
    }
}
