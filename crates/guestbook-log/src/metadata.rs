//! Metadata bookkeeping for the drawing log.
//!
//! Metadata lives in its own JSON object, one entry per drawing at the
//! same ordinal position. Drawings that predate metadata tracking have no
//! entry, so before any positional edit the array is reconciled against the
//! drawing count with [`align`].

use std::sync::Arc;

use bytes::Bytes;
use guestbook_store::{BlobStore, StoreError, StoreResult};
use guestbook_types::{DrawingMetadata, ObjectKey};

/// Reconcile a metadata array with the number of stored drawings.
///
/// A short array gets blank entries prepended: the untracked drawings are
/// always the oldest ones. A long array (left behind by a lost update)
/// drops its oldest surplus entries so the newest metadata keeps lining up
/// with the newest drawings.
pub fn align(mut entries: Vec<DrawingMetadata>, count: usize) -> Vec<DrawingMetadata> {
    let len = entries.len();
    if len < count {
        let mut aligned = vec![DrawingMetadata::blank(); count - len];
        aligned.append(&mut entries);
        aligned
    } else {
        if len > count {
            tracing::warn!(entries = len, drawings = count, "metadata longer than log, trimming oldest entries");
            entries.drain(..len - count);
        }
        entries
    }
}

/// Reads and writes the metadata object.
#[derive(Clone)]
pub struct MetadataStore {
    store: Arc<dyn BlobStore>,
}

impl MetadataStore {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self { store }
    }

    /// Load every metadata entry.
    ///
    /// A missing or unparsable object reads as an empty array; only backend
    /// I/O failures are returned as errors.
    pub async fn load(&self) -> StoreResult<Vec<DrawingMetadata>> {
        let Some(raw) = self.store.get(ObjectKey::Metadata.as_str()).await? else {
            return Ok(Vec::new());
        };
        match serde_json::from_slice(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                tracing::warn!(error = %e, "stored drawing metadata is malformed, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Load and align to `count` drawings in one step.
    pub async fn load_aligned(&self, count: usize) -> StoreResult<Vec<DrawingMetadata>> {
        Ok(align(self.load().await?, count))
    }

    pub async fn save(&self, entries: &[DrawingMetadata]) -> StoreResult<()> {
        let json = serde_json::to_vec(entries)
            .map_err(|e| StoreError::Backend(format!("serializing metadata: {e}")))?;
        self.store
            .put(ObjectKey::Metadata.as_str(), Bytes::from(json))
            .await
    }
}
