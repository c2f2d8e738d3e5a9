//! Blocked submitter IPs.
//!
//! The set is persisted as a JSON array of strings and rewritten whole on
//! every change. Reads fail open: if the set cannot be read, nobody is
//! blocked.

use std::collections::BTreeSet;
use std::sync::Arc;

use bytes::Bytes;
use guestbook_store::{BlobStore, StoreError, StoreResult};
use guestbook_types::ObjectKey;

#[derive(Clone)]
pub struct BlockList {
    store: Arc<dyn BlobStore>,
}

impl BlockList {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self { store }
    }

    /// Load the blocked set. Missing or malformed objects read as empty.
    pub async fn load(&self) -> StoreResult<BTreeSet<String>> {
        let Some(raw) = self.store.get(ObjectKey::BlockedIps.as_str()).await? else {
            return Ok(BTreeSet::new());
        };
        match serde_json::from_slice::<Vec<String>>(&raw) {
            Ok(ips) => Ok(ips.into_iter().collect()),
            Err(e) => {
                tracing::warn!(error = %e, "stored block list is malformed, treating as empty");
                Ok(BTreeSet::new())
            }
        }
    }

    /// Membership test. An unresolved IP is never blocked, and a store
    /// failure is logged and treated as "not blocked".
    pub async fn is_blocked(&self, ip: Option<&str>) -> bool {
        let Some(ip) = ip else {
            return false;
        };
        match self.load().await {
            Ok(set) => set.contains(ip),
            Err(e) => {
                tracing::error!(error = %e, "failed to read block list, allowing submission");
                false
            }
        }
    }

    /// Add `ip` to the set. Returns `true` if it was not already present.
    pub async fn block(&self, ip: &str) -> StoreResult<bool> {
        let mut set = self.load().await?;
        if !set.insert(ip.to_owned()) {
            return Ok(false);
        }
        self.save(&set).await?;
        tracing::info!(ip, "blocked submitter");
        Ok(true)
    }

    /// Remove `ip` from the set. Returns `true` if it was present.
    pub async fn unblock(&self, ip: &str) -> StoreResult<bool> {
        let mut set = self.load().await?;
        if !set.remove(ip) {
            return Ok(false);
        }
        self.save(&set).await?;
        tracing::info!(ip, "unblocked submitter");
        Ok(true)
    }

    async fn save(&self, set: &BTreeSet<String>) -> StoreResult<()> {
        let json = serde_json::to_vec(set)
            .map_err(|e| StoreError::Backend(format!("serializing block list: {e}")))?;
        self.store
            .put(ObjectKey::BlockedIps.as_str(), Bytes::from(json))
            .await
    }
}
