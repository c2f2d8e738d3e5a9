use async_trait::async_trait;
use bytes::Bytes;

use crate::error::{StoreError, StoreResult};

/// Whole-object blob store addressed by string keys.
///
/// All implementations must satisfy these invariants:
/// - `put` replaces the entire object; readers see either the old or the new
///   bytes, never a mix.
/// - `get` of a key that was never written returns `Ok(None)`.
/// - No compare-and-swap is offered. Two callers that both read, modify and
///   write one key can lose an update.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Read the object stored under `key`.
    async fn get(&self, key: &str) -> StoreResult<Option<Bytes>>;

    /// Store `data` under `key`, replacing any previous object.
    async fn put(&self, key: &str, data: Bytes) -> StoreResult<()>;
}

/// Reject keys that could escape a namespace or are otherwise unusable.
pub fn validate_key(key: &str) -> StoreResult<()> {
    let reason = if key.is_empty() {
        "empty"
    } else if key.contains('/') || key.contains('\\') {
        "contains a path separator"
    } else if key == "." || key == ".." {
        "is a relative path component"
    } else if key.chars().any(char::is_control) {
        "contains control characters"
    } else {
        return Ok(());
    };
    Err(StoreError::InvalidKey {
        key: key.to_owned(),
        reason,
    })
}
