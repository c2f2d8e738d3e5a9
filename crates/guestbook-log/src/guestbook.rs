use std::collections::BTreeSet;
use std::sync::Arc;

use bytes::Bytes;
use guestbook_store::{BlobStore, StoreResult};
use guestbook_types::{Drawing, DrawingMetadata, ObjectKey, Submitter};

use crate::codec::DrawingCodec;
use crate::error::{GuestbookError, GuestbookResult};
use crate::metadata::MetadataStore;
use crate::moderation::BlockList;
use crate::notify::{BlockOutcome, GuestbookEvent, NoOpNotifier, Notifier};

/// A request to remove one drawing, as received from an untrusted caller.
///
/// Fields are kept raw so that validation (and its error reporting) happens
/// in one place, inside [`Guestbook::delete`].
#[derive(Clone, Debug, Default)]
pub struct DeleteRequest {
    pub secret: Option<String>,
    /// Zero-based position in storage order (oldest first).
    pub index: Option<String>,
    pub block_submitter: bool,
}

impl DeleteRequest {
    pub fn new(secret: impl Into<String>, index: usize) -> Self {
        Self {
            secret: Some(secret.into()),
            index: Some(index.to_string()),
            block_submitter: false,
        }
    }

    pub fn with_block(mut self) -> Self {
        self.block_submitter = true;
        self
    }
}

/// Result of a successful append.
#[derive(Clone, Debug)]
pub struct AppendReceipt {
    /// Storage-order position of the new drawing.
    pub index: usize,
    pub metadata: DrawingMetadata,
}

/// Result of a successful deletion.
#[derive(Clone, Debug)]
pub struct DeleteOutcome {
    pub index: usize,
    pub drawing: Drawing,
    pub metadata: DrawingMetadata,
    pub block: BlockOutcome,
    pub remaining: usize,
}

/// The guestbook drawing log.
///
/// Holds no state of its own: every operation reads the objects it needs
/// from the blob store, edits them, and writes them back whole. Concurrent
/// mutations are not coordinated, so two overlapping appends or deletes can
/// lose one of the updates.
pub struct Guestbook {
    store: Arc<dyn BlobStore>,
    metadata: MetadataStore,
    blocks: BlockList,
    notifier: Arc<dyn Notifier>,
    delete_secret: Option<String>,
}

impl Guestbook {
    /// A guestbook with notifications disabled and deletion locked.
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self {
            metadata: MetadataStore::new(store.clone()),
            blocks: BlockList::new(store.clone()),
            store,
            notifier: Arc::new(NoOpNotifier),
            delete_secret: None,
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Set the secret callers must present to delete drawings.
    pub fn with_delete_secret(mut self, secret: impl Into<String>) -> Self {
        self.delete_secret = Some(secret.into());
        self
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// The stored log blob exactly as persisted; empty if it does not exist.
    pub async fn raw_log(&self) -> GuestbookResult<Bytes> {
        Ok(self.load_log().await?)
    }

    /// Every drawing in storage order.
    pub async fn list(&self) -> GuestbookResult<Vec<Drawing>> {
        Ok(self.load_drawings().await?)
    }

    /// Drawings paired with their aligned metadata.
    pub async fn entries(&self) -> GuestbookResult<Vec<(Drawing, DrawingMetadata)>> {
        let drawings = self.load_drawings().await?;
        let metadata = self.metadata.load_aligned(drawings.len()).await?;
        Ok(drawings.into_iter().zip(metadata).collect())
    }

    // -----------------------------------------------------------------------
    // Append
    // -----------------------------------------------------------------------

    /// Add a drawing to the end of the log.
    ///
    /// A payload carrying the delimiter byte reads back as several drawings.
    /// Each of those gets its own copy of the submitter's metadata so every
    /// later position stays attributed to the right address.
    pub async fn append(
        &self,
        drawing: Drawing,
        submitter: &Submitter,
    ) -> GuestbookResult<AppendReceipt> {
        let fragments = DrawingCodec::count(drawing.as_bytes());
        if fragments == 0 {
            return Err(GuestbookError::EmptyDrawing);
        }
        if self.blocks.is_blocked(submitter.ip.as_deref()).await {
            tracing::info!(ip = ?submitter.ip, "rejected submission from blocked address");
            return Err(GuestbookError::Blocked);
        }
        if fragments > 1 {
            tracing::warn!(
                bytes = drawing.len(),
                fragments,
                "drawing contains the delimiter byte and will read back split"
            );
        }

        let size = drawing.len();
        let original = self.load_log().await?;
        let mut drawings = DrawingCodec::decode(&original);
        let previous = drawings.len();
        drawings.push(drawing);
        self.write_log(&drawings).await?;

        let entry = DrawingMetadata::record(submitter);
        let recorded = self
            .update_metadata(previous, |metadata| {
                metadata.extend(std::iter::repeat(entry.clone()).take(fragments));
            })
            .await;
        if let Err(e) = recorded {
            self.restore_log(original).await;
            return Err(e.into());
        }

        tracing::info!(index = previous, size, "stored drawing");
        self.notify(GuestbookEvent::DrawingSubmitted {
            index: previous,
            size,
            metadata: entry.clone(),
        })
        .await;

        Ok(AppendReceipt {
            index: previous,
            metadata: entry,
        })
    }

    // -----------------------------------------------------------------------
    // Delete
    // -----------------------------------------------------------------------

    /// Remove one drawing by storage-order index, optionally blocking the
    /// address it was submitted from.
    pub async fn delete(&self, request: &DeleteRequest) -> GuestbookResult<DeleteOutcome> {
        self.authorize(request.secret.as_deref())?;
        let index = parse_index(request.index.as_deref())?;

        let original = self.load_log().await?;
        let mut drawings = DrawingCodec::decode(&original);
        let count = drawings.len();
        if count == 0 {
            return Err(GuestbookError::EmptyLog);
        }
        if index >= count {
            return Err(GuestbookError::IndexOutOfBounds { index, count });
        }

        let drawing = drawings.remove(index);
        self.write_log(&drawings).await?;

        let entry = match self
            .update_metadata(count, |metadata| metadata.remove(index))
            .await
        {
            Ok(entry) => entry,
            Err(e) => {
                self.restore_log(original).await;
                return Err(e.into());
            }
        };
        tracing::info!(index, remaining = drawings.len(), "deleted drawing");

        let block = if request.block_submitter {
            self.block_submitter(&entry).await
        } else {
            BlockOutcome::NotRequested
        };

        self.notify(GuestbookEvent::DrawingDeleted {
            index,
            metadata: entry.clone(),
            block: block.clone(),
        })
        .await;

        Ok(DeleteOutcome {
            index,
            drawing,
            metadata: entry,
            block,
            remaining: drawings.len(),
        })
    }

    async fn block_submitter(&self, entry: &DrawingMetadata) -> BlockOutcome {
        let Some(ip) = entry.ip.clone() else {
            tracing::info!("no IP recorded for deleted drawing, skipping block");
            return BlockOutcome::NoKnownIp;
        };
        match self.blocks.block(&ip).await {
            Ok(_) => BlockOutcome::Blocked { ip },
            Err(e) => {
                tracing::error!(error = %e, ip, "failed to persist block");
                BlockOutcome::Failed { ip }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Moderation
    // -----------------------------------------------------------------------

    pub async fn is_blocked(&self, ip: Option<&str>) -> bool {
        self.blocks.is_blocked(ip).await
    }

    pub async fn blocked_ips(&self) -> GuestbookResult<BTreeSet<String>> {
        Ok(self.blocks.load().await?)
    }

    pub async fn block_ip(&self, ip: &str) -> GuestbookResult<bool> {
        Ok(self.blocks.block(ip).await?)
    }

    pub async fn unblock_ip(&self, ip: &str) -> GuestbookResult<bool> {
        Ok(self.blocks.unblock(ip).await?)
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn authorize(&self, supplied: Option<&str>) -> GuestbookResult<()> {
        let supplied = match supplied {
            Some(s) if !s.is_empty() => s,
            _ => return Err(GuestbookError::MissingSecret),
        };
        match self.delete_secret.as_deref() {
            Some(expected) if expected == supplied => Ok(()),
            Some(_) => Err(GuestbookError::InvalidSecret),
            None => {
                tracing::warn!("delete attempted but no delete secret is configured");
                Err(GuestbookError::InvalidSecret)
            }
        }
    }

    async fn load_log(&self) -> StoreResult<Bytes> {
        Ok(self
            .store
            .get(ObjectKey::Drawings.as_str())
            .await?
            .unwrap_or_default())
    }

    async fn load_drawings(&self) -> StoreResult<Vec<Drawing>> {
        Ok(DrawingCodec::decode(&self.load_log().await?))
    }

    async fn write_log(&self, drawings: &[Drawing]) -> StoreResult<()> {
        self.store
            .put(ObjectKey::Drawings.as_str(), DrawingCodec::encode(drawings))
            .await
    }

    /// Load metadata aligned to `count` drawings, apply `edit`, and save.
    async fn update_metadata<T>(
        &self,
        count: usize,
        edit: impl FnOnce(&mut Vec<DrawingMetadata>) -> T,
    ) -> StoreResult<T> {
        let mut metadata = self.metadata.load_aligned(count).await?;
        let result = edit(&mut metadata);
        self.metadata.save(&metadata).await?;
        Ok(result)
    }

    /// Put back the log blob read at the start of a failed mutation, so the
    /// drawings and their metadata keep the same length.
    async fn restore_log(&self, original: Bytes) {
        let size = original.len();
        match self.store.put(ObjectKey::Drawings.as_str(), original).await {
            Ok(()) => tracing::warn!(size, "metadata update failed, restored previous drawing log"),
            Err(e) => tracing::error!(
                error = %e,
                "metadata update failed and the drawing log could not be restored"
            ),
        }
    }

    async fn notify(&self, event: GuestbookEvent) {
        if let Err(e) = self.notifier.notify(&event).await {
            tracing::warn!(error = %e, "moderation notification failed");
        }
    }
}

impl std::fmt::Debug for Guestbook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Guestbook")
            .field("delete_enabled", &self.delete_secret.is_some())
            .finish_non_exhaustive()
    }
}

/// Parse a caller-supplied drawing index.
pub fn parse_index(raw: Option<&str>) -> GuestbookResult<usize> {
    let raw = match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return Err(GuestbookError::MissingIndex),
    };
    raw.parse::<usize>()
        .map_err(|_| GuestbookError::InvalidIndex(raw.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use guestbook_store::{InMemoryBlobStore, StoreError};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    use crate::error::NotifyError;

    const SECRET: &str = "hunter2";

    #[derive(Default)]
    struct RecordingNotifier {
        events: Mutex<Vec<GuestbookEvent>>,
    }

    impl RecordingNotifier {
        fn summaries(&self) -> Vec<String> {
            self.events.lock().unwrap().iter().map(|e| e.summary()).collect()
        }
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn notify(&self, event: &GuestbookEvent) -> Result<(), NotifyError> {
            self.events.lock().unwrap().push(event.clone());
            Ok(())
        }
    }

    struct FailingNotifier;

    #[async_trait]
    impl Notifier for FailingNotifier {
        async fn notify(&self, _event: &GuestbookEvent) -> Result<(), NotifyError> {
            Err(NotifyError("webhook down".into()))
        }
    }

    /// Store whose writes to one key always fail.
    struct RejectWrites {
        inner: InMemoryBlobStore,
        key: &'static str,
    }

    #[async_trait]
    impl BlobStore for RejectWrites {
        async fn get(&self, key: &str) -> StoreResult<Option<Bytes>> {
            self.inner.get(key).await
        }
        async fn put(&self, key: &str, data: Bytes) -> StoreResult<()> {
            if key == self.key {
                return Err(StoreError::Backend("read-only".into()));
            }
            self.inner.put(key, data).await
        }
    }

    /// Store whose next write to one key fails once armed.
    struct FailNextWrite {
        inner: InMemoryBlobStore,
        key: &'static str,
        armed: AtomicBool,
    }

    impl FailNextWrite {
        fn new(key: ObjectKey) -> Self {
            Self {
                inner: InMemoryBlobStore::new(),
                key: key.as_str(),
                armed: AtomicBool::new(false),
            }
        }

        fn arm(&self) {
            self.armed.store(true, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl BlobStore for FailNextWrite {
        async fn get(&self, key: &str) -> StoreResult<Option<Bytes>> {
            self.inner.get(key).await
        }
        async fn put(&self, key: &str, data: Bytes) -> StoreResult<()> {
            if key == self.key && self.armed.swap(false, Ordering::SeqCst) {
                return Err(StoreError::Backend("disk full".into()));
            }
            self.inner.put(key, data).await
        }
    }

    async fn ips(book: &Guestbook) -> Vec<Option<String>> {
        book.entries()
            .await
            .unwrap()
            .into_iter()
            .map(|(_, m)| m.ip)
            .collect()
    }

    fn guestbook() -> (Arc<InMemoryBlobStore>, Guestbook) {
        let store = Arc::new(InMemoryBlobStore::new());
        let book = Guestbook::new(store.clone()).with_delete_secret(SECRET);
        (store, book)
    }

    fn drawing(tag: u8) -> Drawing {
        Drawing::from(vec![tag, tag.wrapping_add(1), 0])
    }

    async fn seed(book: &Guestbook, n: u8) {
        for i in 0..n {
            book.append(drawing(i), &Submitter::from_ip(format!("10.0.0.{i}")))
                .await
                .unwrap();
        }
    }

    // -----------------------------------------------------------------------
    // Append / list
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn empty_guestbook_lists_nothing() {
        let (_, book) = guestbook();
        assert!(book.raw_log().await.unwrap().is_empty());
        assert!(book.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn append_assigns_storage_index() {
        let (_, book) = guestbook();
        let first = book.append(drawing(1), &Submitter::unknown()).await.unwrap();
        let second = book.append(drawing(2), &Submitter::unknown()).await.unwrap();
        assert_eq!(first.index, 0);
        assert_eq!(second.index, 1);
        assert_eq!(book.list().await.unwrap(), vec![drawing(1), drawing(2)]);
    }

    #[tokio::test]
    async fn raw_log_is_delimited() {
        let (_, book) = guestbook();
        book.append(Drawing::from(vec![1u8, 2]), &Submitter::unknown()).await.unwrap();
        book.append(Drawing::from(vec![3u8]), &Submitter::unknown()).await.unwrap();
        assert_eq!(&book.raw_log().await.unwrap()[..], &[1, 2, 0xFF, 3]);
    }

    #[tokio::test]
    async fn empty_drawing_is_rejected_without_writing() {
        let (store, book) = guestbook();
        let err = book.append(Drawing::from(Vec::new()), &Submitter::unknown()).await.unwrap_err();
        assert!(matches!(err, GuestbookError::EmptyDrawing));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn append_records_metadata() {
        let (_, book) = guestbook();
        let receipt = book
            .append(drawing(1), &Submitter::from_ip("203.0.113.9"))
            .await
            .unwrap();
        let entries = book.entries().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].1, receipt.metadata);
        assert_eq!(entries[0].1.ip.as_deref(), Some("203.0.113.9"));
        assert!(entries[0].1.timestamp.is_some());
    }

    #[tokio::test]
    async fn delimiter_only_drawing_is_rejected() {
        let (store, book) = guestbook();
        let err = book
            .append(Drawing::from(vec![0xFFu8, 0xFF]), &Submitter::unknown())
            .await
            .unwrap_err();
        assert!(matches!(err, GuestbookError::EmptyDrawing));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn split_drawing_keeps_attribution() {
        let (_, book) = guestbook();
        book.append(drawing(1), &Submitter::from_ip("10.0.0.1")).await.unwrap();
        let receipt = book
            .append(Drawing::from(vec![2u8, 0xFF, 3]), &Submitter::from_ip("6.6.6.6"))
            .await
            .unwrap();
        book.append(drawing(4), &Submitter::from_ip("10.0.0.4")).await.unwrap();

        assert_eq!(receipt.index, 1);
        assert_eq!(book.list().await.unwrap().len(), 4);
        assert_eq!(
            ips(&book).await,
            vec![
                Some("10.0.0.1".to_string()),
                Some("6.6.6.6".to_string()),
                Some("6.6.6.6".to_string()),
                Some("10.0.0.4".to_string()),
            ]
        );

        let outcome = book
            .delete(&DeleteRequest::new(SECRET, 2).with_block())
            .await
            .unwrap();
        assert_eq!(outcome.block.blocked_ip(), Some("6.6.6.6"));
        assert!(!book.is_blocked(Some("10.0.0.1")).await);
    }

    #[tokio::test]
    async fn blocked_submitter_is_rejected() {
        let (_, book) = guestbook();
        book.block_ip("1.2.3.4").await.unwrap();
        let err = book
            .append(drawing(1), &Submitter::from_ip("1.2.3.4"))
            .await
            .unwrap_err();
        assert!(matches!(err, GuestbookError::Blocked));
        assert!(book.list().await.unwrap().is_empty());

        book.append(drawing(2), &Submitter::unknown()).await.unwrap();
        assert_eq!(book.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn notifier_failure_does_not_fail_append() {
        let store = Arc::new(InMemoryBlobStore::new());
        let book = Guestbook::new(store).with_notifier(Arc::new(FailingNotifier));
        book.append(drawing(1), &Submitter::unknown()).await.unwrap();
        assert_eq!(book.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn append_notifies() {
        let notifier = Arc::new(RecordingNotifier::default());
        let book = Guestbook::new(Arc::new(InMemoryBlobStore::new())).with_notifier(notifier.clone());
        book.append(drawing(1), &Submitter::from_ip("8.8.4.4")).await.unwrap();
        assert_eq!(
            notifier.summaries(),
            vec!["New guestbook drawing #0 (3 bytes) from 8.8.4.4".to_string()]
        );
    }

    // -----------------------------------------------------------------------
    // Delete validation
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn delete_requires_secret() {
        let (_, book) = guestbook();
        seed(&book, 2).await;
        let request = DeleteRequest {
            index: Some("0".into()),
            ..Default::default()
        };
        assert!(matches!(book.delete(&request).await, Err(GuestbookError::MissingSecret)));
    }

    #[tokio::test]
    async fn delete_with_wrong_secret_changes_nothing() {
        let (_, book) = guestbook();
        seed(&book, 2).await;
        let before = book.raw_log().await.unwrap();
        let err = book.delete(&DeleteRequest::new("wrong", 0)).await.unwrap_err();
        assert!(matches!(err, GuestbookError::InvalidSecret));
        assert_eq!(book.raw_log().await.unwrap(), before);
    }

    #[tokio::test]
    async fn delete_without_configured_secret_is_refused() {
        let book = Guestbook::new(Arc::new(InMemoryBlobStore::new()));
        seed(&book, 1).await;
        let err = book.delete(&DeleteRequest::new("anything", 0)).await.unwrap_err();
        assert!(matches!(err, GuestbookError::InvalidSecret));
    }

    #[tokio::test]
    async fn delete_index_validation() {
        let (_, book) = guestbook();
        seed(&book, 1).await;
        let with_index = |index: Option<&str>| DeleteRequest {
            secret: Some(SECRET.into()),
            index: index.map(Into::into),
            block_submitter: false,
        };
        assert!(matches!(
            book.delete(&with_index(None)).await,
            Err(GuestbookError::MissingIndex)
        ));
        assert!(matches!(
            book.delete(&with_index(Some("  "))).await,
            Err(GuestbookError::MissingIndex)
        ));
        assert!(matches!(
            book.delete(&with_index(Some("-1"))).await,
            Err(GuestbookError::InvalidIndex(_))
        ));
        assert!(matches!(
            book.delete(&with_index(Some("two"))).await,
            Err(GuestbookError::InvalidIndex(_))
        ));
    }

    #[tokio::test]
    async fn delete_on_empty_log_is_not_found() {
        let (_, book) = guestbook();
        let err = book.delete(&DeleteRequest::new(SECRET, 0)).await.unwrap_err();
        assert!(matches!(err, GuestbookError::EmptyLog));
    }

    #[tokio::test]
    async fn delete_out_of_bounds_changes_nothing() {
        let (_, book) = guestbook();
        seed(&book, 2).await;
        let before = book.raw_log().await.unwrap();
        let err = book.delete(&DeleteRequest::new(SECRET, 2)).await.unwrap_err();
        assert!(matches!(
            err,
            GuestbookError::IndexOutOfBounds { index: 2, count: 2 }
        ));
        assert_eq!(book.raw_log().await.unwrap(), before);
    }

    // -----------------------------------------------------------------------
    // Delete effects
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn delete_removes_drawing_and_metadata() {
        let (_, book) = guestbook();
        seed(&book, 3).await;
        let outcome = book.delete(&DeleteRequest::new(SECRET, 1)).await.unwrap();
        assert_eq!(outcome.drawing, drawing(1));
        assert_eq!(outcome.metadata.ip.as_deref(), Some("10.0.0.1"));
        assert_eq!(outcome.remaining, 2);
        assert_eq!(outcome.block, BlockOutcome::NotRequested);

        let entries = book.entries().await.unwrap();
        let ips: Vec<_> = entries.iter().map(|(_, m)| m.ip.as_deref().unwrap()).collect();
        assert_eq!(ips, vec!["10.0.0.0", "10.0.0.2"]);
        assert_eq!(book.list().await.unwrap(), vec![drawing(0), drawing(2)]);
    }

    #[tokio::test]
    async fn delete_with_block_blocks_submitter() {
        let (_, book) = guestbook();
        seed(&book, 2).await;
        let outcome = book
            .delete(&DeleteRequest::new(SECRET, 0).with_block())
            .await
            .unwrap();
        assert_eq!(outcome.block.blocked_ip(), Some("10.0.0.0"));
        assert!(book.is_blocked(Some("10.0.0.0")).await);
        assert!(!book.is_blocked(Some("10.0.0.1")).await);
    }

    #[tokio::test]
    async fn delete_legacy_drawing_skips_block() {
        let (store, book) = guestbook();
        store
            .put(ObjectKey::Drawings.as_str(), Bytes::from_static(&[1, 0xFF, 2]))
            .await
            .unwrap();
        let outcome = book
            .delete(&DeleteRequest::new(SECRET, 0).with_block())
            .await
            .unwrap();
        assert_eq!(outcome.block, BlockOutcome::NoKnownIp);
        assert!(book.blocked_ips().await.unwrap().is_empty());
        assert_eq!(book.list().await.unwrap(), vec![Drawing::from(vec![2u8])]);
    }

    #[tokio::test]
    async fn failed_block_still_deletes() {
        let store = Arc::new(RejectWrites {
            inner: InMemoryBlobStore::new(),
            key: ObjectKey::BlockedIps.as_str(),
        });
        let notifier = Arc::new(RecordingNotifier::default());
        let book = Guestbook::new(store)
            .with_delete_secret(SECRET)
            .with_notifier(notifier.clone());
        seed(&book, 1).await;

        let outcome = book
            .delete(&DeleteRequest::new(SECRET, 0).with_block())
            .await
            .unwrap();
        assert_eq!(outcome.block, BlockOutcome::Failed { ip: "10.0.0.0".into() });
        assert!(book.list().await.unwrap().is_empty());
        let summaries = notifier.summaries();
        assert!(summaries.last().unwrap().contains("blocking 10.0.0.0 failed"));
    }

    #[tokio::test]
    async fn log_write_failure_is_reported() {
        let store = Arc::new(RejectWrites {
            inner: InMemoryBlobStore::new(),
            key: ObjectKey::Drawings.as_str(),
        });
        let book = Guestbook::new(store);
        let err = book.append(drawing(1), &Submitter::unknown()).await.unwrap_err();
        assert!(err.is_internal());
    }

    #[tokio::test]
    async fn failed_metadata_write_rolls_back_append() {
        let store = Arc::new(FailNextWrite::new(ObjectKey::Metadata));
        let book = Guestbook::new(store.clone());
        book.append(drawing(1), &Submitter::from_ip("10.0.0.1")).await.unwrap();
        book.append(drawing(2), &Submitter::from_ip("10.0.0.2")).await.unwrap();

        store.arm();
        let err = book
            .append(drawing(3), &Submitter::from_ip("6.6.6.6"))
            .await
            .unwrap_err();
        assert!(err.is_internal());
        assert_eq!(book.list().await.unwrap(), vec![drawing(1), drawing(2)]);

        book.append(drawing(4), &Submitter::from_ip("10.0.0.4")).await.unwrap();
        assert_eq!(book.list().await.unwrap(), vec![drawing(1), drawing(2), drawing(4)]);
        assert_eq!(
            ips(&book).await,
            vec![
                Some("10.0.0.1".to_string()),
                Some("10.0.0.2".to_string()),
                Some("10.0.0.4".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn failed_metadata_write_rolls_back_first_append() {
        let store = Arc::new(FailNextWrite::new(ObjectKey::Metadata));
        let book = Guestbook::new(store.clone());
        store.arm();
        assert!(book.append(drawing(1), &Submitter::from_ip("6.6.6.6")).await.is_err());
        assert!(book.list().await.unwrap().is_empty());

        book.append(drawing(2), &Submitter::from_ip("10.0.0.2")).await.unwrap();
        assert_eq!(ips(&book).await, vec![Some("10.0.0.2".to_string())]);
    }

    #[tokio::test]
    async fn failed_metadata_write_rolls_back_delete() {
        let store = Arc::new(FailNextWrite::new(ObjectKey::Metadata));
        let book = Guestbook::new(store.clone()).with_delete_secret(SECRET);
        seed(&book, 3).await;

        store.arm();
        let err = book
            .delete(&DeleteRequest::new(SECRET, 1).with_block())
            .await
            .unwrap_err();
        assert!(err.is_internal());
        assert_eq!(book.list().await.unwrap().len(), 3);
        assert!(book.blocked_ips().await.unwrap().is_empty());

        let outcome = book
            .delete(&DeleteRequest::new(SECRET, 2).with_block())
            .await
            .unwrap();
        assert_eq!(outcome.drawing, drawing(2));
        assert_eq!(outcome.block.blocked_ip(), Some("10.0.0.2"));
        assert_eq!(
            ips(&book).await,
            vec![Some("10.0.0.0".to_string()), Some("10.0.0.1".to_string())]
        );
    }

    #[test]
    fn parse_index_accepts_padding() {
        assert_eq!(parse_index(Some(" 3 ")).unwrap(), 3);
        assert_eq!(parse_index(Some("0")).unwrap(), 0);
    }
}
