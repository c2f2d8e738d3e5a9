//! The guestbook drawing log.
//!
//! Drawings are kept as one delimiter-separated blob, with a parallel JSON
//! array of per-drawing metadata and a JSON set of blocked submitter IPs.
//! All three live in a [`guestbook_store::BlobStore`] and are rewritten in
//! full on every mutation.
//!
//! # Components
//!
//! - [`DrawingCodec`] -- blob <-> ordered drawings
//! - [`Guestbook`] -- list, append, delete-by-index
//! - [`MetadataStore`] and [`align`] -- positional metadata bookkeeping
//! - [`BlockList`] -- moderation by submitter IP, failing open
//! - [`Notifier`] -- best-effort moderation notifications
//!
//! # Indexing
//!
//! Indices are always storage order: the oldest drawing is index 0.
//! Display order (newest first) is a presentation concern for callers.

pub mod codec;
pub mod error;
pub mod guestbook;
pub mod metadata;
pub mod moderation;
pub mod notify;

pub use codec::DrawingCodec;
pub use error::{GuestbookError, GuestbookResult, NotifyError};
pub use guestbook::{parse_index, AppendReceipt, DeleteOutcome, DeleteRequest, Guestbook};
pub use metadata::{align, MetadataStore};
pub use moderation::BlockList;
pub use notify::{BlockOutcome, GuestbookEvent, NoOpNotifier, Notifier};
