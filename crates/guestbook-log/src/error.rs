use thiserror::Error;

/// Errors produced by guestbook operations.
///
/// Everything except [`GuestbookError::Store`] is detected before any
/// object is written.
#[derive(Debug, Error)]
pub enum GuestbookError {
    /// The submitted drawing has no bytes.
    #[error("drawing is empty")]
    EmptyDrawing,

    /// The submitter's IP is on the block list.
    #[error("submissions from this address are blocked")]
    Blocked,

    #[error("missing secret key")]
    MissingSecret,

    #[error("invalid secret key")]
    InvalidSecret,

    #[error("missing drawing index")]
    MissingIndex,

    #[error("invalid drawing index: {0:?}")]
    InvalidIndex(String),

    /// The log does not exist or holds no drawings.
    #[error("no drawings found")]
    EmptyLog,

    #[error("drawing index {index} out of bounds ({count} drawings)")]
    IndexOutOfBounds { index: usize, count: usize },

    #[error("store error: {0}")]
    Store(#[from] guestbook_store::StoreError),
}

impl GuestbookError {
    /// Returns `true` for failures of the backing store rather than the request.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}

pub type GuestbookResult<T> = Result<T, GuestbookError>;

/// A moderation notification could not be delivered.
#[derive(Debug, Error)]
#[error("notification failed: {0}")]
pub struct NotifyError(pub String);
